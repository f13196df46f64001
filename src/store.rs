use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::errors::{DonationError, Result};
use crate::types::{Donation, Fundraiser, Payment};

/// kinds of persisted entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Fundraiser,
    Donation,
    Payment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Fundraiser => "fundraiser",
            EntityKind::Donation => "donation",
            EntityKind::Payment => "payment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// durable key-value get/insert primitive keyed by entity id
///
/// Inserts are atomic per record; a duplicate key is an error. No
/// partial-write or multi-record transaction semantics are offered.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, kind: EntityKind, key: &str) -> Result<Option<Value>>;
    async fn insert(&self, kind: EntityKind, key: &str, record: Value) -> Result<()>;
}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for std::sync::Arc<T> {
    async fn get(&self, kind: EntityKind, key: &str) -> Result<Option<Value>> {
        self.as_ref().get(kind, key).await
    }

    async fn insert(&self, kind: EntityKind, key: &str, record: Value) -> Result<()> {
        self.as_ref().insert(kind, key, record).await
    }
}

/// typed convenience layer over the raw key-value contract
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    async fn get_fundraiser(&self, id: &str) -> Result<Fundraiser> {
        let record = self
            .get(EntityKind::Fundraiser, id)
            .await?
            .ok_or_else(|| DonationError::FundraiserNotFound { id: id.to_string() })?;
        decode(record)
    }

    async fn insert_fundraiser(&self, fundraiser: &Fundraiser) -> Result<()> {
        self.insert(EntityKind::Fundraiser, &fundraiser.id, encode(fundraiser)?)
            .await
    }

    async fn insert_donation(&self, donation: &Donation) -> Result<()> {
        self.insert(EntityKind::Donation, &donation.id, encode(donation)?)
            .await
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<()> {
        self.insert(EntityKind::Payment, &payment.id, encode(payment)?)
            .await
    }
}

impl<T: RecordStore + ?Sized> RecordStoreExt for T {}

fn encode<T: Serialize>(record: &T) -> Result<Value> {
    serde_json::to_value(record).map_err(|e| DonationError::MalformedRecord {
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(record: Value) -> Result<T> {
    serde_json::from_value(record).map_err(|e| DonationError::MalformedRecord {
        message: e.to_string(),
    })
}

/// in-memory record store for tests and embedding
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: Mutex<HashMap<(EntityKind, String), Value>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// number of stored records of a kind
    pub async fn count(&self, kind: EntityKind) -> usize {
        self.records
            .lock()
            .await
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, kind: EntityKind, key: &str) -> Result<Option<Value>> {
        let records = self.records.lock().await;
        Ok(records.get(&(kind, key.to_string())).cloned())
    }

    async fn insert(&self, kind: EntityKind, key: &str, record: Value) -> Result<()> {
        let mut records = self.records.lock().await;
        match records.entry((kind, key.to_string())) {
            Entry::Occupied(_) => Err(DonationError::DuplicateRecord {
                kind,
                key: key.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            }
        }
    }
}
