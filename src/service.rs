use std::collections::HashMap;

use futures::future::join_all;
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::config::DonationConfig;
use crate::errors::{DonationError, Result};
use crate::gateway::{PaymentIntentGateway, PaymentIntentRequest};
use crate::ids::IdGenerator;
use crate::schedule::compute_payment_schedule;
use crate::store::{RecordStore, RecordStoreExt};
use crate::types::{Donation, DonationRequest, Payment, PaymentMethod, PaymentStatus};
use crate::validation::validate_donation;

/// one future charge as shown back to the donor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FutureCharge {
    pub at: i64,
    pub amount: Amount,
}

/// response to a successful donation creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationReceipt {
    /// secret the client uses to complete the card charge
    pub client_secret: String,
    /// total charged now
    pub amount: Amount,
    pub future_payments: Vec<FutureCharge>,
}

/// donation creation orchestrator
///
/// Stateless between calls; collaborators are injected so the service can be
/// exercised against in-memory fakes.
pub struct DonationService<G, S, I> {
    gateway: G,
    store: S,
    ids: I,
    config: DonationConfig,
}

impl<G, S, I> DonationService<G, S, I>
where
    G: PaymentIntentGateway,
    S: RecordStore,
    I: IdGenerator,
{
    pub fn new(gateway: G, store: S, ids: I, config: DonationConfig) -> Self {
        Self {
            gateway,
            store,
            ids,
            config,
        }
    }

    /// create a donation against a fundraiser
    ///
    /// Computes and gates the payment schedule, raises a payment intent, then
    /// records the donation followed by one payment row per schedule entry.
    /// The ordering contract: the intent exists before anything is persisted,
    /// and the donation row is committed before any payment row is written. A
    /// donation with no payments is a recoverable partial state; a payment
    /// with no donation is not.
    pub async fn create_donation(
        &self,
        fundraiser_id: &str,
        request: &DonationRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<DonationReceipt> {
        let now = time_provider.now().timestamp();
        let fundraiser = self.store.get_fundraiser(fundraiser_id).await?;

        let schedule = compute_payment_schedule(request, &fundraiser, time_provider)?;
        validate_donation(&fundraiser, request, &schedule, now, &self.config)?;

        // ids are generated up front so they can travel in the intent
        // metadata for later reconciliation
        let donation_id = self.ids.new_id();
        let payment_id = self.ids.new_id();

        let intent = self
            .gateway
            .create_intent(PaymentIntentRequest {
                amount: schedule.charge_now_amount(),
                currency: fundraiser.currency,
                statement_descriptor_suffix: self.config.statement_descriptor_suffix.clone(),
                metadata: HashMap::from([
                    ("fundraiserId".to_string(), fundraiser_id.to_string()),
                    ("donationId".to_string(), donation_id.clone()),
                    ("paymentId".to_string(), payment_id.clone()),
                ]),
                off_session_setup: request.recurrence_frequency.is_some(),
            })
            .await?;
        let client_secret = intent.client_secret.ok_or(DonationError::MissingClientSecret)?;

        let donation = Donation::from_request(
            donation_id.clone(),
            fundraiser_id.to_string(),
            request,
            &self.config.default_charity,
            now,
        );
        self.store.insert_donation(&donation).await?;

        let mut payments = vec![Payment {
            id: payment_id,
            donation_id: donation_id.clone(),
            fundraiser_id: fundraiser_id.to_string(),
            at: now,
            donation_amount: schedule.now.donation_amount,
            contribution_amount: schedule.now.contribution_amount,
            match_funding_amount: None,
            method: PaymentMethod::Card,
            reference: Some(intent.id),
            status: PaymentStatus::Pending,
        }];
        for entry in &schedule.future {
            payments.push(Payment {
                id: self.ids.new_id(),
                donation_id: donation_id.clone(),
                fundraiser_id: fundraiser_id.to_string(),
                at: entry.at,
                donation_amount: entry.donation_amount,
                contribution_amount: entry.contribution_amount,
                match_funding_amount: None,
                method: PaymentMethod::Card,
                reference: None,
                status: PaymentStatus::Pending,
            });
        }

        // payment rows are independent of each other: insert them
        // concurrently and only report once every insert has settled. A
        // failed sibling is not compensated; the committed donation row
        // stays in place for operator recovery.
        let results = join_all(
            payments
                .iter()
                .map(|payment| self.store.insert_payment(payment)),
        )
        .await;
        for result in results {
            if let Err(error) = result {
                tracing::error!(
                    donation_id = %donation_id,
                    fundraiser_id,
                    "payment insert failed after donation commit: {error}"
                );
                return Err(error);
            }
        }

        tracing::info!(
            donation_id = %donation_id,
            fundraiser_id,
            amount = %schedule.charge_now_amount(),
            future_payments = schedule.future.len(),
            "donation created"
        );

        Ok(DonationReceipt {
            client_secret,
            amount: schedule.charge_now_amount(),
            future_payments: schedule
                .future
                .iter()
                .map(|entry| FutureCharge {
                    at: entry.at,
                    amount: entry.total(),
                })
                .collect(),
        })
    }
}
