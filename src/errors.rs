use thiserror::Error;

use crate::amount::Amount;
use crate::store::EntityKind;

#[derive(Error, Debug)]
pub enum DonationError {
    #[error("This fundraiser has not started and is not taking donations yet")]
    FundraiserNotStarted,

    #[error("This fundraiser has ended and is no longer taking donations")]
    FundraiserEnded,

    #[error("This fundraiser has temporarily paused taking donations")]
    FundraiserPaused,

    #[error("Gift-aided donation must provide address line 1")]
    GiftAidMissingAddressLine1,

    #[error("Gift-aided donation must provide address postcode")]
    GiftAidMissingAddressPostcode,

    #[error("Gift-aided donation must provide address country")]
    GiftAidMissingAddressCountry,

    #[error("Donation amount must be greater than {minimum} to avoid excessive card transaction fees")]
    DonationBelowMinimumCharge {
        minimum: Amount,
    },

    #[error("Future payments must be greater than {minimum} to avoid excessive card transaction fees")]
    FuturePaymentBelowMinimumCharge {
        minimum: Amount,
    },

    #[error("Donation amount must be greater than {minimum}")]
    DonationBelowFundraiserMinimum {
        minimum: Amount,
    },

    #[error("fundraiser not found: {id}")]
    FundraiserNotFound {
        id: String,
    },

    #[error("payment gateway returned no client secret")]
    MissingClientSecret,

    #[error("payment gateway error: {message}")]
    GatewayUnavailable {
        message: String,
    },

    #[error("record store error: {message}")]
    StoreUnavailable {
        message: String,
    },

    #[error("record already exists: {kind} {key}")]
    DuplicateRecord {
        kind: EntityKind,
        key: String,
    },

    #[error("malformed record: {message}")]
    MalformedRecord {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

/// coarse classification for mapping errors onto transport responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// caller's fault; the message is specific and safe to show to the donor
    Client,
    /// referenced entity does not exist
    NotFound,
    /// integration or durability fault; surface generically, log the cause
    Internal,
}

impl DonationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DonationError::FundraiserNotStarted
            | DonationError::FundraiserEnded
            | DonationError::FundraiserPaused
            | DonationError::GiftAidMissingAddressLine1
            | DonationError::GiftAidMissingAddressPostcode
            | DonationError::GiftAidMissingAddressCountry
            | DonationError::DonationBelowMinimumCharge { .. }
            | DonationError::FuturePaymentBelowMinimumCharge { .. }
            | DonationError::DonationBelowFundraiserMinimum { .. } => ErrorKind::Client,

            DonationError::FundraiserNotFound { .. } => ErrorKind::NotFound,

            DonationError::MissingClientSecret
            | DonationError::GatewayUnavailable { .. }
            | DonationError::StoreUnavailable { .. }
            | DonationError::DuplicateRecord { .. }
            | DonationError::MalformedRecord { .. }
            | DonationError::InvalidDate { .. }
            | DonationError::InvalidConfiguration { .. } => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, DonationError>;
