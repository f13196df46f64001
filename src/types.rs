use serde::{Deserialize, Serialize};

use crate::amount::{Amount, Currency};
use crate::errors::{DonationError, Result};

/// unique identifier for a fundraiser
pub type FundraiserId = String;

/// unique identifier for a donation
pub type DonationId = String;

/// unique identifier for a payment
pub type PaymentId = String;

/// how often a recurring donation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecurrenceFrequency {
    Weekly,
    Monthly,
}

/// payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// created, awaiting processor confirmation
    Pending,
    /// confirmed by the processor
    Paid,
    /// cancelled before collection
    Cancelled,
}

/// how a payment is collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
    DirectToCharity,
}

/// a time-bounded donation campaign; read-only to the donation core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fundraiser {
    pub id: FundraiserId,
    /// start of the active window, epoch seconds inclusive
    pub active_from: i64,
    /// end of the active window, epoch seconds exclusive
    pub active_to: i64,
    pub paused: bool,
    pub minimum_donation_amount: Option<Amount>,
    pub currency: Currency,
}

impl Fundraiser {
    /// construct a fundraiser, enforcing the active window invariant
    pub fn new(
        id: FundraiserId,
        active_from: i64,
        active_to: i64,
        paused: bool,
        minimum_donation_amount: Option<Amount>,
        currency: Currency,
    ) -> Result<Self> {
        if active_from > active_to {
            return Err(DonationError::InvalidConfiguration {
                message: format!("activeFrom {active_from} is after activeTo {active_to}"),
            });
        }

        Ok(Self {
            id,
            active_from,
            active_to,
            paused,
            minimum_donation_amount,
            currency,
        })
    }
}

/// untrusted donation request from the public API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequest {
    pub donation_amount: Amount,
    pub contribution_amount: Amount,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    pub gift_aid: bool,
    pub donor_name: String,
    pub donor_email: String,
    pub email_consent_informational: bool,
    pub email_consent_marketing: bool,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_postcode: Option<String>,
    pub address_country: Option<String>,
    pub comment: Option<String>,
    pub overall_public: bool,
    pub name_public: bool,
    pub donation_amount_public: bool,
}

/// a donor's overall commitment, persisted at creation time
///
/// Monetary fields are zero until the out-of-scope confirmation flow records
/// the processor's result; the recurring fields snapshot the request so later
/// charges are unaffected by request replays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: DonationId,
    pub fundraiser_id: FundraiserId,
    pub donor_name: String,
    pub donor_email: String,
    pub email_consent_informational: bool,
    pub email_consent_marketing: bool,
    pub created_at: i64,
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub address_line_3: Option<String>,
    pub address_postcode: Option<String>,
    pub address_country: Option<String>,
    pub gift_aid: bool,
    pub comment: Option<String>,
    pub donation_amount: Amount,
    pub match_funding_amount: Amount,
    pub contribution_amount: Amount,
    pub recurring_amount: Option<Amount>,
    pub recurrence_frequency: Option<RecurrenceFrequency>,
    /// filled in by the confirmation flow once the first recurring payment settles
    pub gateway_customer_id: Option<String>,
    pub gateway_payment_method_id: Option<String>,
    pub charity: String,
    pub overall_public: bool,
    pub name_public: bool,
    pub donation_amount_public: bool,
}

impl Donation {
    /// build the initial donation record for a validated request
    pub fn from_request(
        id: DonationId,
        fundraiser_id: FundraiserId,
        request: &DonationRequest,
        charity: &str,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            fundraiser_id,
            donor_name: request.donor_name.clone(),
            donor_email: request.donor_email.clone(),
            email_consent_informational: request.email_consent_informational,
            email_consent_marketing: request.email_consent_marketing,
            created_at,
            address_line_1: non_empty(&request.address_line_1),
            address_line_2: non_empty(&request.address_line_2),
            address_line_3: non_empty(&request.address_line_3),
            address_postcode: non_empty(&request.address_postcode),
            address_country: non_empty(&request.address_country),
            gift_aid: request.gift_aid,
            comment: non_empty(&request.comment),
            donation_amount: Amount::ZERO,
            match_funding_amount: Amount::ZERO,
            contribution_amount: Amount::ZERO,
            recurring_amount: request
                .recurrence_frequency
                .map(|_| request.donation_amount),
            recurrence_frequency: request.recurrence_frequency,
            gateway_customer_id: None,
            gateway_payment_method_id: None,
            charity: charity.to_string(),
            overall_public: request.overall_public,
            name_public: request.name_public,
            donation_amount_public: request.donation_amount_public,
        }
    }
}

/// one scheduled or executed charge belonging to a donation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub donation_id: DonationId,
    pub fundraiser_id: FundraiserId,
    /// scheduled charge time, epoch seconds
    pub at: i64,
    pub donation_amount: Amount,
    pub contribution_amount: Amount,
    /// none until the confirmation flow allocates match funding
    pub match_funding_amount: Option<Amount>,
    pub method: PaymentMethod,
    /// processor intent id; none for future-scheduled entries
    pub reference: Option<String>,
    pub status: PaymentStatus,
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DonationRequest {
        DonationRequest {
            donation_amount: Amount::from_minor(1500),
            contribution_amount: Amount::from_minor(100),
            recurrence_frequency: Some(RecurrenceFrequency::Weekly),
            gift_aid: false,
            donor_name: "Ada Lovelace".to_string(),
            donor_email: "ada@example.com".to_string(),
            email_consent_informational: true,
            email_consent_marketing: false,
            address_line_1: Some("1 Analytical Row".to_string()),
            address_line_2: Some(String::new()),
            address_line_3: None,
            address_postcode: Some("AB1 2CD".to_string()),
            address_country: Some("United Kingdom".to_string()),
            comment: None,
            overall_public: true,
            name_public: true,
            donation_amount_public: false,
        }
    }

    #[test]
    fn test_fundraiser_window_invariant() {
        let err = Fundraiser::new("f1".to_string(), 2000, 1000, false, None, Currency::Gbp);
        assert!(err.is_err());

        let ok = Fundraiser::new("f1".to_string(), 1000, 2000, false, None, Currency::Gbp);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_donation_created_with_zeroed_amounts() {
        let donation =
            Donation::from_request("d1".to_string(), "f1".to_string(), &request(), "AMF", 1234);

        assert_eq!(donation.donation_amount, Amount::ZERO);
        assert_eq!(donation.match_funding_amount, Amount::ZERO);
        assert_eq!(donation.contribution_amount, Amount::ZERO);
        assert_eq!(donation.created_at, 1234);
        assert_eq!(donation.charity, "AMF");
    }

    #[test]
    fn test_donation_snapshots_recurring_fields() {
        let donation =
            Donation::from_request("d1".to_string(), "f1".to_string(), &request(), "AMF", 0);

        assert_eq!(donation.recurring_amount, Some(Amount::from_minor(1500)));
        assert_eq!(donation.recurrence_frequency, Some(RecurrenceFrequency::Weekly));
        assert_eq!(donation.gateway_customer_id, None);
        assert_eq!(donation.gateway_payment_method_id, None);
    }

    #[test]
    fn test_empty_address_lines_normalized_to_none() {
        let donation =
            Donation::from_request("d1".to_string(), "f1".to_string(), &request(), "AMF", 0);

        assert_eq!(donation.address_line_1.as_deref(), Some("1 Analytical Row"));
        assert_eq!(donation.address_line_2, None);
        assert_eq!(donation.address_line_3, None);
    }

    #[test]
    fn test_record_serialization_uses_camel_case() {
        let fundraiser =
            Fundraiser::new("f1".to_string(), 0, 10, false, None, Currency::Gbp).unwrap();
        let value = serde_json::to_value(&fundraiser).unwrap();

        assert_eq!(value["activeFrom"], 0);
        assert_eq!(value["activeTo"], 10);
        assert_eq!(value["minimumDonationAmount"], serde_json::Value::Null);
        assert_eq!(value["currency"], "gbp");
    }

    #[test]
    fn test_recurrence_frequency_wire_format() {
        let json = serde_json::to_string(&RecurrenceFrequency::Weekly).unwrap();
        assert_eq!(json, "\"WEEKLY\"");

        let parsed: RecurrenceFrequency = serde_json::from_str("\"MONTHLY\"").unwrap();
        assert_eq!(parsed, RecurrenceFrequency::Monthly);
    }
}
