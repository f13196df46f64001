use crate::config::DonationConfig;
use crate::errors::{DonationError, Result};
use crate::schedule::PaymentSchedule;
use crate::types::{DonationRequest, Fundraiser};

/// business-rule gate for a donation request
///
/// Checks run in a fixed order and fail fast on the first violation. Every
/// failure is a client error; nothing here touches the gateway or store.
pub fn validate_donation(
    fundraiser: &Fundraiser,
    request: &DonationRequest,
    schedule: &PaymentSchedule,
    now: i64,
    config: &DonationConfig,
) -> Result<()> {
    if fundraiser.active_from > now {
        return Err(DonationError::FundraiserNotStarted);
    }
    if fundraiser.active_to < now {
        return Err(DonationError::FundraiserEnded);
    }
    if fundraiser.paused {
        return Err(DonationError::FundraiserPaused);
    }

    if request.gift_aid {
        if is_missing(&request.address_line_1) {
            return Err(DonationError::GiftAidMissingAddressLine1);
        }
        if is_missing(&request.address_postcode) {
            return Err(DonationError::GiftAidMissingAddressPostcode);
        }
        if is_missing(&request.address_country) {
            return Err(DonationError::GiftAidMissingAddressCountry);
        }
    }

    let floor = config.minimum_charge_amount;
    if schedule.now.total() < floor {
        return Err(DonationError::DonationBelowMinimumCharge { minimum: floor });
    }
    if schedule.future.iter().any(|entry| entry.total() < floor) {
        return Err(DonationError::FuturePaymentBelowMinimumCharge { minimum: floor });
    }

    if let Some(minimum) = fundraiser.minimum_donation_amount {
        if schedule.total_donation_amount() < minimum {
            return Err(DonationError::DonationBelowFundraiserMinimum { minimum });
        }
    }

    Ok(())
}

fn is_missing(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::{Amount, Currency};
    use crate::schedule::PaymentScheduleEntry;
    use crate::types::RecurrenceFrequency;

    fn fundraiser() -> Fundraiser {
        Fundraiser::new("f1".to_string(), 1000, 2_000_000, false, None, Currency::Gbp).unwrap()
    }

    fn request() -> DonationRequest {
        DonationRequest {
            donation_amount: Amount::from_minor(500),
            contribution_amount: Amount::ZERO,
            recurrence_frequency: None,
            gift_aid: false,
            donor_name: "Grace Hopper".to_string(),
            donor_email: "grace@example.com".to_string(),
            email_consent_informational: false,
            email_consent_marketing: false,
            address_line_1: None,
            address_line_2: None,
            address_line_3: None,
            address_postcode: None,
            address_country: None,
            comment: None,
            overall_public: true,
            name_public: true,
            donation_amount_public: true,
        }
    }

    fn schedule(donation: i64, contribution: i64, future: Vec<PaymentScheduleEntry>) -> PaymentSchedule {
        PaymentSchedule {
            now: PaymentScheduleEntry {
                at: 1500,
                donation_amount: Amount::from_minor(donation),
                contribution_amount: Amount::from_minor(contribution),
            },
            future,
        }
    }

    fn future_entry(at: i64, donation: i64) -> PaymentScheduleEntry {
        PaymentScheduleEntry {
            at,
            donation_amount: Amount::from_minor(donation),
            contribution_amount: Amount::ZERO,
        }
    }

    #[test]
    fn test_accepts_valid_one_off() {
        let result = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_before_window() {
        let err = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(500, 0, vec![]),
            999,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::FundraiserNotStarted));
    }

    #[test]
    fn test_rejects_after_window() {
        let err = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(500, 0, vec![]),
            2_000_001,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::FundraiserEnded));
    }

    #[test]
    fn test_window_bounds_are_accepted() {
        let config = DonationConfig::default();
        assert!(validate_donation(&fundraiser(), &request(), &schedule(500, 0, vec![]), 1000, &config).is_ok());
        assert!(validate_donation(&fundraiser(), &request(), &schedule(500, 0, vec![]), 2_000_000, &config).is_ok());
    }

    #[test]
    fn test_window_check_precedes_pause_check() {
        let mut paused = fundraiser();
        paused.paused = true;

        let err = validate_donation(
            &paused,
            &request(),
            &schedule(500, 0, vec![]),
            999,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::FundraiserNotStarted));
    }

    #[test]
    fn test_rejects_paused() {
        let mut paused = fundraiser();
        paused.paused = true;

        let err = validate_donation(
            &paused,
            &request(),
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::FundraiserPaused));
    }

    #[test]
    fn test_gift_aid_requires_address_fields_in_order() {
        let mut req = request();
        req.gift_aid = true;

        let err = validate_donation(
            &fundraiser(),
            &req,
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::GiftAidMissingAddressLine1));

        req.address_line_1 = Some("1 Analytical Row".to_string());
        let err = validate_donation(
            &fundraiser(),
            &req,
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Gift-aided donation must provide address postcode"
        );

        req.address_postcode = Some("AB1 2CD".to_string());
        let err = validate_donation(
            &fundraiser(),
            &req,
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::GiftAidMissingAddressCountry));
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut req = request();
        req.gift_aid = true;
        req.address_line_1 = Some(String::new());

        let err = validate_donation(
            &fundraiser(),
            &req,
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::GiftAidMissingAddressLine1));
    }

    #[test]
    fn test_rejects_now_entry_below_charge_floor() {
        let err = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(50, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DonationError::DonationBelowMinimumCharge { .. }));
    }

    #[test]
    fn test_contribution_counts_toward_charge_floor() {
        let result = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(50, 50, vec![]),
            1500,
            &DonationConfig::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rejects_future_entry_below_charge_floor() {
        let err = validate_donation(
            &fundraiser(),
            &request(),
            &schedule(500, 0, vec![future_entry(604_800, 50)]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DonationError::FuturePaymentBelowMinimumCharge { .. }
        ));
    }

    #[test]
    fn test_fundraiser_minimum_counts_recurring_total() {
        let mut f = fundraiser();
        f.minimum_donation_amount = Some(Amount::from_minor(1000));

        // one-off 500 is short of the minimum
        let err = validate_donation(
            &f,
            &request(),
            &schedule(500, 0, vec![]),
            1500,
            &DonationConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Donation amount must be greater than £10.00");

        // the same 500 recurring once clears it
        let mut req = request();
        req.recurrence_frequency = Some(RecurrenceFrequency::Weekly);
        let result = validate_donation(
            &f,
            &req,
            &schedule(500, 0, vec![future_entry(604_800, 500)]),
            1500,
            &DonationConfig::default(),
        );
        assert!(result.is_ok());
    }
}
