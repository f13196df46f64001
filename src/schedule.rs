use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::errors::Result;
use crate::time::{advance_period, start_of_day_epoch};
use crate::types::{DonationRequest, Fundraiser};

/// one scheduled charge: when, and how much of it is donation vs contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleEntry {
    /// charge time, epoch seconds
    pub at: i64,
    pub donation_amount: Amount,
    pub contribution_amount: Amount,
}

impl PaymentScheduleEntry {
    /// total charged for this entry
    pub fn total(&self) -> Amount {
        self.donation_amount + self.contribution_amount
    }
}

/// the immediate charge plus all future charges for a donation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub now: PaymentScheduleEntry,
    /// strictly increasing charge times, all before the fundraiser closes;
    /// the contribution is charged once, so these carry none
    pub future: Vec<PaymentScheduleEntry>,
}

impl PaymentSchedule {
    /// amount charged at donation creation
    pub fn charge_now_amount(&self) -> Amount {
        self.now.total()
    }

    /// donation total across the immediate and all future charges
    pub fn total_donation_amount(&self) -> Amount {
        self.future
            .iter()
            .map(|entry| entry.donation_amount)
            .fold(self.now.donation_amount, |acc, x| acc + x)
    }
}

/// compute the payment schedule for a donation request
///
/// Pure given a fixed time source: the `now` entry mirrors the request's
/// amounts at the current instant; for recurring donations, future entries
/// start from the current utc day truncated to midnight, advanced one period
/// at a time, and stop strictly before the fundraiser's close.
pub fn compute_payment_schedule(
    request: &DonationRequest,
    fundraiser: &Fundraiser,
    time_provider: &SafeTimeProvider,
) -> Result<PaymentSchedule> {
    let now = time_provider.now();

    let mut future = Vec::new();
    if let Some(frequency) = request.recurrence_frequency {
        let mut date = advance_period(now.date_naive(), frequency)?;
        loop {
            let at = start_of_day_epoch(date);
            if at >= fundraiser.active_to {
                break;
            }
            future.push(PaymentScheduleEntry {
                at,
                donation_amount: request.donation_amount,
                contribution_amount: Amount::ZERO,
            });
            date = advance_period(date, frequency)?;
        }
    }

    Ok(PaymentSchedule {
        now: PaymentScheduleEntry {
            at: now.timestamp(),
            donation_amount: request.donation_amount,
            contribution_amount: request.contribution_amount,
        },
        future,
    })
}
