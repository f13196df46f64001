use serde::{Deserialize, Serialize};

use crate::amount::Amount;

/// donation core configuration
///
/// Passed explicitly to the service rather than read from ambient environment
/// state, so every recognized option is visible at the call site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationConfig {
    /// floor for any single card charge; below this, processor fees are
    /// disproportionate to the donation
    pub minimum_charge_amount: Amount,
    /// suffix the processor appends to the card statement line
    pub statement_descriptor_suffix: Option<String>,
    /// charity recorded on donations created through the public flow;
    /// donations to other charities are entered manually by admins
    pub default_charity: String,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            minimum_charge_amount: Amount::from_minor(100),
            statement_descriptor_suffix: None,
            default_charity: "AMF".to_string(),
        }
    }
}
