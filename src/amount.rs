use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// monetary amount in integer minor units (pence); never floating point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// create from minor units (pence)
    pub fn from_minor(amount: i64) -> Self {
        Amount(amount)
    }

    /// create from major units (pounds)
    pub fn from_major(amount: i64) -> Self {
        Amount(amount * 100)
    }

    /// get underlying minor units
    pub fn as_minor(&self) -> i64 {
        self.0
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl fmt::Display for Amount {
    /// formats as a sterling decimal amount, e.g. 1050 minor units as "£10.50"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "£{}", Decimal::new(self.0, 2))
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Amount) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, other: Amount) {
        self.0 -= other.0;
    }
}

/// supported settlement currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Gbp,
    Usd,
}

impl Currency {
    /// iso 4217 code as the payment processor expects it
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "gbp",
            Currency::Usd => "usd",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_major_units() {
        assert_eq!(Amount::from_major(10), Amount::from_minor(1000));
        assert_eq!(Amount::from_minor(50).as_minor(), 50);
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Amount::from_minor(1000).to_string(), "£10.00");
        assert_eq!(Amount::from_minor(1050).to_string(), "£10.50");
        assert_eq!(Amount::from_minor(5).to_string(), "£0.05");
    }

    #[test]
    fn test_arithmetic() {
        let mut total = Amount::from_minor(500);
        total += Amount::from_minor(100);
        assert_eq!(total, Amount::from_minor(600));
        assert_eq!(total - Amount::from_minor(600), Amount::ZERO);
    }

    #[test]
    fn test_currency_codes() {
        assert_eq!(Currency::Gbp.code(), "gbp");
        assert_eq!(Currency::Usd.to_string(), "usd");

        let json = serde_json::to_string(&Currency::Gbp).unwrap();
        assert_eq!(json, "\"gbp\"");
    }
}
