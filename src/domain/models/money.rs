use serde::{Serialize, Serializer};
use std::fmt;

/// Amount in minor units (cents). Rendered with exactly two decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, sqlx::Type)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Money {
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Money::from_cents(26700).to_string(), "267.00");
        assert_eq!(Money::from_cents(8905).to_string(), "89.05");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::from_cents(-150).to_string(), "-1.50");
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_value(Money::from_cents(14900)).unwrap();
        assert_eq!(json, serde_json::json!("149.00"));
    }

    #[test]
    fn test_float_view_matches_decimal_literal() {
        assert_eq!(Money::from_cents(8999).as_f64(), "89.99".parse::<f64>().unwrap());
        assert_eq!(Money::from_cents(8900).as_f64(), 89.0);
    }

    #[test]
    fn test_checked_mul_overflow() {
        assert_eq!(Money::from_cents(8900).checked_mul(3), Some(Money::from_cents(26700)));
        assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    }
}
