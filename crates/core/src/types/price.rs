//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its currency.
///
/// Amounts are stored in the currency's standard unit (rubles, not kopecks)
/// using decimal arithmetic, so `199.50` stays exact.
///
/// Arithmetic on two prices assumes they share a currency; the left-hand
/// currency is kept. Mixing currencies is a programming error and trips a
/// debug assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from a whole number of major units (e.g. rubles).
    #[must_use]
    pub fn from_major(units: i64, currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::from(units),
            currency_code,
        }
    }

    /// Zero in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency_code,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Multiply by a quantity, e.g. a cart line's unit price by its count.
    #[must_use]
    pub fn mul_quantity(&self, quantity: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(quantity),
            currency_code: self.currency_code,
        }
    }

    /// Clamp negative amounts to zero.
    ///
    /// Totals never go below zero no matter how large a discount is.
    #[must_use]
    pub fn max_zero(&self) -> Self {
        if self.is_negative() {
            Self::zero(self.currency_code)
        } else {
            *self
        }
    }
}

impl core::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self {
            amount: self.amount + rhs.amount,
            currency_code: self.currency_code,
        }
    }
}

impl core::ops::Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self {
            amount: self.amount - rhs.amount,
            currency_code: self.currency_code,
        }
    }
}

impl core::ops::AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.currency_code {
            CurrencyCode::Rub => write!(f, "{:.2} ₽", self.amount),
            CurrencyCode::Usd | CurrencyCode::Eur => {
                write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
            }
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Russian ruble, the marketplace's home currency.
    #[default]
    Rub,
    Usd,
    Eur,
}

impl CurrencyCode {
    /// The currency symbol used for display.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Rub => "₽",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// The ISO 4217 alphabetic code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Rub => "RUB",
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rub(units: i64) -> Price {
        Price::from_major(units, CurrencyCode::Rub)
    }

    #[test]
    fn test_from_major() {
        let price = rub(200);
        assert_eq!(price.amount, Decimal::from(200));
        assert_eq!(price.currency_code, CurrencyCode::Rub);
    }

    #[test]
    fn test_zero() {
        let price = Price::zero(CurrencyCode::Rub);
        assert!(price.is_zero());
        assert!(!price.is_negative());
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(rub(100) + rub(50), rub(150));
        assert_eq!(rub(100) - rub(30), rub(70));
        assert_eq!(rub(100).mul_quantity(3), rub(300));
    }

    #[test]
    fn test_add_assign() {
        let mut total = rub(100);
        total += rub(200);
        assert_eq!(total, rub(300));
    }

    #[test]
    fn test_is_negative() {
        assert!((rub(10) - rub(25)).is_negative());
        assert!(!rub(10).is_negative());
        assert!(!(rub(10) - rub(10)).is_negative());
    }

    #[test]
    fn test_max_zero_clamps_negative() {
        let discounted = rub(100) - rub(250);
        assert_eq!(discounted.max_zero(), Price::zero(CurrencyCode::Rub));

        assert_eq!(rub(100).max_zero(), rub(100));
    }

    #[test]
    fn test_display_ruble_suffix() {
        assert_eq!(rub(200).to_string(), "200.00 ₽");

        let fractional = Price::new(Decimal::new(19950, 2), CurrencyCode::Rub);
        assert_eq!(fractional.to_string(), "199.50 ₽");
    }

    #[test]
    fn test_display_symbol_prefix() {
        let usd = Price::from_major(5, CurrencyCode::Usd);
        assert_eq!(usd.to_string(), "$5.00");
    }

    #[test]
    fn test_serde_camel_case_with_string_amount() {
        let price = rub(200);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":"200","currencyCode":"RUB"}"#);

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
