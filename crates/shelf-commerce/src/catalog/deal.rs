//! Limited-time deals.
//!
//! A product's `limitedTimeDeal` is read as a fractional discount: `0.2`
//! means 20% off. Only values strictly between 0 and 1 form a deal; anything
//! else (absent, zero, negative, one or more, NaN) means the product is sold
//! at its list price.

use crate::money::{Currency, Money};

/// A valid fractional discount in the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deal {
    fraction: f64,
}

impl Deal {
    /// Build a deal from a raw fraction, if it is strictly between 0 and 1.
    pub fn from_fraction(fraction: f64) -> Option<Self> {
        (fraction > 0.0 && fraction < 1.0).then_some(Self { fraction })
    }

    /// Build a deal from the optional `limitedTimeDeal` attribute.
    pub fn from_limited_time_deal(value: Option<f64>) -> Option<Self> {
        value.and_then(Self::from_fraction)
    }

    /// The discount fraction.
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Discount as a whole percentage (0.2 -> 20).
    pub fn percent(&self) -> u32 {
        (self.fraction * 100.0).round() as u32
    }

    /// Price after the discount, rounded to two places.
    pub fn apply(&self, price: f64, currency: Currency) -> Money {
        Money::from_decimal(price * (1.0 - self.fraction), currency)
    }
}

/// Discount percentage for an optional deal value, 0 when there is no deal.
pub(crate) fn discount_percent(limited_time_deal: Option<f64>) -> u32 {
    Deal::from_limited_time_deal(limited_time_deal)
        .map(|deal| deal.percent())
        .unwrap_or(0)
}

/// Price after an optional deal, or the rounded list price when there is none.
pub(crate) fn discounted_price(
    price: f64,
    limited_time_deal: Option<f64>,
    currency: Currency,
) -> Money {
    match Deal::from_limited_time_deal(limited_time_deal) {
        Some(deal) => deal.apply(price, currency),
        None => Money::from_decimal(price, currency),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twenty_percent_off_one_hundred() {
        assert_eq!(discount_percent(Some(0.2)), 20);
        assert_eq!(
            discounted_price(100.0, Some(0.2), Currency::USD).display_amount(),
            "80.00"
        );
    }

    #[test]
    fn test_out_of_range_values_are_not_deals() {
        for value in [None, Some(0.0), Some(-0.3), Some(1.0), Some(1.5), Some(f64::NAN)] {
            assert!(Deal::from_limited_time_deal(value).is_none(), "{:?}", value);
            assert_eq!(discount_percent(value), 0);
            assert_eq!(
                discounted_price(12.346, value, Currency::USD).display_amount(),
                "12.35"
            );
        }
    }

    #[test]
    fn test_discounted_price_rounds_to_cents() {
        // 19.99 * 0.85 = 16.9915
        assert_eq!(
            discounted_price(19.99, Some(0.15), Currency::USD).amount_minor,
            1699
        );
        // 10 * (1 - 1/3) = 6.666..
        assert_eq!(
            discounted_price(10.0, Some(1.0 / 3.0), Currency::USD).amount_minor,
            667
        );
    }

    #[test]
    fn test_percent_rounds_to_whole_number() {
        assert_eq!(Deal::from_fraction(0.333).unwrap().percent(), 33);
        assert_eq!(Deal::from_fraction(0.005).unwrap().percent(), 1);
        assert_eq!(Deal::from_fraction(0.999).unwrap().percent(), 100);
    }

    #[test]
    fn test_rounding_ignores_display_currency() {
        for currency in [
            Currency::USD,
            Currency::EUR,
            Currency::GBP,
            Currency::JPY,
            Currency::VND,
        ] {
            assert_eq!(
                discounted_price(12.99, Some(0.2), currency).display_amount(),
                "10.39",
                "{}",
                currency
            );
            assert_eq!(
                discounted_price(12.346, None, currency).display_amount(),
                "12.35"
            );
        }
    }

    #[test]
    fn test_zero_price_stays_zero() {
        assert!(discounted_price(0.0, Some(0.5), Currency::USD).is_zero());
    }
}
