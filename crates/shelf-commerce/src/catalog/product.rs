//! Product and feedback types.

use crate::catalog::deal::{self, Deal};
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the remote catalog.
///
/// Field names follow the catalog's JSON (`artName`, `limitedTimeDeal`,
/// `feedbacks`); unknown keys are ignored so the catalog can grow fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier assigned by the catalog.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "artName")]
    pub name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Unit price in the display currency.
    pub price: f64,
    /// Brand used by the brand filter.
    #[serde(default)]
    pub brand: String,
    /// Image URI.
    #[serde(default)]
    pub image: String,
    /// Raw limited-time deal attribute; see [`Deal`] for how it is read.
    #[serde(
        rename = "limitedTimeDeal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub limited_time_deal: Option<f64>,
    /// Server-side favorite flag.
    #[serde(default)]
    pub status: bool,
    /// Customer feedback, in catalog order.
    #[serde(default)]
    pub feedbacks: Vec<Feedback>,
}

impl Product {
    /// Create a product with the required fields; the rest default to empty.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            brand: String::new(),
            image: String::new(),
            limited_time_deal: None,
            status: false,
            feedbacks: Vec::new(),
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the image URI.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Set the raw limited-time deal value.
    pub fn with_limited_time_deal(mut self, value: f64) -> Self {
        self.limited_time_deal = Some(value);
        self
    }

    /// Set the favorite flag.
    pub fn with_status(mut self, status: bool) -> Self {
        self.status = status;
        self
    }

    /// Append a feedback entry.
    pub fn with_feedback(mut self, feedback: Feedback) -> Self {
        self.feedbacks.push(feedback);
        self
    }

    /// Whether the catalog has this product flagged as a favorite.
    pub fn is_favorite(&self) -> bool {
        self.status
    }

    /// The valid deal on this product, if any.
    pub fn deal(&self) -> Option<Deal> {
        Deal::from_limited_time_deal(self.limited_time_deal)
    }

    /// Whether the product currently has a valid deal.
    pub fn has_discount(&self) -> bool {
        self.discount_percent() > 0
    }

    /// Discount as a whole percentage, 0 without a deal.
    pub fn discount_percent(&self) -> u32 {
        deal::discount_percent(self.limited_time_deal)
    }

    /// List price.
    pub fn list_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }

    /// Price after the deal, or the list price without one.
    pub fn discounted_price(&self, currency: Currency) -> Money {
        deal::discounted_price(self.price, self.limited_time_deal, currency)
    }

    /// Case-insensitive substring match against the display name.
    ///
    /// `needle` must already be lowercase.
    pub fn name_contains(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }

    /// Mean feedback rating, `None` without feedback.
    pub fn average_rating(&self) -> Option<f64> {
        if self.feedbacks.is_empty() {
            return None;
        }
        let total: f64 = self.feedbacks.iter().map(|f| f.rating).sum();
        Some(total / self.feedbacks.len() as f64)
    }
}

/// A customer feedback entry on a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    /// Author name.
    #[serde(default)]
    pub author: String,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
    /// Rating from 0 to 5.
    #[serde(default)]
    pub rating: f64,
}

impl Feedback {
    pub fn new(author: impl Into<String>, comment: impl Into<String>, rating: f64) -> Self {
        Self {
            author: author.into(),
            comment: comment.into(),
            rating,
        }
    }

    /// Rating clamped to the 0..=5 scale.
    pub fn clamped_rating(&self) -> f64 {
        if self.rating.is_nan() {
            return 0.0;
        }
        self.rating.clamp(0.0, 5.0)
    }

    /// Rating label, e.g. `⭐4/5` or `⭐4.5/5`.
    pub fn rating_label(&self) -> String {
        let rating = self.clamped_rating();
        if rating.fract() == 0.0 {
            format!("\u{2b50}{}/5", rating as u32)
        } else {
            format!("\u{2b50}{:.1}/5", rating)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_ITEM: &str = r#"{
        "id": "42",
        "artName": "Abcart Watercolor Set",
        "description": "24 pans",
        "price": 100,
        "brand": "Abcart",
        "image": "https://example.com/42.png",
        "limitedTimeDeal": 0.2,
        "status": true,
        "glassSurface": false,
        "feedbacks": [
            {"author": "Lan", "comment": "Great colors", "rating": 5},
            {"author": "Minh", "comment": "Ok", "rating": 3}
        ]
    }"#;

    #[test]
    fn test_product_from_catalog_json() {
        let product: Product = serde_json::from_str(CATALOG_ITEM).unwrap();
        assert_eq!(product.id.as_str(), "42");
        assert_eq!(product.name, "Abcart Watercolor Set");
        assert_eq!(product.brand, "Abcart");
        assert!(product.is_favorite());
        assert_eq!(product.feedbacks.len(), 2);
        assert_eq!(product.average_rating(), Some(4.0));
    }

    #[test]
    fn test_product_with_missing_optional_fields() {
        let product: Product =
            serde_json::from_str(r#"{"id": "1", "artName": "Brush", "price": 3.5, "limitedTimeDeal": null}"#)
                .unwrap();
        assert_eq!(product.description, "");
        assert!(!product.is_favorite());
        assert!(product.deal().is_none());
        assert!(product.feedbacks.is_empty());
        assert_eq!(product.average_rating(), None);
    }

    #[test]
    fn test_product_discount() {
        let product = Product::new("42", "Abcart", 100.0).with_limited_time_deal(0.2);
        assert!(product.has_discount());
        assert_eq!(product.discount_percent(), 20);
        assert_eq!(product.discounted_price(Currency::USD).display_amount(), "80.00");
        assert_eq!(product.list_price(Currency::USD).display_amount(), "100.00");
    }

    #[test]
    fn test_product_absolute_deal_value_is_ignored() {
        // A deal of 80 on a price of 100 is not a fraction, so it is no deal.
        let product = Product::new("1", "Easel", 100.0).with_limited_time_deal(80.0);
        assert!(!product.has_discount());
        assert_eq!(product.discounted_price(Currency::USD).display_amount(), "100.00");
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let product = Product::new("1", "Abcart", 1.0);
        assert!(product.name_contains("abc"));
        assert!(!product.name_contains("xyz"));
    }

    #[test]
    fn test_feedback_rating_label() {
        assert_eq!(Feedback::new("a", "b", 4.0).rating_label(), "\u{2b50}4/5");
        assert_eq!(Feedback::new("a", "b", 4.5).rating_label(), "\u{2b50}4.5/5");
        assert_eq!(Feedback::new("a", "b", 9.0).rating_label(), "\u{2b50}5/5");
    }
}
