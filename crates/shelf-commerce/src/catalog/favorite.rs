//! Favorite snapshots stored in the device cache.

use crate::catalog::deal;
use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// Key prefix shared by every favorite entry in the device store.
pub const FAVORITE_KEY_PREFIX: &str = "product_";

/// Device store key for a product's favorite snapshot (`product_<id>`).
pub fn favorite_key(id: &ProductId) -> String {
    format!("{}{}", FAVORITE_KEY_PREFIX, id)
}

/// Denormalized snapshot of a favorited product.
///
/// Written when a product is favorited and never refreshed afterwards, so it
/// can drift from the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteRecord {
    pub id: ProductId,
    /// Stored as `1`; older snapshots stored `true`.
    #[serde(with = "status_marker", default = "marked")]
    pub status: bool,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "artName")]
    pub name: String,
    pub price: f64,
    #[serde(
        rename = "limitedTimeDeal",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub limited_time_deal: Option<f64>,
}

fn marked() -> bool {
    true
}

impl FavoriteRecord {
    /// Snapshot a product at the moment it is favorited.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            status: true,
            image: product.image.clone(),
            name: product.name.clone(),
            price: product.price,
            limited_time_deal: product.limited_time_deal,
        }
    }

    /// Device store key for this record.
    pub fn storage_key(&self) -> String {
        favorite_key(&self.id)
    }

    /// Encode as the JSON string kept in the device store.
    pub fn to_json(&self) -> Result<String, CommerceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a device store value.
    pub fn from_json(value: &str) -> Result<Self, CommerceError> {
        Ok(serde_json::from_str(value)?)
    }

    /// Discount as a whole percentage, 0 without a deal.
    pub fn discount_percent(&self) -> u32 {
        deal::discount_percent(self.limited_time_deal)
    }

    /// Price after the snapshot's deal, or its list price.
    pub fn discounted_price(&self, currency: Currency) -> Money {
        deal::discounted_price(self.price, self.limited_time_deal, currency)
    }
}

impl From<&Product> for FavoriteRecord {
    fn from(product: &Product) -> Self {
        Self::from_product(product)
    }
}

mod status_marker {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*status))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Marker {
            Flag(bool),
            Number(f64),
        }

        Ok(match Marker::deserialize(deserializer)? {
            Marker::Flag(flag) => flag,
            Marker::Number(n) => n != 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_key() {
        assert_eq!(favorite_key(&ProductId::new("42")), "product_42");
    }

    #[test]
    fn test_record_json_uses_numeric_status() {
        let product = Product::new("42", "Abcart", 100.0).with_image("img.png");
        let record = FavoriteRecord::from_product(&product);
        let value: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        assert_eq!(value["id"], "42");
        assert_eq!(value["status"], 1);
        assert_eq!(value["artName"], "Abcart");
        assert_eq!(value["image"], "img.png");
        assert_eq!(value["price"], 100.0);
        assert!(value.get("limitedTimeDeal").is_none());
    }

    #[test]
    fn test_record_reads_boolean_status() {
        let record = FavoriteRecord::from_json(
            r#"{"id":"7","status":true,"image":"","artName":"Pen","price":2,"limitedTimeDeal":0.5}"#,
        )
        .unwrap();
        assert!(record.status);
        assert_eq!(record.discount_percent(), 50);
        assert_eq!(record.discounted_price(Currency::USD).display_amount(), "1.00");
    }

    #[test]
    fn test_record_rejects_garbage() {
        assert!(matches!(
            FavoriteRecord::from_json("not json"),
            Err(CommerceError::SerializationError(_))
        ));
    }
}
