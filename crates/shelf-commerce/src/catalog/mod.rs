//! Product catalog module.
//!
//! Contains the product record served by the remote catalog, its feedback
//! entries, the limited-time deal attached to it, and the favorite snapshot
//! mirrored into the device cache.

mod deal;
mod favorite;
mod product;

pub use deal::Deal;
pub use favorite::{favorite_key, FavoriteRecord, FAVORITE_KEY_PREFIX};
pub use product::{Feedback, Product};
