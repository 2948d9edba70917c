//! Screen routes.

use std::fmt;
use std::str::FromStr;

use shelf_commerce::ProductId;
use thiserror::Error;

/// The storefront's screens and their parameters.
///
/// | route | path |
/// |---|---|
/// | `Home` | `/` |
/// | `Favourite` | `/favourite` |
/// | `Detail { id }` | `/detail/<id>` |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    /// Catalog listing.
    Home,
    Favourite,
    Detail { id: ProductId },
}

/// A path that names no screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("unknown route: {0}")]
    Unknown(String),

    #[error("invalid product id in route: {0}")]
    InvalidId(String),
}

impl Route {
    /// Parse a path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Result<Self, RouteError> {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "" => Ok(Self::Home),
            "/favourite" => Ok(Self::Favourite),
            _ => match trimmed.strip_prefix("/detail/") {
                Some(raw) => ProductId::parse(raw)
                    .map(|id| Self::Detail { id })
                    .map_err(|e| RouteError::InvalidId(e.to_string())),
                None => Err(RouteError::Unknown(path.to_string())),
            },
        }
    }

    /// Screen name shown in tab bars and logs.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Favourite => "Favourite",
            Self::Detail { .. } => "Detail",
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Favourite => write!(f, "/favourite"),
            Self::Detail { id } => write!(f, "/detail/{}", id),
        }
    }
}
