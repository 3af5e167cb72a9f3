//! Strongly-typed identifiers for domain entities
//!
//! Every table uses a database-generated `BIGSERIAL` key. Wrapping the raw
//! `i64` in a newtype per entity keeps a vehicle id from being passed where
//! a policy id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw database key
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw database key
            pub const fn value(&self) -> i64 {
                self.0
            }

            /// Returns the entity name used in error messages and logs
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

// Insurance identifiers
define_id!(VehicleId, "Vehicle");
define_id!(PolicyId, "Insurance policy");

// Catalog identifiers
define_id!(ProductId, "Product");
define_id!(ImageId, "Image");
define_id!(ReviewId, "Review");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw_key() {
        let id = PolicyId::new(42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_id_parsing() {
        let parsed: VehicleId = " 17 ".parse().unwrap();
        assert_eq!(parsed, VehicleId::new(17));
        assert!("abc".parse::<VehicleId>().is_err());
    }

    #[test]
    fn test_i64_conversion() {
        let id = ProductId::from(9);
        let back: i64 = id.into();
        assert_eq!(back, 9);
        assert_eq!(ProductId::entity(), "Product");
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&ReviewId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: ReviewId = serde_json::from_str("5").unwrap();
        assert_eq!(back, ReviewId::new(5));
    }
}
