//! Unit tests for the Identifiers module
//!
//! Tests cover creation, parsing, conversion, and display formatting.

use core_kernel::{ImageId, PolicyId, ProductId, ReviewId, VehicleId};
use std::collections::HashSet;

mod policy_id_tests {
    use super::*;

    #[test]
    fn test_value_roundtrip() {
        let id = PolicyId::new(7);
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_display_format() {
        assert_eq!(PolicyId::new(1001).to_string(), "1001");
    }

    #[test]
    fn test_from_str() {
        let parsed: PolicyId = "1001".parse().unwrap();
        assert_eq!(parsed, PolicyId::new(1001));
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        assert!("POL-1".parse::<PolicyId>().is_err());
        assert!("".parse::<PolicyId>().is_err());
    }

    #[test]
    fn test_entity_name() {
        assert_eq!(PolicyId::entity(), "Insurance policy");
        assert_eq!(VehicleId::entity(), "Vehicle");
    }
}

mod ordering_tests {
    use super::*;

    #[test]
    fn test_ids_order_by_raw_key() {
        let mut ids = vec![VehicleId::new(3), VehicleId::new(1), VehicleId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![VehicleId::new(1), VehicleId::new(2), VehicleId::new(3)]);
    }

    #[test]
    fn test_ids_hash_by_value() {
        let set: HashSet<ImageId> = [ImageId::new(1), ImageId::new(1), ImageId::new(2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}

mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_value(ProductId::new(12)).unwrap();
        assert_eq!(json, serde_json::json!(12));
    }

    #[test]
    fn test_deserializes_from_number() {
        let id: ReviewId = serde_json::from_value(serde_json::json!(99)).unwrap();
        assert_eq!(id, ReviewId::new(99));
    }
}
