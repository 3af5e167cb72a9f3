//! Property-Based Test Generators
//!
//! Proptest strategies producing inputs that satisfy the domain's
//! validation rules.

use chrono::{Duration, NaiveDate};
use core_kernel::{ProductId, VehicleId};
use domain_catalog::{ProductInput, ReviewInput};
use domain_insurance::{CoverageAmounts, PolicyInput, PolicyStatus, VehicleDetails, VehicleOwner};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for premiums between 0.01 and 99,999.99
pub fn premium_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a (start, end) term where end never precedes start
pub fn term_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (0i64..3_650, 0i64..1_095).prop_map(|(offset, length)| {
        let base = crate::fixtures::date(2015, 1, 1);
        let start = base + Duration::days(offset);
        (start, start + Duration::days(length))
    })
}

pub fn policy_status_strategy() -> impl Strategy<Value = PolicyStatus> {
    prop_oneof![
        Just(PolicyStatus::Active),
        Just(PolicyStatus::Expired),
        Just(PolicyStatus::Cancelled),
    ]
}

pub fn registration_strategy() -> impl Strategy<Value = String> {
    "[A-Z]{3}-[0-9]{3}"
}

pub fn vehicle_details_strategy() -> impl Strategy<Value = VehicleDetails> {
    (
        prop_oneof![Just("Toyota"), Just("Honda"), Just("Ford"), Just("Volvo")],
        "[A-Z][a-z]{2,8}",
        1990i32..2026,
        registration_strategy(),
        "[A-Z][a-z]{2,10}",
        "[A-Z][a-z]{2,10}",
    )
        .prop_map(|(make, model, year, registration_number, first, last)| VehicleDetails {
            make: make.to_string(),
            model,
            year,
            vin: None,
            registration_number,
            color: None,
            owner: VehicleOwner {
                first_name: first,
                last_name: last,
                ..VehicleOwner::default()
            },
            insurance_policy_number: None,
        })
}

/// Strategy for policy inputs on the given vehicle with a unique-looking number
pub fn policy_input_strategy(vehicle_id: VehicleId) -> impl Strategy<Value = PolicyInput> {
    (
        "POL-[0-9]{6}",
        prop_oneof![Just("Acme Insurance"), Just("SafeDrive"), Just("Northwind Mutual")],
        term_strategy(),
        premium_strategy(),
    )
        .prop_map(move |(policy_number, provider, (start_date, end_date), premium_amount)| {
            PolicyInput {
                policy_number,
                provider: provider.to_string(),
                vehicle_id,
                start_date,
                end_date,
                premium_amount,
                coverage_type: "THIRD_PARTY".to_string(),
                coverage: CoverageAmounts::default(),
                notes: None,
                vehicle_image: None,
            }
        })
}

pub fn product_input_strategy() -> impl Strategy<Value = ProductInput> {
    (
        "[A-Za-z][A-Za-z ]{0,30}",
        proptest::option::of(0i64..1_000_000i64),
    )
        .prop_map(|(name, cents)| ProductInput {
            name,
            price: cents.map(|c| Decimal::new(c, 2)),
            description: None,
            image_data: None,
        })
}

pub fn review_input_strategy() -> impl Strategy<Value = ReviewInput> {
    (1i32..=5, 1i64..100, proptest::option::of("[a-z ]{1,40}")).prop_map(
        |(rating, product, comment)| ReviewInput {
            comment,
            rating,
            product_id: ProductId::new(product),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_terms_are_ordered((start, end) in term_strategy()) {
            prop_assert!(end >= start);
        }

        #[test]
        fn generated_vehicles_validate(details in vehicle_details_strategy()) {
            prop_assert!(details.validate().is_ok());
        }

        #[test]
        fn generated_policies_validate(input in policy_input_strategy(VehicleId::new(1))) {
            prop_assert!(input.validate_term().is_ok());
            prop_assert!(input.premium_amount > Decimal::ZERO);
        }

        #[test]
        fn generated_catalog_inputs_validate(
            product in product_input_strategy(),
            review in review_input_strategy(),
        ) {
            prop_assert!(product.validate().is_ok());
            prop_assert!(review.validate().is_ok());
        }
    }
}
