//! Test Data Builders
//!
//! Builders that start from the standard fixtures so tests only spell out
//! the fields they care about.

use chrono::NaiveDate;
use core_kernel::VehicleId;
use domain_insurance::{CoverageAmounts, PolicyInput, VehicleDetails, VehicleOwner};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use rust_decimal::Decimal;

use crate::fixtures::{PolicyFixtures, VehicleFixtures};

/// Builder for policy create/update payloads
pub struct PolicyInputBuilder {
    input: PolicyInput,
}

impl PolicyInputBuilder {
    /// Starts from the annual 2024 fixture for the given vehicle
    pub fn new(vehicle_id: VehicleId) -> Self {
        Self {
            input: PolicyFixtures::annual(vehicle_id),
        }
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.input.policy_number = number.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.input.provider = provider.into();
        self
    }

    pub fn with_vehicle(mut self, vehicle_id: VehicleId) -> Self {
        self.input.vehicle_id = vehicle_id;
        self
    }

    pub fn with_term(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.input.start_date = start;
        self.input.end_date = end;
        self
    }

    pub fn with_premium(mut self, premium: Decimal) -> Self {
        self.input.premium_amount = premium;
        self
    }

    pub fn with_coverage_type(mut self, coverage_type: impl Into<String>) -> Self {
        self.input.coverage_type = coverage_type.into();
        self
    }

    pub fn with_coverage(mut self, coverage: CoverageAmounts) -> Self {
        self.input.coverage = coverage;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.input.notes = Some(notes.into());
        self
    }

    pub fn build(self) -> PolicyInput {
        self.input
    }
}

/// Builder for vehicle payloads
pub struct VehicleDetailsBuilder {
    details: VehicleDetails,
}

impl Default for VehicleDetailsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VehicleDetailsBuilder {
    /// Starts from the Corolla fixture
    pub fn new() -> Self {
        Self {
            details: VehicleFixtures::corolla(),
        }
    }

    /// Starts from the Corolla fixture with a randomly named owner
    pub fn with_fake_owner() -> Self {
        let owner = VehicleOwner {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            ..VehicleOwner::default()
        };
        Self::new().with_owner(owner)
    }

    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.details.make = make.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.details.model = model.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.details.year = year;
        self
    }

    pub fn with_registration(mut self, registration: impl Into<String>) -> Self {
        self.details.registration_number = registration.into();
        self
    }

    pub fn with_owner(mut self, owner: VehicleOwner) -> Self {
        self.details.owner = owner;
        self
    }

    pub fn build(self) -> VehicleDetails {
        self.details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::fixtures::date;

    #[test]
    fn test_policy_builder_overrides_only_named_fields() {
        let input = PolicyInputBuilder::new(VehicleId::new(7))
            .with_policy_number("POL-X")
            .with_premium(dec!(900))
            .with_term(date(2025, 1, 1), date(2025, 6, 30))
            .build();

        assert_eq!(input.policy_number, "POL-X");
        assert_eq!(input.premium_amount, dec!(900));
        assert_eq!(input.vehicle_id, VehicleId::new(7));
        assert_eq!(input.provider, "Acme Insurance");
        assert_eq!(input.end_date, date(2025, 6, 30));
    }

    #[test]
    fn test_fake_owner_is_valid() {
        let details = VehicleDetailsBuilder::with_fake_owner()
            .with_registration("FAKE-1")
            .build();

        assert!(!details.owner.first_name.is_empty());
        assert!(details.validate().is_ok());
    }
}
