//! Insured vehicles
//!
//! A vehicle is created on its own and referenced (never owned) by any
//! number of insurance policies.

use chrono::{DateTime, NaiveDate, Utc};

use core_kernel::VehicleId;

use crate::error::InsuranceError;

/// The registered owner of a vehicle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleOwner {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl VehicleOwner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Caller-supplied vehicle fields, used for both create and update
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VehicleDetails {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub registration_number: String,
    pub color: Option<String>,
    pub owner: VehicleOwner,
    pub insurance_policy_number: Option<String>,
}

impl VehicleDetails {
    /// Checks that every required text field is present
    pub fn validate(&self) -> Result<(), InsuranceError> {
        let required = [
            ("make", &self.make),
            ("model", &self.model),
            ("registrationNumber", &self.registration_number),
            ("ownerFirstName", &self.owner.first_name),
            ("ownerLastName", &self.owner.last_name),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(InsuranceError::validation(format!("{field} must not be blank")));
            }
        }

        if self.year <= 0 {
            return Err(InsuranceError::validation("year must be a positive number"));
        }

        Ok(())
    }
}

/// A stored vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub registration_number: String,
    pub color: Option<String>,
    pub owner: VehicleOwner,
    pub insurance_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Builds a stored vehicle from its details and a generated id
    pub fn from_details(id: VehicleId, details: VehicleDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            make: details.make,
            model: details.model,
            year: details.year,
            vin: details.vin,
            registration_number: details.registration_number,
            color: details.color,
            owner: details.owner,
            insurance_policy_number: details.insurance_policy_number,
            created_at,
            updated_at: created_at,
        }
    }

    /// Overwrites every caller-editable field and stamps `updated_at`
    pub fn apply_details(&mut self, details: VehicleDetails, now: DateTime<Utc>) {
        self.make = details.make;
        self.model = details.model;
        self.year = details.year;
        self.vin = details.vin;
        self.registration_number = details.registration_number;
        self.color = details.color;
        self.owner = details.owner;
        self.insurance_policy_number = details.insurance_policy_number;
        self.updated_at = now;
    }

    /// Case-insensitive substring match on make, model or registration
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        [&self.make, &self.model, &self.registration_number]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> VehicleDetails {
        VehicleDetails {
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: 2020,
            registration_number: "ABC-123".to_string(),
            owner: VehicleOwner {
                first_name: "Nimal".to_string(),
                last_name: "Perera".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_accepts_complete_details() {
        assert!(details().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_registration() {
        let mut d = details();
        d.registration_number = "   ".to_string();
        let err = d.validate().unwrap_err();
        assert!(err.to_string().contains("registrationNumber"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let vehicle = Vehicle::from_details(VehicleId::new(1), details(), Utc::now());
        assert!(vehicle.matches_search("toyo"));
        assert!(vehicle.matches_search("ROLL"));
        assert!(vehicle.matches_search("abc-1"));
        assert!(!vehicle.matches_search("honda"));
    }
}
