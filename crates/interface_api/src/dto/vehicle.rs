//! Vehicle DTOs
//!
//! Owner fields are flattened with an `owner` prefix.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_insurance::{Vehicle, VehicleDetails, VehicleOwner};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    #[validate(length(min = 1, message = "make must not be blank"))]
    pub make: String,
    #[validate(length(min = 1, message = "model must not be blank"))]
    pub model: String,
    #[validate(range(min = 1, message = "year must be a positive number"))]
    pub year: i32,
    pub vin: Option<String>,
    #[validate(length(min = 1, message = "registrationNumber must not be blank"))]
    pub registration_number: String,
    pub color: Option<String>,
    #[validate(length(min = 1, message = "ownerFirstName must not be blank"))]
    pub owner_first_name: String,
    #[validate(length(min = 1, message = "ownerLastName must not be blank"))]
    pub owner_last_name: String,
    #[validate(email(message = "ownerEmail must be a valid email address"))]
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_address: Option<String>,
    pub owner_license_number: Option<String>,
    pub owner_date_of_birth: Option<NaiveDate>,
    pub insurance_policy_number: Option<String>,
}

impl From<VehicleRequest> for VehicleDetails {
    fn from(request: VehicleRequest) -> Self {
        VehicleDetails {
            make: request.make,
            model: request.model,
            year: request.year,
            vin: request.vin,
            registration_number: request.registration_number,
            color: request.color,
            owner: VehicleOwner {
                first_name: request.owner_first_name,
                last_name: request.owner_last_name,
                email: request.owner_email,
                phone: request.owner_phone,
                address: request.owner_address,
                license_number: request.owner_license_number,
                date_of_birth: request.owner_date_of_birth,
            },
            insurance_policy_number: request.insurance_policy_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub vin: Option<String>,
    pub registration_number: String,
    pub color: Option<String>,
    pub owner_first_name: String,
    pub owner_last_name: String,
    pub owner_email: Option<String>,
    pub owner_phone: Option<String>,
    pub owner_address: Option<String>,
    pub owner_license_number: Option<String>,
    pub owner_date_of_birth: Option<NaiveDate>,
    pub insurance_policy_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id.value(),
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            vin: vehicle.vin,
            registration_number: vehicle.registration_number,
            color: vehicle.color,
            owner_first_name: vehicle.owner.first_name,
            owner_last_name: vehicle.owner.last_name,
            owner_email: vehicle.owner.email,
            owner_phone: vehicle.owner.phone,
            owner_address: vehicle.owner.address,
            owner_license_number: vehicle.owner.license_number,
            owner_date_of_birth: vehicle.owner.date_of_birth,
            insurance_policy_number: vehicle.insurance_policy_number,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}
