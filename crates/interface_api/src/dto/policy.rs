//! Policy DTOs

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{validate_amount, CoreError, VehicleId};
use domain_insurance::{CoverageAmounts, InsurancePolicy, PolicyInput, PolicyStatus};

use crate::error::ApiError;

/// Body of `POST /api/insurance` and `PUT /api/insurance/{id}`
///
/// `status` is accepted for compatibility and ignored: new policies are
/// always ACTIVE and updates never change the status. `policyNumber` is
/// required on create and ignored on update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRequest {
    #[validate(length(min = 1, message = "policyNumber must not be blank"))]
    pub policy_number: Option<String>,
    #[validate(length(min = 1, message = "provider must not be blank"))]
    pub provider: String,
    pub vehicle_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(custom(function = "storable_amount"))]
    pub premium_amount: Decimal,
    #[validate(length(min = 1, message = "coverageType must not be blank"))]
    pub coverage_type: String,
    #[validate(custom(function = "storable_amount"))]
    pub deductible_amount: Option<Decimal>,
    #[validate(custom(function = "storable_amount"))]
    pub liability_coverage_amount: Option<Decimal>,
    #[validate(custom(function = "storable_amount"))]
    pub comprehensive_coverage_amount: Option<Decimal>,
    #[validate(custom(function = "storable_amount"))]
    pub collision_coverage_amount: Option<Decimal>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
}

fn storable_amount(amount: &Decimal) -> Result<(), ValidationError> {
    validate_amount("amount", *amount).map_err(|err| {
        let CoreError::Validation(message) = err;
        let mut error = ValidationError::new("storable_amount");
        error.message = Some(message.into());
        error
    })
}

impl PolicyRequest {
    pub fn into_create_input(self) -> Result<PolicyInput, ApiError> {
        if self.policy_number.is_none() {
            return Err(ApiError::Validation("policyNumber is required".to_string()));
        }
        Ok(self.into_input())
    }

    pub fn into_update_input(self) -> PolicyInput {
        self.into_input()
    }

    fn into_input(self) -> PolicyInput {
        PolicyInput {
            policy_number: self.policy_number.unwrap_or_default(),
            provider: self.provider,
            vehicle_id: VehicleId::new(self.vehicle_id),
            start_date: self.start_date,
            end_date: self.end_date,
            premium_amount: self.premium_amount,
            coverage_type: self.coverage_type,
            coverage: CoverageAmounts {
                deductible: self.deductible_amount,
                liability: self.liability_coverage_amount,
                comprehensive: self.comprehensive_coverage_amount,
                collision: self.collision_coverage_amount,
            },
            notes: self.notes,
            vehicle_image: self.vehicle_image,
        }
    }
}

/// A policy on the wire, with the vehicle flattened to id, registration,
/// make and model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyResponse {
    pub id: i64,
    pub policy_number: String,
    pub provider: String,
    pub vehicle_id: i64,
    pub vehicle_registration: String,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_type: String,
    pub deductible_amount: Option<Decimal>,
    pub liability_coverage_amount: Option<Decimal>,
    pub comprehensive_coverage_amount: Option<Decimal>,
    pub collision_coverage_amount: Option<Decimal>,
    pub status: PolicyStatus,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InsurancePolicy> for PolicyResponse {
    fn from(policy: InsurancePolicy) -> Self {
        Self {
            id: policy.id.value(),
            policy_number: policy.policy_number,
            provider: policy.provider,
            vehicle_id: policy.vehicle.id.value(),
            vehicle_registration: policy.vehicle.registration_number,
            vehicle_make: policy.vehicle.make,
            vehicle_model: policy.vehicle.model,
            start_date: policy.start_date,
            end_date: policy.end_date,
            premium_amount: policy.premium_amount,
            coverage_type: policy.coverage_type,
            deductible_amount: policy.coverage.deductible,
            liability_coverage_amount: policy.coverage.liability,
            comprehensive_coverage_amount: policy.coverage.comprehensive,
            collision_coverage_amount: policy.coverage.collision,
            status: policy.status,
            notes: policy.notes,
            vehicle_image: policy.vehicle_image,
            created_at: policy.created_at,
            updated_at: policy.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderQuery {
    pub provider: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub search_term: String,
}

/// Amounts arrive as text and are parsed exactly
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumRangeQuery {
    pub min_amount: String,
    pub max_amount: String,
}

impl PremiumRangeQuery {
    pub fn bounds(&self) -> Result<(Decimal, Decimal), ApiError> {
        Ok((
            parse_amount("minAmount", &self.min_amount)?,
            parse_amount("maxAmount", &self.max_amount)?,
        ))
    }
}

fn parse_amount(name: &str, raw: &str) -> Result<Decimal, ApiError> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ApiError::BadRequest(format!("{name} must be a decimal number, got '{raw}'")))
}
