//! Insurance policy aggregate
//!
//! A policy covers exactly one vehicle for a date range. It is created
//! ACTIVE and can only be edited while it stays ACTIVE.
//!
//! # Invariants
//!
//! - `end_date >= start_date`, checked on create and on every update
//! - `status`, `policy_number`, `created_at` and the vehicle image snapshot
//!   never change after creation
//! - `updated_at` is refreshed on every mutation
//!
//! # Lifecycle
//!
//! ```text
//! ACTIVE -> EXPIRED
//!        \-> CANCELLED
//! ```
//!
//! Nothing in this crate performs those transitions; the non-active states
//! are read-only for mutation purposes.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use core_kernel::{validate_amount, PageRequest, PolicyId, VehicleId};

use crate::error::InsuranceError;
use crate::vehicle::Vehicle;

pub const ERROR_INVALID_DATE_RANGE: &str = "End date must be after start date";
pub const ERROR_INVALID_AMOUNT_RANGE: &str = "Minimum amount cannot be greater than maximum amount";
pub const ERROR_NOT_ACTIVE: &str = "Cannot update expired or cancelled policy";

/// Policy status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "ACTIVE",
            PolicyStatus::Expired => "EXPIRED",
            PolicyStatus::Cancelled => "CANCELLED",
        }
    }

    /// Only active policies accept updates
    pub fn is_mutable(&self) -> bool {
        matches!(self, PolicyStatus::Active)
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyStatus {
    type Err = InsuranceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(PolicyStatus::Active),
            "EXPIRED" => Ok(PolicyStatus::Expired),
            "CANCELLED" => Ok(PolicyStatus::Cancelled),
            other => Err(InsuranceError::validation(format!("Unknown policy status '{other}'"))),
        }
    }
}

/// Optional coverage sub-amounts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageAmounts {
    pub deductible: Option<Decimal>,
    pub liability: Option<Decimal>,
    pub comprehensive: Option<Decimal>,
    pub collision: Option<Decimal>,
}

/// Caller-supplied policy fields
///
/// Create uses every field. Update ignores `policy_number` and
/// `vehicle_image`, which are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyInput {
    pub policy_number: String,
    pub provider: String,
    pub vehicle_id: VehicleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_type: String,
    pub coverage: CoverageAmounts,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
}

impl PolicyInput {
    /// Checks the date order
    pub fn validate_term(&self) -> Result<(), InsuranceError> {
        validate_date_range(self.start_date, self.end_date)
    }

    /// Checks the premium and coverage amounts fit the stored precision
    pub fn validate_amounts(&self) -> Result<(), InsuranceError> {
        validate_amount("premiumAmount", self.premium_amount)?;

        let coverage = [
            ("deductibleAmount", self.coverage.deductible),
            ("liabilityCoverageAmount", self.coverage.liability),
            ("comprehensiveCoverageAmount", self.coverage.comprehensive),
            ("collisionCoverageAmount", self.coverage.collision),
        ];
        for (field, amount) in coverage {
            if let Some(amount) = amount {
                validate_amount(field, amount)?;
            }
        }
        Ok(())
    }
}

/// Fails with `InvalidRange` when `end` is before `start`
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), InsuranceError> {
    if end < start {
        return Err(InsuranceError::InvalidRange(ERROR_INVALID_DATE_RANGE.to_string()));
    }
    Ok(())
}

/// Fails with `InvalidRange` when `min` is greater than `max`
pub fn validate_amount_range(min: Decimal, max: Decimal) -> Result<(), InsuranceError> {
    if min > max {
        return Err(InsuranceError::InvalidRange(ERROR_INVALID_AMOUNT_RANGE.to_string()));
    }
    Ok(())
}

/// A policy ready to be inserted; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyDraft {
    pub policy_number: String,
    pub provider: String,
    pub vehicle_id: VehicleId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_type: String,
    pub coverage: CoverageAmounts,
    pub status: PolicyStatus,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PolicyDraft {
    /// Builds a new ACTIVE policy stamped at `now`
    pub fn activate(input: PolicyInput, now: DateTime<Utc>) -> Self {
        Self {
            policy_number: input.policy_number,
            provider: input.provider,
            vehicle_id: input.vehicle_id,
            start_date: input.start_date,
            end_date: input.end_date,
            premium_amount: input.premium_amount,
            coverage_type: input.coverage_type,
            coverage: input.coverage,
            status: PolicyStatus::Active,
            notes: input.notes,
            vehicle_image: input.vehicle_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attaches the generated id and the resolved vehicle
    pub fn into_policy(self, id: PolicyId, vehicle: Vehicle) -> InsurancePolicy {
        InsurancePolicy {
            id,
            policy_number: self.policy_number,
            provider: self.provider,
            vehicle,
            start_date: self.start_date,
            end_date: self.end_date,
            premium_amount: self.premium_amount,
            coverage_type: self.coverage_type,
            coverage: self.coverage,
            status: self.status,
            notes: self.notes,
            vehicle_image: self.vehicle_image,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// A stored policy with its vehicle loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsurancePolicy {
    pub id: PolicyId,
    pub policy_number: String,
    pub provider: String,
    pub vehicle: Vehicle,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_type: String,
    pub coverage: CoverageAmounts,
    pub status: PolicyStatus,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InsurancePolicy {
    /// Fails with `InvalidState` unless the policy is ACTIVE
    pub fn ensure_mutable(&self) -> Result<(), InsuranceError> {
        if !self.status.is_mutable() {
            return Err(InsuranceError::InvalidState(ERROR_NOT_ACTIVE.to_string()));
        }
        Ok(())
    }

    /// Overwrites the mutable fields from `input`
    ///
    /// The caller resolves `vehicle`; this only re-checks state, date order
    /// and amounts before touching anything.
    pub fn apply_update(
        &mut self,
        input: PolicyInput,
        vehicle: Vehicle,
        now: DateTime<Utc>,
    ) -> Result<(), InsuranceError> {
        self.ensure_mutable()?;
        input.validate_term()?;
        input.validate_amounts()?;

        self.provider = input.provider;
        self.vehicle = vehicle;
        self.start_date = input.start_date;
        self.end_date = input.end_date;
        self.premium_amount = input.premium_amount;
        self.coverage_type = input.coverage_type;
        self.coverage = input.coverage;
        self.notes = input.notes;
        self.updated_at = now;
        Ok(())
    }

    /// `end_date > today AND status = ACTIVE`
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.end_date > today && self.status == PolicyStatus::Active
    }

    /// `end_date < today`, regardless of status
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }
}

/// Fields a policy page can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicySortField {
    #[default]
    Id,
    PolicyNumber,
    Provider,
    StartDate,
    EndDate,
    PremiumAmount,
    CoverageType,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl PolicySortField {
    /// Column of `insurance_policies` backing this field
    pub fn column(&self) -> &'static str {
        match self {
            PolicySortField::Id => "id",
            PolicySortField::PolicyNumber => "policy_number",
            PolicySortField::Provider => "provider",
            PolicySortField::StartDate => "start_date",
            PolicySortField::EndDate => "end_date",
            PolicySortField::PremiumAmount => "premium_amount",
            PolicySortField::CoverageType => "coverage_type",
            PolicySortField::Status => "status",
            PolicySortField::CreatedAt => "created_at",
            PolicySortField::UpdatedAt => "updated_at",
        }
    }

    /// Ascending comparison of two policies on this field
    pub fn compare(&self, a: &InsurancePolicy, b: &InsurancePolicy) -> Ordering {
        match self {
            PolicySortField::Id => a.id.cmp(&b.id),
            PolicySortField::PolicyNumber => a.policy_number.cmp(&b.policy_number),
            PolicySortField::Provider => a.provider.cmp(&b.provider),
            PolicySortField::StartDate => a.start_date.cmp(&b.start_date),
            PolicySortField::EndDate => a.end_date.cmp(&b.end_date),
            PolicySortField::PremiumAmount => a.premium_amount.cmp(&b.premium_amount),
            PolicySortField::CoverageType => a.coverage_type.cmp(&b.coverage_type),
            PolicySortField::Status => a.status.as_str().cmp(b.status.as_str()),
            PolicySortField::CreatedAt => a.created_at.cmp(&b.created_at),
            PolicySortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        }
    }
}

impl FromStr for PolicySortField {
    type Err = InsuranceError;

    /// Accepts both the wire (camelCase) and column (snake_case) spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "id" => PolicySortField::Id,
            "policyNumber" | "policy_number" => PolicySortField::PolicyNumber,
            "provider" => PolicySortField::Provider,
            "startDate" | "start_date" => PolicySortField::StartDate,
            "endDate" | "end_date" => PolicySortField::EndDate,
            "premiumAmount" | "premium_amount" => PolicySortField::PremiumAmount,
            "coverageType" | "coverage_type" => PolicySortField::CoverageType,
            "status" => PolicySortField::Status,
            "createdAt" | "created_at" => PolicySortField::CreatedAt,
            "updatedAt" | "updated_at" => PolicySortField::UpdatedAt,
            other => {
                return Err(InsuranceError::validation(format!(
                    "Cannot sort policies by '{other}'"
                )))
            }
        };
        Ok(field)
    }
}

pub type PolicyPageRequest = PageRequest<PolicySortField>;

/// Predicate selecting which policies a page query returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyFilter {
    All,
    Vehicle(VehicleId),
    /// Case-insensitive substring of the provider name
    Provider(String),
    /// Inclusive bounds on `end_date`
    EndDateBetween { from: NaiveDate, to: NaiveDate },
    Status(PolicyStatus),
    ActiveOn(NaiveDate),
    ExpiredOn(NaiveDate),
    /// Case-insensitive substring of make, model or registration
    VehicleDetails(String),
    /// Inclusive bounds on `premium_amount`
    PremiumBetween { min: Decimal, max: Decimal },
}

impl PolicyFilter {
    pub fn matches(&self, policy: &InsurancePolicy) -> bool {
        match self {
            PolicyFilter::All => true,
            PolicyFilter::Vehicle(id) => policy.vehicle.id == *id,
            PolicyFilter::Provider(term) => {
                policy.provider.to_lowercase().contains(&term.to_lowercase())
            }
            PolicyFilter::EndDateBetween { from, to } => {
                policy.end_date >= *from && policy.end_date <= *to
            }
            PolicyFilter::Status(status) => policy.status == *status,
            PolicyFilter::ActiveOn(today) => policy.is_active_on(*today),
            PolicyFilter::ExpiredOn(today) => policy.is_expired_on(*today),
            PolicyFilter::VehicleDetails(term) => policy.vehicle.matches_search(term),
            PolicyFilter::PremiumBetween { min, max } => {
                policy.premium_amount >= *min && policy.premium_amount <= *max
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing_is_case_insensitive() {
        assert_eq!("active".parse::<PolicyStatus>().unwrap(), PolicyStatus::Active);
        assert_eq!("CANCELLED".parse::<PolicyStatus>().unwrap(), PolicyStatus::Cancelled);
        assert!("lapsed".parse::<PolicyStatus>().is_err());
    }

    #[test]
    fn test_only_active_is_mutable() {
        assert!(PolicyStatus::Active.is_mutable());
        assert!(!PolicyStatus::Expired.is_mutable());
        assert!(!PolicyStatus::Cancelled.is_mutable());
    }

    #[test]
    fn test_sort_field_accepts_both_spellings() {
        assert_eq!(
            "premiumAmount".parse::<PolicySortField>().unwrap(),
            PolicySortField::PremiumAmount
        );
        assert_eq!(
            "premium_amount".parse::<PolicySortField>().unwrap(),
            PolicySortField::PremiumAmount
        );
        assert!("vehicle".parse::<PolicySortField>().is_err());
    }

    #[test]
    fn test_date_range_allows_same_day() {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(validate_date_range(day, day).is_ok());
        assert!(validate_date_range(day, day.pred_opt().unwrap()).is_err());
    }

    #[test]
    fn test_amount_range() {
        assert!(validate_amount_range(Decimal::from(200), Decimal::from(1000)).is_ok());
        let err = validate_amount_range(Decimal::from(1000), Decimal::from(200)).unwrap_err();
        assert!(matches!(err, InsuranceError::InvalidRange(_)));
    }
}
