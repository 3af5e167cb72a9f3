//! Insurance application services
//!
//! The services sit between the HTTP layer and the storage ports. They own
//! every business rule of the domain: vehicle resolution, date and amount
//! range checks, the ACTIVE-only update rule and referential checks on
//! vehicle removal. Nothing is persisted until every check has passed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use core_kernel::{HealthCheckResult, Page, PolicyId, VehicleId};

use crate::error::InsuranceError;
use crate::policy::{
    validate_amount_range, validate_date_range, InsurancePolicy, PolicyDraft, PolicyFilter,
    PolicyInput, PolicyPageRequest, PolicyStatus, ERROR_NOT_ACTIVE,
};
use crate::ports::{PolicyPort, VehiclePort};
use crate::vehicle::{Vehicle, VehicleDetails};

const VEHICLE: &str = "Vehicle";
const POLICY: &str = "Insurance policy";

/// Service for insurance policy operations
#[derive(Clone)]
pub struct PolicyService {
    policies: Arc<dyn PolicyPort>,
    vehicles: Arc<dyn VehiclePort>,
}

impl PolicyService {
    pub fn new(policies: Arc<dyn PolicyPort>, vehicles: Arc<dyn VehiclePort>) -> Self {
        Self { policies, vehicles }
    }

    /// Creates a new ACTIVE policy for an existing vehicle
    ///
    /// # Errors
    ///
    /// - `NotFound` if the vehicle does not exist
    /// - `InvalidRange` if the end date is before the start date
    /// - `Validation` if an amount has sub-cent precision or overflows
    /// - `Conflict` if the policy number is already taken
    #[instrument(
        skip(self, input),
        fields(policy_number = %input.policy_number, vehicle_id = %input.vehicle_id)
    )]
    pub async fn create_policy(
        &self,
        input: PolicyInput,
    ) -> Result<InsurancePolicy, InsuranceError> {
        self.require_vehicle(input.vehicle_id).await?;

        if let Err(err) = input.validate_term() {
            warn!(start = %input.start_date, end = %input.end_date, "Rejected policy term");
            return Err(err);
        }
        if let Err(err) = input.validate_amounts() {
            warn!(error = %err, "Rejected policy amounts");
            return Err(err);
        }

        let draft = PolicyDraft::activate(input, Utc::now());
        let policy = self.policies.insert(&draft).await?;

        info!(policy_id = %policy.id, "Insurance policy created");
        Ok(policy)
    }

    #[instrument(skip(self))]
    pub async fn get_policy_by_id(&self, id: PolicyId) -> Result<InsurancePolicy, InsuranceError> {
        self.policies
            .find_by_id(id)
            .await?
            .ok_or_else(|| InsuranceError::not_found(POLICY, id))
    }

    #[instrument(skip(self))]
    pub async fn get_policy_by_number(
        &self,
        number: &str,
    ) -> Result<InsurancePolicy, InsuranceError> {
        self.policies
            .find_by_number(number)
            .await?
            .ok_or_else(|| InsuranceError::policy_number_not_found(number))
    }

    #[instrument(skip(self, request))]
    pub async fn get_all_policies(
        &self,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::All, request).await
    }

    /// Policies covering one vehicle
    ///
    /// Unlike the other filters this fails with `NotFound` when the vehicle
    /// itself does not exist, rather than returning an empty page.
    #[instrument(skip(self, request))]
    pub async fn get_policies_by_vehicle(
        &self,
        vehicle_id: VehicleId,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        if !self.vehicles.exists(vehicle_id).await? {
            return Err(InsuranceError::not_found(VEHICLE, vehicle_id));
        }
        self.page(PolicyFilter::Vehicle(vehicle_id), request).await
    }

    #[instrument(skip(self, request))]
    pub async fn get_policies_by_provider(
        &self,
        provider: &str,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::Provider(provider.to_string()), request)
            .await
    }

    /// Policies whose end date falls within `[start, end]`
    #[instrument(skip(self, request))]
    pub async fn get_policies_by_expiry_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        validate_date_range(start, end)?;
        self.page(PolicyFilter::EndDateBetween { from: start, to: end }, request)
            .await
    }

    #[instrument(skip(self, request))]
    pub async fn get_policies_by_status(
        &self,
        status: PolicyStatus,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::Status(status), request).await
    }

    /// ACTIVE policies ending after today
    #[instrument(skip(self, request))]
    pub async fn get_active_policies(
        &self,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::ActiveOn(today()), request).await
    }

    /// Policies that ended before today, whatever their status
    #[instrument(skip(self, request))]
    pub async fn get_expired_policies(
        &self,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::ExpiredOn(today()), request).await
    }

    #[instrument(skip(self, request))]
    pub async fn search_policies_by_vehicle_details(
        &self,
        term: &str,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        self.page(PolicyFilter::VehicleDetails(term.to_string()), request)
            .await
    }

    #[instrument(skip(self, request))]
    pub async fn get_policies_by_premium_range(
        &self,
        min: Decimal,
        max: Decimal,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        validate_amount_range(min, max)?;
        self.page(PolicyFilter::PremiumBetween { min, max }, request)
            .await
    }

    /// Overwrites the editable fields of an ACTIVE policy
    ///
    /// The policy number, status, creation time and vehicle image snapshot
    /// are kept as stored.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the policy or the new vehicle does not exist
    /// - `InvalidState` if the policy is not ACTIVE
    /// - `InvalidRange` if the end date is before the start date
    /// - `Validation` if an amount has sub-cent precision or overflows
    #[instrument(skip(self, input), fields(policy_id = %id))]
    pub async fn update_policy(
        &self,
        id: PolicyId,
        input: PolicyInput,
    ) -> Result<InsurancePolicy, InsuranceError> {
        let mut policy = self.get_policy_by_id(id).await?;
        policy.ensure_mutable()?;

        let vehicle = if input.vehicle_id == policy.vehicle.id {
            policy.vehicle.clone()
        } else {
            self.require_vehicle(input.vehicle_id).await?
        };

        policy.apply_update(input, vehicle, Utc::now())?;

        if !self.policies.update_active(&policy).await? {
            // Lost a race with a delete or a status change
            if self.policies.exists(id).await? {
                return Err(InsuranceError::InvalidState(ERROR_NOT_ACTIVE.to_string()));
            }
            return Err(InsuranceError::not_found(POLICY, id));
        }

        info!("Insurance policy updated");
        Ok(policy)
    }

    #[instrument(skip(self))]
    pub async fn delete_policy(&self, id: PolicyId) -> Result<(), InsuranceError> {
        if !self.policies.delete(id).await? {
            return Err(InsuranceError::not_found(POLICY, id));
        }
        info!(policy_id = %id, "Insurance policy deleted");
        Ok(())
    }

    /// Health of both backing ports
    pub async fn health_check(&self) -> Vec<HealthCheckResult> {
        vec![
            self.policies.health_check().await,
            self.vehicles.health_check().await,
        ]
    }

    async fn require_vehicle(&self, id: VehicleId) -> Result<Vehicle, InsuranceError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| InsuranceError::not_found(VEHICLE, id))
    }

    async fn page(
        &self,
        filter: PolicyFilter,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, InsuranceError> {
        Ok(self.policies.find_page(&filter, request).await?)
    }
}

/// Service for vehicle operations
#[derive(Clone)]
pub struct VehicleService {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
}

impl VehicleService {
    pub fn new(vehicles: Arc<dyn VehiclePort>, policies: Arc<dyn PolicyPort>) -> Self {
        Self { vehicles, policies }
    }

    #[instrument(skip(self, details), fields(registration = %details.registration_number))]
    pub async fn create_vehicle(&self, details: VehicleDetails) -> Result<Vehicle, InsuranceError> {
        details.validate()?;
        let vehicle = self.vehicles.insert(&details, Utc::now()).await?;
        info!(vehicle_id = %vehicle.id, "Vehicle created");
        Ok(vehicle)
    }

    #[instrument(skip(self))]
    pub async fn get_vehicle(&self, id: VehicleId) -> Result<Vehicle, InsuranceError> {
        self.vehicles
            .find_by_id(id)
            .await?
            .ok_or_else(|| InsuranceError::not_found(VEHICLE, id))
    }

    #[instrument(skip(self))]
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, InsuranceError> {
        Ok(self.vehicles.find_all().await?)
    }

    #[instrument(skip(self, details), fields(vehicle_id = %id))]
    pub async fn update_vehicle(
        &self,
        id: VehicleId,
        details: VehicleDetails,
    ) -> Result<Vehicle, InsuranceError> {
        details.validate()?;
        let mut vehicle = self.get_vehicle(id).await?;
        vehicle.apply_details(details, Utc::now());

        if !self.vehicles.update(&vehicle).await? {
            return Err(InsuranceError::not_found(VEHICLE, id));
        }
        info!("Vehicle updated");
        Ok(vehicle)
    }

    /// Removes a vehicle that no policy references
    ///
    /// # Errors
    ///
    /// - `NotFound` if the vehicle does not exist
    /// - `Conflict` if at least one policy still covers it
    #[instrument(skip(self))]
    pub async fn delete_vehicle(&self, id: VehicleId) -> Result<(), InsuranceError> {
        if !self.vehicles.exists(id).await? {
            return Err(InsuranceError::not_found(VEHICLE, id));
        }

        let referencing = self.policies.count_by_vehicle(id).await?;
        if referencing > 0 {
            warn!(vehicle_id = %id, referencing, "Refused to delete insured vehicle");
            return Err(InsuranceError::Conflict(format!(
                "Vehicle {id} is referenced by {referencing} insurance policies"
            )));
        }

        if !self.vehicles.delete(id).await? {
            return Err(InsuranceError::not_found(VEHICLE, id));
        }
        info!(vehicle_id = %id, "Vehicle deleted");
        Ok(())
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
