//! PostgreSQL Insurance Adapters
//!
//! Implements `VehiclePort` and `PolicyPort` on top of the vehicle and
//! policy repositories.
//!
//! # Error Handling
//!
//! - duplicate policy number or dangling vehicle reference -> `PortError::Conflict`
//! - unreadable status column -> `PortError::Internal`
//! - pool failures -> `PortError::Connection`

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, Page, PolicyId, PortError, VehicleId,
};
use domain_insurance::{
    CoverageAmounts, InsurancePolicy, PolicyDraft, PolicyFilter, PolicyPageRequest, PolicyPort,
    PolicyStatus, Vehicle, VehicleDetails, VehicleOwner, VehiclePort,
};

use crate::adapters::ping;
use crate::error::DatabaseError;
use crate::repositories::policy::{PolicyRepository, PolicyRow};
use crate::repositories::vehicle::VehicleRepository;

/// PostgreSQL-backed implementation of `VehiclePort`
#[derive(Debug, Clone)]
pub struct PostgresVehicleAdapter {
    repository: VehicleRepository,
    pool: PgPool,
}

impl PostgresVehicleAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &VehicleRepository {
        &self.repository
    }
}

impl DomainPort for PostgresVehicleAdapter {}

#[async_trait]
impl HealthCheckable for PostgresVehicleAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-vehicle-adapter").await
    }
}

#[async_trait]
impl VehiclePort for PostgresVehicleAdapter {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError> {
        let row = self.repository.find_by_id(id.value()).await?;
        Ok(row.map(Vehicle::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Vehicle>, PortError> {
        let rows = self.repository.find_all().await?;
        debug!(count = rows.len(), "Loaded vehicles");
        Ok(rows.into_iter().map(Vehicle::from).collect())
    }

    #[instrument(skip(self, details))]
    async fn insert(
        &self,
        details: &VehicleDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Vehicle, PortError> {
        let row = self.repository.insert(details, created_at).await?;
        debug!(vehicle_id = row.id, "Inserted vehicle");
        Ok(Vehicle::from(row))
    }

    #[instrument(skip(self, vehicle), fields(vehicle_id = %vehicle.id))]
    async fn update(&self, vehicle: &Vehicle) -> Result<bool, PortError> {
        Ok(self.repository.update(vehicle).await? == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: VehicleId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await? == 1)
    }

    async fn exists(&self, id: VehicleId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }
}

/// PostgreSQL-backed implementation of `PolicyPort`
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn repository(&self) -> &PolicyRepository {
        &self.repository
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-policy-adapter").await
    }
}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PolicyId) -> Result<Option<InsurancePolicy>, PortError> {
        self.repository
            .find_by_id(id.value())
            .await?
            .map(row_to_policy)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_number(&self, number: &str) -> Result<Option<InsurancePolicy>, PortError> {
        self.repository
            .find_by_number(number)
            .await?
            .map(row_to_policy)
            .transpose()
    }

    #[instrument(skip(self, request), fields(page = request.page(), size = request.size()))]
    async fn find_page(
        &self,
        filter: &PolicyFilter,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, PortError> {
        let (rows, total) = self.repository.find_page(filter, request).await?;
        debug!(rows = rows.len(), total, "Loaded policy page");

        let items = rows
            .into_iter()
            .map(row_to_policy)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(items, request.page(), request.size(), total))
    }

    #[instrument(skip(self, draft), fields(policy_number = %draft.policy_number))]
    async fn insert(&self, draft: &PolicyDraft) -> Result<InsurancePolicy, PortError> {
        let row = self.repository.insert(draft).await?;
        debug!(policy_id = row.id, "Inserted policy");
        row_to_policy(row)
    }

    #[instrument(skip(self, policy), fields(policy_id = %policy.id))]
    async fn update_active(&self, policy: &InsurancePolicy) -> Result<bool, PortError> {
        Ok(self.repository.update_active(policy).await? == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await? == 1)
    }

    async fn exists(&self, id: PolicyId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }

    async fn count_by_vehicle(&self, vehicle_id: VehicleId) -> Result<u64, PortError> {
        Ok(self.repository.count_by_vehicle(vehicle_id.value()).await?)
    }
}

/// Converts a joined policy row into the domain aggregate
fn row_to_policy(row: PolicyRow) -> Result<InsurancePolicy, PortError> {
    let status: PolicyStatus = row.status.parse().map_err(|_| {
        DatabaseError::CorruptRow(format!("policy {} has status '{}'", row.id, row.status))
    })?;

    let vehicle = Vehicle {
        id: VehicleId::new(row.vehicle_id),
        make: row.vehicle_make,
        model: row.vehicle_model,
        year: row.vehicle_year,
        vin: row.vehicle_vin,
        registration_number: row.vehicle_registration_number,
        color: row.vehicle_color,
        owner: VehicleOwner {
            first_name: row.vehicle_owner_first_name,
            last_name: row.vehicle_owner_last_name,
            email: row.vehicle_owner_email,
            phone: row.vehicle_owner_phone,
            address: row.vehicle_owner_address,
            license_number: row.vehicle_owner_license_number,
            date_of_birth: row.vehicle_owner_date_of_birth,
        },
        insurance_policy_number: row.vehicle_insurance_policy_number,
        created_at: row.vehicle_created_at,
        updated_at: row.vehicle_updated_at,
    };

    Ok(InsurancePolicy {
        id: PolicyId::new(row.id),
        policy_number: row.policy_number,
        provider: row.provider,
        vehicle,
        start_date: row.start_date,
        end_date: row.end_date,
        premium_amount: row.premium_amount,
        coverage_type: row.coverage_type,
        coverage: CoverageAmounts {
            deductible: row.deductible_amount,
            liability: row.liability_coverage,
            comprehensive: row.comprehensive_coverage,
            collision: row.collision_coverage,
        },
        status,
        notes: row.notes,
        vehicle_image: row.vehicle_image,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
