//! Insurance Domain Ports
//!
//! This module defines the storage interfaces the insurance services depend
//! on. The PostgreSQL adapters in `infra_db` implement them for production,
//! and the in-memory adapters in [`mock`] implement them for tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_insurance::ports::{PolicyPort, VehiclePort};
//! use std::sync::Arc;
//!
//! pub struct PolicyService {
//!     policies: Arc<dyn PolicyPort>,
//!     vehicles: Arc<dyn VehiclePort>,
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{DomainPort, HealthCheckable, Page, PolicyId, PortError, VehicleId};

use crate::policy::{InsurancePolicy, PolicyDraft, PolicyFilter, PolicyPageRequest};
use crate::vehicle::{Vehicle, VehicleDetails};

/// Storage for vehicles
#[async_trait]
pub trait VehiclePort: DomainPort + HealthCheckable {
    /// Finds a vehicle by id
    async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError>;

    /// Lists every vehicle ordered by id
    async fn find_all(&self) -> Result<Vec<Vehicle>, PortError>;

    /// Stores a new vehicle and returns it with its generated id
    async fn insert(
        &self,
        details: &VehicleDetails,
        created_at: DateTime<Utc>,
    ) -> Result<Vehicle, PortError>;

    /// Overwrites a stored vehicle
    ///
    /// Returns `false` if no vehicle has that id.
    async fn update(&self, vehicle: &Vehicle) -> Result<bool, PortError>;

    /// Removes a vehicle
    ///
    /// Returns `false` if no vehicle has that id.
    async fn delete(&self, id: VehicleId) -> Result<bool, PortError>;

    async fn exists(&self, id: VehicleId) -> Result<bool, PortError>;
}

/// Storage for insurance policies
///
/// Reads always return the policy with its vehicle loaded.
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    async fn find_by_id(&self, id: PolicyId) -> Result<Option<InsurancePolicy>, PortError>;

    /// Finds the single policy carrying `number`
    async fn find_by_number(&self, number: &str) -> Result<Option<InsurancePolicy>, PortError>;

    /// Returns one sorted page of the policies matching `filter`
    async fn find_page(
        &self,
        filter: &PolicyFilter,
        request: &PolicyPageRequest,
    ) -> Result<Page<InsurancePolicy>, PortError>;

    /// Stores a new policy
    ///
    /// A duplicate policy number is reported as `PortError::Conflict`.
    async fn insert(&self, draft: &PolicyDraft) -> Result<InsurancePolicy, PortError>;

    /// Writes the mutable fields of `policy`, but only if the stored row is
    /// still ACTIVE
    ///
    /// Returns `false` if the row is missing or no longer ACTIVE.
    async fn update_active(&self, policy: &InsurancePolicy) -> Result<bool, PortError>;

    /// Removes a policy regardless of status
    async fn delete(&self, id: PolicyId) -> Result<bool, PortError>;

    async fn exists(&self, id: PolicyId) -> Result<bool, PortError>;

    /// Number of policies referencing a vehicle
    async fn count_by_vehicle(&self, vehicle_id: VehicleId) -> Result<u64, PortError>;
}

/// In-memory adapters
///
/// Both adapters keep their rows behind a `tokio::sync::RwLock` and hand out
/// ids from an atomic counter, mirroring a `BIGSERIAL` column.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{paginate, HealthCheckResult};

    use crate::policy::PolicyStatus;

    /// In-memory implementation of `VehiclePort`
    #[derive(Debug)]
    pub struct MockVehiclePort {
        vehicles: RwLock<BTreeMap<VehicleId, Vehicle>>,
        next_id: AtomicI64,
    }

    impl Default for MockVehiclePort {
        fn default() -> Self {
            Self {
                vehicles: RwLock::new(BTreeMap::new()),
                next_id: AtomicI64::new(1),
            }
        }
    }

    impl MockVehiclePort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of stored vehicles
        pub async fn len(&self) -> usize {
            self.vehicles.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.vehicles.read().await.is_empty()
        }
    }

    impl DomainPort for MockVehiclePort {}

    #[async_trait]
    impl HealthCheckable for MockVehiclePort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-vehicle-port")
        }
    }

    #[async_trait]
    impl VehiclePort for MockVehiclePort {
        async fn find_by_id(&self, id: VehicleId) -> Result<Option<Vehicle>, PortError> {
            Ok(self.vehicles.read().await.get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Vehicle>, PortError> {
            Ok(self.vehicles.read().await.values().cloned().collect())
        }

        async fn insert(
            &self,
            details: &VehicleDetails,
            created_at: DateTime<Utc>,
        ) -> Result<Vehicle, PortError> {
            let id = VehicleId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
            let vehicle = Vehicle::from_details(id, details.clone(), created_at);
            self.vehicles.write().await.insert(id, vehicle.clone());
            Ok(vehicle)
        }

        async fn update(&self, vehicle: &Vehicle) -> Result<bool, PortError> {
            let mut vehicles = self.vehicles.write().await;
            match vehicles.get_mut(&vehicle.id) {
                Some(stored) => {
                    *stored = vehicle.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, id: VehicleId) -> Result<bool, PortError> {
            Ok(self.vehicles.write().await.remove(&id).is_some())
        }

        async fn exists(&self, id: VehicleId) -> Result<bool, PortError> {
            Ok(self.vehicles.read().await.contains_key(&id))
        }
    }

    /// In-memory implementation of `PolicyPort`
    ///
    /// Rows keep only the vehicle id; the vehicle is joined from the shared
    /// `MockVehiclePort` on every read, the way the SQL adapter joins.
    #[derive(Debug)]
    pub struct MockPolicyPort {
        vehicles: Arc<MockVehiclePort>,
        rows: RwLock<BTreeMap<PolicyId, PolicyDraft>>,
        next_id: AtomicI64,
    }

    impl MockPolicyPort {
        pub fn new(vehicles: Arc<MockVehiclePort>) -> Self {
            Self {
                vehicles,
                rows: RwLock::new(BTreeMap::new()),
                next_id: AtomicI64::new(1),
            }
        }

        /// Forces a stored policy into `status`
        ///
        /// Nothing in the services changes status, so tests use this to reach
        /// the EXPIRED and CANCELLED states.
        pub async fn set_status(&self, id: PolicyId, status: PolicyStatus) -> bool {
            match self.rows.write().await.get_mut(&id) {
                Some(row) => {
                    row.status = status;
                    true
                }
                None => false,
            }
        }

        async fn join(
            &self,
            id: PolicyId,
            row: &PolicyDraft,
        ) -> Result<InsurancePolicy, PortError> {
            let vehicle = self
                .vehicles
                .find_by_id(row.vehicle_id)
                .await?
                .ok_or_else(|| {
                    PortError::internal(format!("policy {id} references a missing vehicle"))
                })?;
            Ok(row.clone().into_policy(id, vehicle))
        }

        async fn load_all(&self) -> Result<Vec<InsurancePolicy>, PortError> {
            let rows = self.rows.read().await.clone();
            let mut policies = Vec::with_capacity(rows.len());
            for (id, row) in &rows {
                policies.push(self.join(*id, row).await?);
            }
            Ok(policies)
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl HealthCheckable for MockPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-policy-port")
        }
    }

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn find_by_id(&self, id: PolicyId) -> Result<Option<InsurancePolicy>, PortError> {
            let row = self.rows.read().await.get(&id).cloned();
            match row {
                Some(row) => Ok(Some(self.join(id, &row).await?)),
                None => Ok(None),
            }
        }

        async fn find_by_number(&self, number: &str) -> Result<Option<InsurancePolicy>, PortError> {
            let found = self
                .rows
                .read()
                .await
                .iter()
                .find(|(_, row)| row.policy_number == number)
                .map(|(id, row)| (*id, row.clone()));
            match found {
                Some((id, row)) => Ok(Some(self.join(id, &row).await?)),
                None => Ok(None),
            }
        }

        async fn find_page(
            &self,
            filter: &PolicyFilter,
            request: &PolicyPageRequest,
        ) -> Result<Page<InsurancePolicy>, PortError> {
            let mut matching: Vec<InsurancePolicy> = self
                .load_all()
                .await?
                .into_iter()
                .filter(|policy| filter.matches(policy))
                .collect();

            let sort = *request.sort();
            matching.sort_by(|a, b| {
                sort.direction
                    .apply(sort.field.compare(a, b))
                    .then_with(|| a.id.cmp(&b.id))
            });

            Ok(paginate(matching, request))
        }

        async fn insert(&self, draft: &PolicyDraft) -> Result<InsurancePolicy, PortError> {
            if !self.vehicles.exists(draft.vehicle_id).await? {
                return Err(PortError::conflict(format!(
                    "vehicle {} does not exist",
                    draft.vehicle_id
                )));
            }

            let id = {
                let mut rows = self.rows.write().await;
                if rows.values().any(|row| row.policy_number == draft.policy_number) {
                    return Err(PortError::conflict(format!(
                        "policy number {} already exists",
                        draft.policy_number
                    )));
                }
                let id = PolicyId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
                rows.insert(id, draft.clone());
                id
            };

            self.join(id, draft).await
        }

        async fn update_active(&self, policy: &InsurancePolicy) -> Result<bool, PortError> {
            let mut rows = self.rows.write().await;
            let Some(row) = rows.get_mut(&policy.id) else {
                return Ok(false);
            };
            if row.status != PolicyStatus::Active {
                return Ok(false);
            }

            row.provider = policy.provider.clone();
            row.vehicle_id = policy.vehicle.id;
            row.start_date = policy.start_date;
            row.end_date = policy.end_date;
            row.premium_amount = policy.premium_amount;
            row.coverage_type = policy.coverage_type.clone();
            row.coverage = policy.coverage.clone();
            row.notes = policy.notes.clone();
            row.updated_at = policy.updated_at;
            Ok(true)
        }

        async fn delete(&self, id: PolicyId) -> Result<bool, PortError> {
            Ok(self.rows.write().await.remove(&id).is_some())
        }

        async fn exists(&self, id: PolicyId) -> Result<bool, PortError> {
            Ok(self.rows.read().await.contains_key(&id))
        }

        async fn count_by_vehicle(&self, vehicle_id: VehicleId) -> Result<u64, PortError> {
            let count = self
                .rows
                .read()
                .await
                .values()
                .filter(|row| row.vehicle_id == vehicle_id)
                .count();
            Ok(count as u64)
        }
    }
}
