//! Vehicle repository
//!
//! Owners are stored inline on the vehicle row with an `owner_` prefix.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use core_kernel::VehicleId;
use domain_insurance::{Vehicle, VehicleDetails, VehicleOwner};

use crate::error::DatabaseError;

pub(crate) const VEHICLE_COLUMNS: &str = "id, make, model, year, vin, registration_number, color, \
     owner_first_name, owner_last_name, owner_email, owner_phone, owner_address, \
     owner_license_number, owner_date_of_birth, insurance_policy_number, created_at, updated_at";

/// A row of the `vehicles` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VehicleRow {
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

impl From<VehicleRow> for Vehicle {
    fn from(row: VehicleRow) -> Self {
        Vehicle {
            id: VehicleId::new(row.id),
            make: row.make,
            model: row.model,
            year: row.year,
            vin: row.vin,
            registration_number: row.registration_number,
            color: row.color,
            owner: VehicleOwner {
                first_name: row.owner_first_name,
                last_name: row.owner_last_name,
                email: row.owner_email,
                phone: row.owner_phone,
                address: row.owner_address,
                license_number: row.owner_license_number,
                date_of_birth: row.owner_date_of_birth,
            },
            insurance_policy_number: row.insurance_policy_number,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for the `vehicles` table
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<VehicleRow>, DatabaseError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_all(&self) -> Result<Vec<VehicleRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, VehicleRow>(&format!(
            "SELECT {VEHICLE_COLUMNS} FROM vehicles ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(
        &self,
        details: &VehicleDetails,
        created_at: DateTime<Utc>,
    ) -> Result<VehicleRow, DatabaseError> {
        let row = sqlx::query_as::<_, VehicleRow>(&format!(
            r#"
            INSERT INTO vehicles (
                make, model, year, vin, registration_number, color,
                owner_first_name, owner_last_name, owner_email, owner_phone, owner_address,
                owner_license_number, owner_date_of_birth, insurance_policy_number,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $15)
            RETURNING {VEHICLE_COLUMNS}
            "#
        ))
        .bind(&details.make)
        .bind(&details.model)
        .bind(details.year)
        .bind(&details.vin)
        .bind(&details.registration_number)
        .bind(&details.color)
        .bind(&details.owner.first_name)
        .bind(&details.owner.last_name)
        .bind(&details.owner.email)
        .bind(&details.owner.phone)
        .bind(&details.owner.address)
        .bind(&details.owner.license_number)
        .bind(details.owner.date_of_birth)
        .bind(&details.insurance_policy_number)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns the number of rows written (0 or 1)
    pub async fn update(&self, vehicle: &Vehicle) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE vehicles SET
                make = $2, model = $3, year = $4, vin = $5, registration_number = $6, color = $7,
                owner_first_name = $8, owner_last_name = $9, owner_email = $10, owner_phone = $11,
                owner_address = $12, owner_license_number = $13, owner_date_of_birth = $14,
                insurance_policy_number = $15, updated_at = $16
            WHERE id = $1
            "#,
        )
        .bind(vehicle.id.value())
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.vin)
        .bind(&vehicle.registration_number)
        .bind(&vehicle.color)
        .bind(&vehicle.owner.first_name)
        .bind(&vehicle.owner.last_name)
        .bind(&vehicle.owner.email)
        .bind(&vehicle.owner.phone)
        .bind(&vehicle.owner.address)
        .bind(&vehicle.owner.license_number)
        .bind(vehicle.owner.date_of_birth)
        .bind(&vehicle.insurance_policy_number)
        .bind(vehicle.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Returns the number of rows removed (0 or 1)
    ///
    /// Fails with `ForeignKeyViolation` while a policy still references the
    /// vehicle.
    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
