//! Insurance policy repository
//!
//! Every read joins the policy to its vehicle, so a row always carries the
//! full vehicle as `vehicle_*` columns. Paged queries are assembled with
//! `sqlx::QueryBuilder`: the filter becomes a `WHERE` clause shared by the
//! count query and the page query, and the sort field maps onto a fixed
//! column name.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder};

use domain_insurance::{InsurancePolicy, PolicyDraft, PolicyFilter, PolicyPageRequest};

use crate::error::DatabaseError;

const POLICY_SELECT: &str = r#"
    SELECT
        p.id, p.policy_number, p.provider, p.start_date, p.end_date, p.premium_amount,
        p.coverage_type, p.deductible_amount, p.liability_coverage, p.comprehensive_coverage,
        p.collision_coverage, p.status, p.notes, p.vehicle_image, p.created_at, p.updated_at,
        v.id AS vehicle_id,
        v.make AS vehicle_make,
        v.model AS vehicle_model,
        v.year AS vehicle_year,
        v.vin AS vehicle_vin,
        v.registration_number AS vehicle_registration_number,
        v.color AS vehicle_color,
        v.owner_first_name AS vehicle_owner_first_name,
        v.owner_last_name AS vehicle_owner_last_name,
        v.owner_email AS vehicle_owner_email,
        v.owner_phone AS vehicle_owner_phone,
        v.owner_address AS vehicle_owner_address,
        v.owner_license_number AS vehicle_owner_license_number,
        v.owner_date_of_birth AS vehicle_owner_date_of_birth,
        v.insurance_policy_number AS vehicle_insurance_policy_number,
        v.created_at AS vehicle_created_at,
        v.updated_at AS vehicle_updated_at
    FROM insurance_policies p
    JOIN vehicles v ON v.id = p.vehicle_id
"#;

const POLICY_COUNT: &str =
    "SELECT COUNT(*) FROM insurance_policies p JOIN vehicles v ON v.id = p.vehicle_id";

/// A policy row joined with its vehicle
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub policy_number: String,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub premium_amount: Decimal,
    pub coverage_type: String,
    pub deductible_amount: Option<Decimal>,
    pub liability_coverage: Option<Decimal>,
    pub comprehensive_coverage: Option<Decimal>,
    pub collision_coverage: Option<Decimal>,
    pub status: String,
    pub notes: Option<String>,
    pub vehicle_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub vehicle_id: i64,
    pub vehicle_make: String,
    pub vehicle_model: String,
    pub vehicle_year: i32,
    pub vehicle_vin: Option<String>,
    pub vehicle_registration_number: String,
    pub vehicle_color: Option<String>,
    pub vehicle_owner_first_name: String,
    pub vehicle_owner_last_name: String,
    pub vehicle_owner_email: Option<String>,
    pub vehicle_owner_phone: Option<String>,
    pub vehicle_owner_address: Option<String>,
    pub vehicle_owner_license_number: Option<String>,
    pub vehicle_owner_date_of_birth: Option<NaiveDate>,
    pub vehicle_insurance_policy_number: Option<String>,
    pub vehicle_created_at: DateTime<Utc>,
    pub vehicle_updated_at: DateTime<Utc>,
}

/// Repository for the `insurance_policies` table
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!("{POLICY_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_number(&self, number: &str) -> Result<Option<PolicyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(&format!(
            "{POLICY_SELECT} WHERE p.policy_number = $1"
        ))
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns the rows of one page plus the total number of matching rows
    pub async fn find_page(
        &self,
        filter: &PolicyFilter,
        request: &PolicyPageRequest,
    ) -> Result<(Vec<PolicyRow>, u64), DatabaseError> {
        let mut count = QueryBuilder::<Postgres>::new(POLICY_COUNT);
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar::<i64>().fetch_one(&self.pool).await?;

        let mut query = QueryBuilder::<Postgres>::new(POLICY_SELECT);
        push_filter(&mut query, filter);

        let sort = request.sort();
        query.push(" ORDER BY p.");
        query.push(sort.field.column());
        query.push(" ");
        query.push(sort.direction.as_sql());
        query.push(", p.id ASC LIMIT ");
        query.push_bind(i64::from(request.size()));
        query.push(" OFFSET ");
        query.push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

        let rows = query
            .build_query_as::<PolicyRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok((rows, u64::try_from(total).unwrap_or_default()))
    }

    /// Inserts a policy and reads it back joined with its vehicle
    pub async fn insert(&self, draft: &PolicyDraft) -> Result<PolicyRow, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO insurance_policies (
                policy_number, provider, vehicle_id, start_date, end_date, premium_amount,
                coverage_type, deductible_amount, liability_coverage, comprehensive_coverage,
                collision_coverage, status, notes, vehicle_image, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id
            "#,
        )
        .bind(&draft.policy_number)
        .bind(&draft.provider)
        .bind(draft.vehicle_id.value())
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.premium_amount)
        .bind(&draft.coverage_type)
        .bind(draft.coverage.deductible)
        .bind(draft.coverage.liability)
        .bind(draft.coverage.comprehensive)
        .bind(draft.coverage.collision)
        .bind(draft.status.as_str())
        .bind(&draft.notes)
        .bind(&draft.vehicle_image)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match DatabaseError::from(e) {
            DatabaseError::DuplicateEntry(_) => {
                DatabaseError::duplicate("Insurance policy", "policy_number", &draft.policy_number)
            }
            other => other,
        })?;

        let row = sqlx::query_as::<_, PolicyRow>(&format!("{POLICY_SELECT} WHERE p.id = $1"))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Writes the editable columns when the stored row is still ACTIVE
    ///
    /// Returns the number of rows written (0 or 1).
    pub async fn update_active(&self, policy: &InsurancePolicy) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE insurance_policies SET
                provider = $2,
                vehicle_id = $3,
                start_date = $4,
                end_date = $5,
                premium_amount = $6,
                coverage_type = $7,
                deductible_amount = $8,
                liability_coverage = $9,
                comprehensive_coverage = $10,
                collision_coverage = $11,
                notes = $12,
                updated_at = $13
            WHERE id = $1 AND status = 'ACTIVE'
            "#,
        )
        .bind(policy.id.value())
        .bind(&policy.provider)
        .bind(policy.vehicle.id.value())
        .bind(policy.start_date)
        .bind(policy.end_date)
        .bind(policy.premium_amount)
        .bind(&policy.coverage_type)
        .bind(policy.coverage.deductible)
        .bind(policy.coverage.liability)
        .bind(policy.coverage.comprehensive)
        .bind(policy.coverage.collision)
        .bind(&policy.notes)
        .bind(policy.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM insurance_policies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM insurance_policies WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn count_by_vehicle(&self, vehicle_id: i64) -> Result<u64, DatabaseError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM insurance_policies WHERE vehicle_id = $1")
                .bind(vehicle_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }
}

/// Appends the `WHERE` clause for `filter`
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &PolicyFilter) {
    match filter {
        PolicyFilter::All => {}
        PolicyFilter::Vehicle(id) => {
            query.push(" WHERE p.vehicle_id = ").push_bind(id.value());
        }
        PolicyFilter::Provider(term) => {
            query.push(" WHERE p.provider ILIKE ").push_bind(contains_pattern(term));
        }
        PolicyFilter::EndDateBetween { from, to } => {
            query
                .push(" WHERE p.end_date BETWEEN ")
                .push_bind(*from)
                .push(" AND ")
                .push_bind(*to);
        }
        PolicyFilter::Status(status) => {
            query.push(" WHERE p.status = ").push_bind(status.as_str());
        }
        PolicyFilter::ActiveOn(today) => {
            query
                .push(" WHERE p.status = 'ACTIVE' AND p.end_date > ")
                .push_bind(*today);
        }
        PolicyFilter::ExpiredOn(today) => {
            query.push(" WHERE p.end_date < ").push_bind(*today);
        }
        PolicyFilter::VehicleDetails(term) => {
            let pattern = contains_pattern(term);
            query
                .push(" WHERE (v.make ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR v.model ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR v.registration_number ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        PolicyFilter::PremiumBetween { min, max } => {
            query
                .push(" WHERE p.premium_amount BETWEEN ")
                .push_bind(*min)
                .push(" AND ")
                .push_bind(*max);
        }
    }
}

/// `%term%` with LIKE wildcards in `term` escaped
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
