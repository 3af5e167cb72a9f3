//! Catalog repositories: products, images and reviews

use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::{ImageId, ProductId, ReviewId};
use domain_catalog::{Image, ImageUpload, Product, ProductInput, Review, ReviewInput};

use crate::error::DatabaseError;

// ============================================================================
// Rows
// ============================================================================

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId::new(row.id),
            name: row.name,
            price: row.price,
            description: row.description,
            image_data: row.image_data,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Image {
            id: ImageId::new(row.id),
            name: row.name,
            content_type: row.content_type,
            data: row.data,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub comment: Option<String>,
    pub rating: i32,
    pub product_id: i64,
}

impl From<ReviewRow> for Review {
    fn from(row: ReviewRow) -> Self {
        Review {
            id: ReviewId::new(row.id),
            comment: row.comment,
            rating: row.rating,
            product_id: ProductId::new(row.product_id),
        }
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ProductRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, description, image_data FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_all(&self) -> Result<Vec<ProductRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, price, description, image_data FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, input: &ProductInput) -> Result<ProductRow, DatabaseError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, price, description, image_data)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, description, image_data
            "#,
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(&input.description)
        .bind(&input.image_data)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, product: &Product) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE products SET name = $2, price = $3, description = $4, image_data = $5
            WHERE id = $1
            "#,
        )
        .bind(product.id.value())
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.image_data)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

// ============================================================================
// Images
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ImageRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ImageRow>(
            "SELECT id, name, content_type, data FROM images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_all(&self) -> Result<Vec<ImageRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ImageRow>(
            "SELECT id, name, content_type, data FROM images ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, upload: &ImageUpload) -> Result<ImageRow, DatabaseError> {
        let row = sqlx::query_as::<_, ImageRow>(
            r#"
            INSERT INTO images (name, content_type, data)
            VALUES ($1, $2, $3)
            RETURNING id, name, content_type, data
            "#,
        )
        .bind(&upload.name)
        .bind(&upload.content_type)
        .bind(&upload.data)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, image: &Image) -> Result<u64, DatabaseError> {
        let result =
            sqlx::query("UPDATE images SET name = $2, content_type = $3, data = $4 WHERE id = $1")
                .bind(image.id.value())
                .bind(&image.name)
                .bind(&image.content_type)
                .bind(&image.data)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM images WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

// ============================================================================
// Reviews
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<ReviewRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, comment, rating, product_id FROM reviews WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_all(&self) -> Result<Vec<ReviewRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, comment, rating, product_id FROM reviews ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_product(&self, product_id: i64) -> Result<Vec<ReviewRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ReviewRow>(
            "SELECT id, comment, rating, product_id FROM reviews WHERE product_id = $1 ORDER BY id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, input: &ReviewInput) -> Result<ReviewRow, DatabaseError> {
        let row = sqlx::query_as::<_, ReviewRow>(
            r#"
            INSERT INTO reviews (comment, rating, product_id)
            VALUES ($1, $2, $3)
            RETURNING id, comment, rating, product_id
            "#,
        )
        .bind(&input.comment)
        .bind(input.rating)
        .bind(input.product_id.value())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, review: &Review) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE reviews SET comment = $2, rating = $3, product_id = $4 WHERE id = $1",
        )
        .bind(review.id.value())
        .bind(&review.comment)
        .bind(review.rating)
        .bind(review.product_id.value())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn exists(&self, id: i64) -> Result<bool, DatabaseError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM reviews WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
