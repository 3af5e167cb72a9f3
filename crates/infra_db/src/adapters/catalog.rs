//! PostgreSQL Catalog Adapters

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    DomainPort, HealthCheckResult, HealthCheckable, ImageId, PortError, ProductId, ReviewId,
};
use domain_catalog::{
    Image, ImagePort, ImageUpload, Product, ProductInput, ProductPort, Review, ReviewInput,
    ReviewPort,
};

use crate::adapters::ping;
use crate::repositories::catalog::{ImageRepository, ProductRepository, ReviewRepository};

#[derive(Debug, Clone)]
pub struct PostgresProductAdapter {
    repository: ProductRepository,
    pool: PgPool,
}

impl PostgresProductAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ProductRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresProductAdapter {}

#[async_trait]
impl HealthCheckable for PostgresProductAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-product-adapter").await
    }
}

#[async_trait]
impl ProductPort for PostgresProductAdapter {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PortError> {
        Ok(self.repository.find_by_id(id.value()).await?.map(Product::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, PortError> {
        let rows = self.repository.find_all().await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    async fn insert(&self, input: &ProductInput) -> Result<Product, PortError> {
        Ok(Product::from(self.repository.insert(input).await?))
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn update(&self, product: &Product) -> Result<bool, PortError> {
        Ok(self.repository.update(product).await? == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProductId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await? == 1)
    }

    async fn exists(&self, id: ProductId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresImageAdapter {
    repository: ImageRepository,
    pool: PgPool,
}

impl PostgresImageAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ImageRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresImageAdapter {}

#[async_trait]
impl HealthCheckable for PostgresImageAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-image-adapter").await
    }
}

#[async_trait]
impl ImagePort for PostgresImageAdapter {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, PortError> {
        Ok(self.repository.find_by_id(id.value()).await?.map(Image::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Image>, PortError> {
        let rows = self.repository.find_all().await?;
        Ok(rows.into_iter().map(Image::from).collect())
    }

    #[instrument(skip(self, upload), fields(name = %upload.name, bytes = upload.data.len()))]
    async fn insert(&self, upload: &ImageUpload) -> Result<Image, PortError> {
        Ok(Image::from(self.repository.insert(upload).await?))
    }

    #[instrument(skip(self, image), fields(image_id = %image.id))]
    async fn update(&self, image: &Image) -> Result<bool, PortError> {
        Ok(self.repository.update(image).await? == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ImageId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await? == 1)
    }

    async fn exists(&self, id: ImageId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }
}

#[derive(Debug, Clone)]
pub struct PostgresReviewAdapter {
    repository: ReviewRepository,
    pool: PgPool,
}

impl PostgresReviewAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ReviewRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresReviewAdapter {}

#[async_trait]
impl HealthCheckable for PostgresReviewAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        ping(&self.pool, "postgres-review-adapter").await
    }
}

#[async_trait]
impl ReviewPort for PostgresReviewAdapter {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, PortError> {
        Ok(self.repository.find_by_id(id.value()).await?.map(Review::from))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Review>, PortError> {
        let rows = self.repository.find_all().await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_product(&self, product_id: ProductId) -> Result<Vec<Review>, PortError> {
        let rows = self.repository.find_by_product(product_id.value()).await?;
        Ok(rows.into_iter().map(Review::from).collect())
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    async fn insert(&self, input: &ReviewInput) -> Result<Review, PortError> {
        Ok(Review::from(self.repository.insert(input).await?))
    }

    #[instrument(skip(self, review), fields(review_id = %review.id))]
    async fn update(&self, review: &Review) -> Result<bool, PortError> {
        Ok(self.repository.update(review).await? == 1)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ReviewId) -> Result<bool, PortError> {
        Ok(self.repository.delete(id.value()).await? == 1)
    }

    async fn exists(&self, id: ReviewId) -> Result<bool, PortError> {
        Ok(self.repository.exists(id.value()).await?)
    }
}
