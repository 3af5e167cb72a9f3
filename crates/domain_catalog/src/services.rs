//! Catalog application services
//!
//! Thin CRUD services: validate, look up, copy fields, persist. A missing
//! entity on get, update or delete is always `CatalogError::NotFound`.

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{HealthCheckResult, ImageId, ProductId, ReviewId};

use crate::error::CatalogError;
use crate::image::{Image, ImageUpload};
use crate::ports::{ImagePort, ProductPort, ReviewPort};
use crate::product::{Product, ProductInput};
use crate::review::{Review, ReviewInput};

const PRODUCT: &str = "Product";
const IMAGE: &str = "Image";
const REVIEW: &str = "Review";

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductPort>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductPort>) -> Self {
        Self { products }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> Result<Product, CatalogError> {
        input.validate()?;
        let product = self.products.insert(&input).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PRODUCT, id))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_all().await?)
    }

    /// Overwrites the product fields, keeping the stored image unless a new
    /// one is supplied
    #[instrument(skip(self, input), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Product, CatalogError> {
        input.validate()?;
        let mut product = self.get_product(id).await?;
        product.apply(input);

        if !self.products.update(&product).await? {
            return Err(CatalogError::not_found(PRODUCT, id));
        }
        info!("Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::not_found(PRODUCT, id));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> HealthCheckResult {
        self.products.health_check().await
    }
}

#[derive(Clone)]
pub struct ImageService {
    images: Arc<dyn ImagePort>,
}

impl ImageService {
    pub fn new(images: Arc<dyn ImagePort>) -> Self {
        Self { images }
    }

    #[instrument(skip(self, upload), fields(name = %upload.name, bytes = upload.data.len()))]
    pub async fn upload_image(&self, upload: ImageUpload) -> Result<Image, CatalogError> {
        upload.validate()?;
        let image = self.images.insert(&upload).await?;
        info!(image_id = %image.id, "Image uploaded");
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn get_image(&self, id: ImageId) -> Result<Image, CatalogError> {
        self.images
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(IMAGE, id))
    }

    #[instrument(skip(self))]
    pub async fn list_images(&self) -> Result<Vec<Image>, CatalogError> {
        Ok(self.images.find_all().await?)
    }

    /// Replaces the name, content type and bytes of a stored image
    #[instrument(skip(self, upload), fields(image_id = %id))]
    pub async fn update_image(
        &self,
        id: ImageId,
        upload: ImageUpload,
    ) -> Result<Image, CatalogError> {
        upload.validate()?;
        let mut image = self.get_image(id).await?;
        image.replace(upload);

        if !self.images.update(&image).await? {
            return Err(CatalogError::not_found(IMAGE, id));
        }
        info!("Image replaced");
        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn delete_image(&self, id: ImageId) -> Result<(), CatalogError> {
        if !self.images.delete(id).await? {
            return Err(CatalogError::not_found(IMAGE, id));
        }
        info!(image_id = %id, "Image deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> HealthCheckResult {
        self.images.health_check().await
    }
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewPort>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewPort>) -> Self {
        Self { reviews }
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_review(&self, input: ReviewInput) -> Result<Review, CatalogError> {
        input.validate()?;
        let review = self.reviews.insert(&input).await?;
        info!(review_id = %review.id, "Review created");
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> Result<Vec<Review>, CatalogError> {
        Ok(self.reviews.find_all().await?)
    }

    #[instrument(skip(self))]
    pub async fn list_reviews_by_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Review>, CatalogError> {
        Ok(self.reviews.find_by_product(product_id).await?)
    }

    #[instrument(skip(self, input), fields(review_id = %id))]
    pub async fn update_review(
        &self,
        id: ReviewId,
        input: ReviewInput,
    ) -> Result<Review, CatalogError> {
        input.validate()?;
        let mut review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(REVIEW, id))?;
        review.apply(input);

        if !self.reviews.update(&review).await? {
            return Err(CatalogError::not_found(REVIEW, id));
        }
        info!("Review updated");
        Ok(review)
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: ReviewId) -> Result<(), CatalogError> {
        if !self.reviews.delete(id).await? {
            return Err(CatalogError::not_found(REVIEW, id));
        }
        info!(review_id = %id, "Review deleted");
        Ok(())
    }

    pub async fn health_check(&self) -> HealthCheckResult {
        self.reviews.health_check().await
    }
}
