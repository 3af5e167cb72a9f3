//! Catalog Domain Ports
//!
//! One storage port per entity. Lists come back ordered by id.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, ImageId, PortError, ProductId, ReviewId};

use crate::image::{Image, ImageUpload};
use crate::product::{Product, ProductInput};
use crate::review::{Review, ReviewInput};

#[async_trait]
pub trait ProductPort: DomainPort + HealthCheckable {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PortError>;
    async fn find_all(&self) -> Result<Vec<Product>, PortError>;
    async fn insert(&self, input: &ProductInput) -> Result<Product, PortError>;
    /// Returns `false` if no product has that id
    async fn update(&self, product: &Product) -> Result<bool, PortError>;
    /// Returns `false` if no product has that id
    async fn delete(&self, id: ProductId) -> Result<bool, PortError>;
    async fn exists(&self, id: ProductId) -> Result<bool, PortError>;
}

#[async_trait]
pub trait ImagePort: DomainPort + HealthCheckable {
    async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, PortError>;
    async fn find_all(&self) -> Result<Vec<Image>, PortError>;
    async fn insert(&self, upload: &ImageUpload) -> Result<Image, PortError>;
    async fn update(&self, image: &Image) -> Result<bool, PortError>;
    async fn delete(&self, id: ImageId) -> Result<bool, PortError>;
    async fn exists(&self, id: ImageId) -> Result<bool, PortError>;
}

#[async_trait]
pub trait ReviewPort: DomainPort + HealthCheckable {
    async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, PortError>;
    async fn find_all(&self) -> Result<Vec<Review>, PortError>;
    /// Reviews for one product, whether or not that product exists
    async fn find_by_product(&self, product_id: ProductId) -> Result<Vec<Review>, PortError>;
    async fn insert(&self, input: &ReviewInput) -> Result<Review, PortError>;
    async fn update(&self, review: &Review) -> Result<bool, PortError>;
    async fn delete(&self, id: ReviewId) -> Result<bool, PortError>;
    async fn exists(&self, id: ReviewId) -> Result<bool, PortError>;
}

/// In-memory adapters
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use tokio::sync::RwLock;

    use core_kernel::HealthCheckResult;

    /// Rows keyed by a generated `BIGSERIAL`-style id
    #[derive(Debug)]
    struct Table<T> {
        rows: BTreeMap<i64, T>,
        next_id: i64,
    }

    impl<T> Default for Table<T> {
        fn default() -> Self {
            Self {
                rows: BTreeMap::new(),
                next_id: 1,
            }
        }
    }

    impl<T: Clone> Table<T> {
        fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
            let id = self.next_id;
            self.next_id += 1;
            let row = build(id);
            self.rows.insert(id, row.clone());
            row
        }

        fn replace(&mut self, id: i64, row: &T) -> bool {
            match self.rows.get_mut(&id) {
                Some(stored) => {
                    *stored = row.clone();
                    true
                }
                None => false,
            }
        }
    }

    macro_rules! mock_port {
        ($name:ident, $row:ty, $adapter_id:literal) => {
            #[derive(Debug, Default)]
            pub struct $name {
                table: RwLock<Table<$row>>,
            }

            impl $name {
                pub fn new() -> Self {
                    Self::default()
                }
            }

            impl DomainPort for $name {}

            #[async_trait]
            impl HealthCheckable for $name {
                async fn health_check(&self) -> HealthCheckResult {
                    HealthCheckResult::healthy($adapter_id)
                }
            }
        };
    }

    mock_port!(MockProductPort, Product, "mock-product-port");
    mock_port!(MockImagePort, Image, "mock-image-port");
    mock_port!(MockReviewPort, Review, "mock-review-port");

    #[async_trait]
    impl ProductPort for MockProductPort {
        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, PortError> {
            Ok(self.table.read().await.rows.get(&id.value()).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Product>, PortError> {
            Ok(self.table.read().await.rows.values().cloned().collect())
        }

        async fn insert(&self, input: &ProductInput) -> Result<Product, PortError> {
            let mut table = self.table.write().await;
            Ok(table.insert_with(|id| Product::from_input(ProductId::new(id), input.clone())))
        }

        async fn update(&self, product: &Product) -> Result<bool, PortError> {
            Ok(self.table.write().await.replace(product.id.value(), product))
        }

        async fn delete(&self, id: ProductId) -> Result<bool, PortError> {
            Ok(self.table.write().await.rows.remove(&id.value()).is_some())
        }

        async fn exists(&self, id: ProductId) -> Result<bool, PortError> {
            Ok(self.table.read().await.rows.contains_key(&id.value()))
        }
    }

    #[async_trait]
    impl ImagePort for MockImagePort {
        async fn find_by_id(&self, id: ImageId) -> Result<Option<Image>, PortError> {
            Ok(self.table.read().await.rows.get(&id.value()).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Image>, PortError> {
            Ok(self.table.read().await.rows.values().cloned().collect())
        }

        async fn insert(&self, upload: &ImageUpload) -> Result<Image, PortError> {
            let mut table = self.table.write().await;
            Ok(table.insert_with(|id| Image::from_upload(ImageId::new(id), upload.clone())))
        }

        async fn update(&self, image: &Image) -> Result<bool, PortError> {
            Ok(self.table.write().await.replace(image.id.value(), image))
        }

        async fn delete(&self, id: ImageId) -> Result<bool, PortError> {
            Ok(self.table.write().await.rows.remove(&id.value()).is_some())
        }

        async fn exists(&self, id: ImageId) -> Result<bool, PortError> {
            Ok(self.table.read().await.rows.contains_key(&id.value()))
        }
    }

    #[async_trait]
    impl ReviewPort for MockReviewPort {
        async fn find_by_id(&self, id: ReviewId) -> Result<Option<Review>, PortError> {
            Ok(self.table.read().await.rows.get(&id.value()).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Review>, PortError> {
            Ok(self.table.read().await.rows.values().cloned().collect())
        }

        async fn find_by_product(&self, product_id: ProductId) -> Result<Vec<Review>, PortError> {
            Ok(self
                .table
                .read()
                .await
                .rows
                .values()
                .filter(|review| review.product_id == product_id)
                .cloned()
                .collect())
        }

        async fn insert(&self, input: &ReviewInput) -> Result<Review, PortError> {
            let mut table = self.table.write().await;
            Ok(table.insert_with(|id| Review::from_input(ReviewId::new(id), input.clone())))
        }

        async fn update(&self, review: &Review) -> Result<bool, PortError> {
            Ok(self.table.write().await.replace(review.id.value(), review))
        }

        async fn delete(&self, id: ReviewId) -> Result<bool, PortError> {
            Ok(self.table.write().await.rows.remove(&id.value()).is_some())
        }

        async fn exists(&self, id: ReviewId) -> Result<bool, PortError> {
            Ok(self.table.read().await.rows.contains_key(&id.value()))
        }
    }
}
