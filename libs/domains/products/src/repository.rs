use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, ListParams, Product, ProductPage, UpdateProduct};

/// Repository trait for Product persistence
///
/// Implementations own validation of incoming DTOs and report failures
/// through [`ProductError`](crate::ProductError) kinds so callers can map
/// them to a status without knowing the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products matching `params`.
    ///
    /// An empty page is reported as `NotFound`.
    async fn list(&self, params: ListParams) -> ProductResult<ProductPage>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Product>;

    /// Insert a new product; a colliding `code` is `DuplicateKey`
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Apply `input` and return the document as it was *before* the update
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Remove a product and return the removed document
    async fn delete(&self, id: Uuid) -> ProductResult<Product>;
}
