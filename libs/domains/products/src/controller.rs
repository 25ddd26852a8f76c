//! Product controller - turns repository outcomes into response envelopes

use axum_helpers::StatusResponse;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ListParams, Product, ProductPage, ProductQuery, UpdateProduct};
use crate::repository::ProductRepository;

pub const CREATED_MESSAGE: &str = "Product created successfully";
pub const UPDATED_MESSAGE: &str = "Product updated successfully";
pub const DELETED_MESSAGE: &str = "Product deleted successfully";

/// Product controller
///
/// Every operation answers with a [`StatusResponse`] whose status comes from
/// [`ProductError::status_code`] on failure. No state is kept between calls.
pub struct ProductController<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductController<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Share an already wrapped repository, e.g. one also used by health checks
    pub fn from_arc(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: ProductQuery) -> StatusResponse<ProductPage> {
        let params = ListParams::from(query);
        match self.repository.list(params).await {
            Ok(page) => StatusResponse::ok(page),
            Err(err) => error_response(err),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> StatusResponse<Product> {
        let result = async {
            let id = parse_id(id)?;
            self.repository.get_by_id(id).await
        }
        .await;

        match result {
            Ok(product) => StatusResponse::ok(product),
            Err(err) => error_response(err),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create(&self, input: CreateProduct) -> StatusResponse<Product> {
        match self.repository.create(input).await {
            Ok(product) => StatusResponse::created(product, CREATED_MESSAGE),
            Err(err) => error_response(err),
        }
    }

    /// Responds with the stored document as it was before the update,
    /// overlaid with the fields supplied in `input`
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateProduct) -> StatusResponse<Product> {
        let result = async {
            let id = parse_id(id)?;
            let previous = self.repository.update(id, input.clone()).await?;
            Ok::<_, ProductError>(previous.merged_with(input))
        }
        .await;

        match result {
            Ok(product) => StatusResponse::ok_with_message(product, UPDATED_MESSAGE),
            Err(err) => error_response(err),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> StatusResponse<Product> {
        let result = async {
            let id = parse_id(id)?;
            self.repository.delete(id).await
        }
        .await;

        match result {
            Ok(product) => StatusResponse::ok_with_message(product, DELETED_MESSAGE),
            Err(err) => error_response(err),
        }
    }
}

impl<R: ProductRepository> Clone for ProductController<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Parse a path identifier into a product id
pub fn parse_id(raw: &str) -> ProductResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| ProductError::InvalidFormat(raw.to_string()))
}

/// Failed envelope for `err`; server-side failures are logged at `error`
pub fn error_response<T>(err: ProductError) -> StatusResponse<T> {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = %err, "Product request failed");
    } else {
        tracing::info!(error = %err, status = status.as_u16(), "Product request rejected");
    }
    StatusResponse::error(err.to_string(), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductStatus;
    use crate::repository::MockProductRepository;
    use axum::http::StatusCode;
    use mockall::predicate::eq;

    fn sample_input() -> CreateProduct {
        CreateProduct {
            name: "Desk Lamp".to_string(),
            description: "LED desk lamp".to_string(),
            price: 30.0,
            code: 1001,
            status: ProductStatus::Active,
            stock: 4,
            category: "lighting".to_string(),
            thumbnail: String::new(),
        }
    }

    fn sample_product() -> Product {
        Product::new(sample_input())
    }

    #[tokio::test]
    async fn test_list_normalizes_query() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .withf(|params| params.limit == 10 && params.page == 1 && params.code.is_none())
            .returning(|params| Ok(ProductPage::new(vec![sample_product()], 1, &params)));

        let controller = ProductController::new(mock_repo);
        let response = controller
            .list(ProductQuery {
                limit: Some("abc".to_string()),
                page: Some("0".to_string()),
                code: Some("x".to_string()),
                ..Default::default()
            })
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.message, "Success");
        assert!(response.success);
        assert_eq!(response.data.unwrap().docs.len(), 1);
    }

    #[tokio::test]
    async fn test_list_not_found_is_404() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(ProductError::NotFound));

        let controller = ProductController::new(mock_repo);
        let response = controller.list(ProductQuery::default()).await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert!(!response.success);
        assert!(response.data.is_none());
    }

    #[tokio::test]
    async fn test_list_database_error_is_500_with_message() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_list()
            .returning(|_| Err(ProductError::Database("connection refused".to_string())));

        let controller = ProductController::new(mock_repo);
        let response = controller.list(ProductQuery::default()).await;

        assert_eq!(response.status, 500);
        assert!(response.message.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_get_by_id_malformed_id_skips_repository() {
        // no expectations: any repository call would panic
        let mock_repo = MockProductRepository::new();

        let controller = ProductController::new(mock_repo);
        let response = controller.get_by_id("not-an-id").await;

        assert_eq!(response.status, 400);
        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_get_by_id_found_and_missing() {
        let product = sample_product();
        let id = product.id;
        let missing = Uuid::now_v7();

        let mut mock_repo = MockProductRepository::new();
        let found = product.clone();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(found.clone()));
        mock_repo
            .expect_get_by_id()
            .with(eq(missing))
            .returning(|_| Err(ProductError::NotFound));

        let controller = ProductController::new(mock_repo);

        let response = controller.get_by_id(&id.to_string()).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.data, Some(product));

        let response = controller.get_by_id(&missing.to_string()).await;
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "Product not found");
    }

    #[tokio::test]
    async fn test_create_returns_201() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|input| Ok(Product::new(input)));

        let controller = ProductController::new(mock_repo);
        let response = controller.create(sample_input()).await;

        assert_eq!(response.status, 201);
        assert_eq!(response.message, CREATED_MESSAGE);
        let product = response.data.unwrap();
        assert_eq!(product.code, 1001);
        assert_eq!(product.thumbnail, "");
    }

    fn controller_failing_create(err: fn() -> ProductError) -> ProductController<MockProductRepository> {
        let mut mock_repo = MockProductRepository::new();
        mock_repo.expect_create().returning(move |_| Err(err()));
        ProductController::new(mock_repo)
    }

    #[tokio::test]
    async fn test_create_duplicate_and_validation_are_400() {
        let duplicate =
            controller_failing_create(|| ProductError::DuplicateKey("code 1001".to_string()));
        assert_eq!(duplicate.create(sample_input()).await.status, 400);

        let invalid = controller_failing_create(|| ProductError::Validation("name".to_string()));
        assert_eq!(invalid.create(sample_input()).await.status, 400);
    }

    #[tokio::test]
    async fn test_create_unexpected_error_is_500() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_create()
            .returning(|_| Err(ProductError::Unexpected("serializer".to_string())));

        let controller = ProductController::new(mock_repo);
        assert_eq!(controller.create(sample_input()).await.status, 500);
    }

    #[tokio::test]
    async fn test_update_merges_previous_with_supplied_fields() {
        let previous = sample_product();
        let id = previous.id;

        let mut mock_repo = MockProductRepository::new();
        let stored = previous.clone();
        mock_repo
            .expect_update()
            .withf(move |update_id, input| *update_id == id && input.price == Some(45.0))
            .returning(move |_, _| Ok(stored.clone()));

        let controller = ProductController::new(mock_repo);
        let response = controller
            .update(
                &id.to_string(),
                UpdateProduct {
                    price: Some(45.0),
                    ..Default::default()
                },
            )
            .await;

        assert_eq!(response.status, 200);
        assert_eq!(response.message, UPDATED_MESSAGE);
        let merged = response.data.unwrap();
        assert_eq!(merged.price, 45.0);
        assert_eq!(merged.name, previous.name);
        assert_eq!(merged.code, previous.code);
    }

    #[tokio::test]
    async fn test_update_error_kinds() {
        let id = Uuid::now_v7().to_string();
        let cases = [
            (ProductError::NotFound, 404),
            (ProductError::DuplicateKey("code".to_string()), 400),
            (ProductError::Validation("stock".to_string()), 400),
            (ProductError::Database("timeout".to_string()), 500),
        ];

        for (err, expected) in cases {
            let mut mock_repo = MockProductRepository::new();
            let mut err = Some(err);
            mock_repo
                .expect_update()
                .times(1)
                .returning(move |_, _| Err(err.take().unwrap_or(ProductError::NotFound)));

            let controller = ProductController::new(mock_repo);
            let response = controller.update(&id, UpdateProduct::default()).await;
            assert_eq!(response.status, expected);
        }

        let controller = ProductController::new(MockProductRepository::new());
        let response = controller.update("123", UpdateProduct::default()).await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_delete_returns_deleted_record() {
        let product = sample_product();
        let id = product.id;

        let mut mock_repo = MockProductRepository::new();
        let removed = product.clone();
        mock_repo
            .expect_delete()
            .with(eq(id))
            .returning(move |_| Ok(removed.clone()));

        let controller = ProductController::new(mock_repo);
        let response = controller.delete(&id.to_string()).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.message, DELETED_MESSAGE);
        assert_eq!(response.data, Some(product));
    }

    #[tokio::test]
    async fn test_delete_missing_and_malformed() {
        let mut mock_repo = MockProductRepository::new();
        mock_repo
            .expect_delete()
            .returning(|_| Err(ProductError::NotFound));

        let controller = ProductController::new(mock_repo);

        assert_eq!(controller.delete(&Uuid::now_v7().to_string()).await.status, 404);
        assert_eq!(controller.delete("nope").await.status, 400);
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::now_v7();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_id("507f1f77bcf86cd799439011"),
            Err(ProductError::InvalidFormat(_))
        ));
    }
}
