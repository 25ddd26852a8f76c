//! HTTP handlers for Products API

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use axum_helpers::{errors::method_not_allowed, StatusResponse};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::controller::{error_response, ProductController};
use crate::models::{
    CreateProduct, Product, ProductPage, ProductQuery, ProductStatus, UpdateProduct,
};
use crate::repository::ProductRepository;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(schemas(Product, ProductPage, CreateProduct, UpdateProduct, ProductStatus)),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(controller: ProductController<R>) -> Router {
    let shared_controller = Arc::new(controller);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_controller)
}

/// List products with optional filters and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "One page of products", body = StatusResponse<ProductPage>),
        (status = 404, description = "No product on the requested page"),
        (status = 500, description = "Storage failure")
    )
)]
async fn list_products<R: ProductRepository>(
    State(controller): State<Arc<ProductController<R>>>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> StatusResponse<ProductPage> {
    // an unreadable query string lists with defaults
    let query = match pairs {
        Ok(Query(pairs)) => ProductQuery::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Ignoring unreadable query string");
            ProductQuery::default()
        }
    };
    controller.list(query).await
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = StatusResponse<Product>),
        (status = 400, description = "Invalid body or duplicate code"),
        (status = 500, description = "Storage failure")
    )
)]
async fn create_product<R: ProductRepository>(
    State(controller): State<Arc<ProductController<R>>>,
    body: Result<Json<CreateProduct>, JsonRejection>,
) -> StatusResponse<Product> {
    match body {
        Ok(Json(input)) => controller.create(input).await,
        Err(rejection) => error_response(rejection.into()),
    }
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = StatusResponse<Product>),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Storage failure")
    )
)]
async fn get_product<R: ProductRepository>(
    State(controller): State<Arc<ProductController<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> StatusResponse<Product> {
    match id {
        Ok(Path(id)) => controller.get_by_id(&id).await,
        Err(rejection) => error_response(rejection.into()),
    }
}

/// Update a product
///
/// The response carries the previously stored product overlaid with the
/// supplied fields.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = StatusResponse<Product>),
        (status = 400, description = "Malformed ID, invalid body or duplicate code"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Storage failure")
    )
)]
async fn update_product<R: ProductRepository>(
    State(controller): State<Arc<ProductController<R>>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateProduct>, JsonRejection>,
) -> StatusResponse<Product> {
    let Path(id) = match id {
        Ok(id) => id,
        Err(rejection) => return error_response(rejection.into()),
    };
    match body {
        Ok(Json(input)) => controller.update(&id, input).await,
        Err(rejection) => error_response(rejection.into()),
    }
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = StatusResponse<Product>),
        (status = 400, description = "Malformed product ID"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Storage failure")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(controller): State<Arc<ProductController<R>>>,
    id: Result<Path<String>, PathRejection>,
) -> StatusResponse<Product> {
    match id {
        Ok(Path(id)) => controller.delete(&id).await,
        Err(rejection) => error_response(rejection.into()),
    }
}
