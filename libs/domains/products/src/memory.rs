//! In-memory implementation of ProductRepository
//!
//! Mirrors the MongoDB repository: `code` is unique, listing filters and
//! sorts the same way, and an empty page is `NotFound`.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ListParams, Product, ProductPage, SortOrder, UpdateProduct};
use crate::repository::ProductRepository;

#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store; insertion order is the default listing order
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    fn duplicate_code(code: i64) -> ProductError {
        ProductError::DuplicateKey(format!("code {code} already exists"))
    }
}

fn by_price(a: &Product, b: &Product) -> Ordering {
    a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self))]
    async fn list(&self, params: ListParams) -> ProductResult<ProductPage> {
        let products = self.products.read().await;

        let mut matching: Vec<&Product> = products.iter().filter(|p| params.matches(p)).collect();
        // stable sorts keep insertion order among equal prices
        match params.sort_order() {
            Some(SortOrder::Ascending) => matching.sort_by(|a, b| by_price(a, b)),
            Some(SortOrder::Descending) => matching.sort_by(|a, b| by_price(b, a)),
            None => {}
        }

        let total_docs = matching.len() as u64;
        let skip = usize::try_from(params.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);
        let docs: Vec<Product> = matching
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();

        if docs.is_empty() {
            return Err(ProductError::NotFound);
        }

        Ok(ProductPage::new(docs, total_docs, &params))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Product> {
        let products = self.products.read().await;
        products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut products = self.products.write().await;
        if products.iter().any(|p| p.code == input.code) {
            return Err(Self::duplicate_code(input.code));
        }

        let product = Product::new(input);
        products.push(product.clone());

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProductError::NotFound)?;
        if let Some(code) = input.code {
            if products.iter().any(|p| p.code == code && p.id != id) {
                return Err(Self::duplicate_code(code));
            }
        }

        let previous = products[index].clone();
        products[index].apply_update(input);

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(previous)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProductError::NotFound)?;
        let deleted = products.remove(index);

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductStatus;

    fn input(name: &str, code: i64, price: f64) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            code,
            status: ProductStatus::Active,
            stock: 10,
            category: "lighting".to_string(),
            thumbnail: String::new(),
        }
    }

    async fn seeded() -> InMemoryProductRepository {
        let repo = InMemoryProductRepository::new();
        repo.create(input("Desk Lamp", 1, 30.0)).await.unwrap();
        repo.create(input("Floor Lamp", 2, 80.0)).await.unwrap();
        repo.create(input("Bulb", 3, 5.0)).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_code() {
        let repo = seeded().await;
        let err = repo.create(input("Other", 1, 1.0)).await.unwrap_err();
        assert!(matches!(err, ProductError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let repo = InMemoryProductRepository::new();
        let err = repo.create(input("", 1, 1.0)).await.unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[tokio::test]
    async fn test_list_defaults_to_insertion_order() {
        let repo = seeded().await;
        let page = repo.list(ListParams::default()).await.unwrap();

        let names: Vec<&str> = page.docs.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Desk Lamp", "Floor Lamp", "Bulb"]);
        assert_eq!(page.total_docs, 3);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_list_sorts_by_price() {
        let repo = seeded().await;

        let asc = repo
            .list(ListParams {
                sort: "asc".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<f64> = asc.docs.iter().map(|p| p.price).collect();
        assert_eq!(prices, [5.0, 30.0, 80.0]);

        let desc = repo
            .list(ListParams {
                sort: "desc".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let prices: Vec<f64> = desc.docs.iter().map(|p| p.price).collect();
        assert_eq!(prices, [80.0, 30.0, 5.0]);
    }

    #[tokio::test]
    async fn test_list_paginates_and_filters() {
        let repo = seeded().await;

        let page = repo
            .list(ListParams {
                page: 2,
                limit: 1,
                name: "lamp".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.docs.len(), 1);
        assert_eq!(page.docs[0].name, "Floor Lamp");
        assert_eq!(page.total_docs, 2);
        assert!(page.has_prev_page);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_list_empty_page_is_not_found() {
        let repo = seeded().await;
        let err = repo
            .list(ListParams {
                page: 5,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound));

        let empty = InMemoryProductRepository::new();
        assert!(matches!(
            empty.list(ListParams::default()).await,
            Err(ProductError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_returns_previous_and_stores_new() {
        let repo = seeded().await;
        let page = repo.list(ListParams::default()).await.unwrap();
        let id = page.docs[0].id;

        let previous = repo
            .update(
                id,
                UpdateProduct {
                    price: Some(35.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(previous.price, 30.0);

        let stored = repo.get_by_id(id).await.unwrap();
        assert_eq!(stored.price, 35.0);
        assert!(stored.updated_at >= previous.updated_at);
    }

    #[tokio::test]
    async fn test_update_rejects_code_of_another_product() {
        let repo = seeded().await;
        let page = repo.list(ListParams::default()).await.unwrap();
        let id = page.docs[0].id;

        let err = repo
            .update(
                id,
                UpdateProduct {
                    code: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::DuplicateKey(_)));

        // keeping its own code is fine
        assert!(repo
            .update(
                id,
                UpdateProduct {
                    code: Some(1),
                    ..Default::default()
                },
            )
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_taken_code_is_not_found() {
        let repo = seeded().await;

        let err = repo
            .update(
                Uuid::now_v7(),
                UpdateProduct {
                    code: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound), "{err:?}");
    }

    #[tokio::test]
    async fn test_list_huge_page_is_not_found() {
        let repo = seeded().await;
        let err = repo
            .list(ListParams {
                page: u64::MAX,
                limit: u64::MAX,
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = seeded().await;
        let id = Uuid::now_v7();

        assert!(matches!(
            repo.update(id, UpdateProduct::default()).await,
            Err(ProductError::NotFound)
        ));
        assert!(matches!(repo.delete(id).await, Err(ProductError::NotFound)));
        assert!(matches!(repo.get_by_id(id).await, Err(ProductError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_returns_removed_product() {
        let repo = seeded().await;
        let page = repo.list(ListParams::default()).await.unwrap();
        let target = page.docs[1].clone();

        let deleted = repo.delete(target.id).await.unwrap();
        assert_eq!(deleted, target);
        assert!(matches!(
            repo.get_by_id(target.id).await,
            Err(ProductError::NotFound)
        ));
    }
}
