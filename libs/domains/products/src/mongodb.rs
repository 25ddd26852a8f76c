//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_bson, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, ListParams, Product, ProductPage, SortOrder, UpdateProduct};
use crate::repository::ProductRepository;

/// Default collection name
pub const COLLECTION_NAME: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Create a repository over a custom collection name
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the indexes the repository relies on.
    ///
    /// The unique index on `code` is what turns a colliding insert or update
    /// into a duplicate key error.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_code_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "category": 1, "status": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category_status".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_price".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// Build a MongoDB filter document from list parameters
    fn build_filter(params: &ListParams) -> Document {
        let mut filter = doc! {};

        if !params.category.is_empty() {
            filter.insert("category", params.category.as_str());
        }

        if let Some(status) = params.status_filter() {
            filter.insert("status", status.to_string());
        }

        if !params.name.is_empty() {
            filter.insert(
                "name",
                doc! { "$regex": regex::escape(&params.name), "$options": "i" },
            );
        }

        if let Some(min) = params.min_stock() {
            filter.insert("stock", doc! { "$gte": min });
        }

        if let Some(code) = params.code {
            filter.insert("code", code);
        }

        filter
    }

    /// UUID v7 ids sort in creation order, so `_id` is the tiebreaker
    fn build_sort(params: &ListParams) -> Document {
        match params.sort_order() {
            Some(SortOrder::Ascending) => doc! { "price": 1, "_id": 1 },
            Some(SortOrder::Descending) => doc! { "price": -1, "_id": 1 },
            None => doc! { "_id": 1 },
        }
    }

    /// `$set` document holding only the supplied fields plus `updated_at`
    fn build_update(input: &UpdateProduct) -> ProductResult<Document> {
        let mut set = doc! {};

        if let Some(ref name) = input.name {
            set.insert("name", name.as_str());
        }
        if let Some(ref description) = input.description {
            set.insert("description", description.as_str());
        }
        if let Some(price) = input.price {
            set.insert("price", price);
        }
        if let Some(code) = input.code {
            set.insert("code", code);
        }
        if let Some(status) = input.status {
            set.insert("status", status.to_string());
        }
        if let Some(stock) = input.stock {
            set.insert("stock", stock);
        }
        if let Some(ref category) = input.category {
            set.insert("category", category.as_str());
        }
        if let Some(ref thumbnail) = input.thumbnail {
            set.insert("thumbnail", thumbnail.as_str());
        }
        set.insert("updated_at", to_bson(&Utc::now())?);

        Ok(doc! { "$set": set })
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn list(&self, params: ListParams) -> ProductResult<ProductPage> {
        let filter = Self::build_filter(&params);
        let limit = i64::try_from(params.limit).unwrap_or(i64::MAX);

        let total_docs = self.collection.count_documents(filter.clone()).await?;
        if params.is_past_end(total_docs) {
            return Err(ProductError::NotFound);
        }

        let cursor = self
            .collection
            .find(filter)
            .sort(Self::build_sort(&params))
            .skip(params.skip())
            .limit(limit)
            .await?;
        let docs: Vec<Product> = cursor.try_collect().await?;

        if docs.is_empty() {
            return Err(ProductError::NotFound);
        }

        Ok(ProductPage::new(docs, total_docs, &params))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Product> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .ok_or(ProductError::NotFound)
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;
        let product = Product::new(input);

        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        input.validate()?;

        let previous = self
            .collection
            .find_one_and_update(Self::id_filter(id), Self::build_update(&input)?)
            .return_document(ReturnDocument::Before)
            .await?
            .ok_or(ProductError::NotFound)?;

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(previous)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<Product> {
        let deleted = self
            .collection
            .find_one_and_delete(Self::id_filter(id))
            .await?
            .ok_or(ProductError::NotFound)?;

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(deleted)
    }
}
