use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Page size used when `limit` is missing or not a positive integer
pub const DEFAULT_LIMIT: u64 = 10;
/// Page used when `page` is missing or not a positive integer
pub const DEFAULT_PAGE: u64 = 1;

/// Product status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProductStatus {
    /// Listed and available for sale
    #[default]
    Active,
    /// Hidden from the storefront
    Inactive,
    /// No longer sold
    Discontinued,
}

/// Product entity - represents a product stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Business code, unique across products
    pub code: i64,
    pub status: ProductStatus,
    pub stock: i32,
    pub category: String,
    /// Image URL or path; empty when none was supplied
    #[serde(default)]
    pub thumbnail: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub code: i64,
    #[serde(default)]
    pub status: ProductStatus,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// DTO for updating an existing product; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub code: Option<i64>,
    pub status: Option<ProductStatus>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

/// Ids are stored as hyphenated strings regardless of serializer flavor
mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Raw list query string.
///
/// Every field is kept as text so that a malformed number never rejects the
/// request; [`ListParams`] does the normalization.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Page size (default 10)
    pub limit: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Exact category match
    pub category: Option<String>,
    /// `active`, `inactive` or `discontinued`
    pub status: Option<String>,
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Minimum stock
    pub stock: Option<String>,
    /// Exact product code
    pub code: Option<String>,
    /// `asc` or `desc` by price
    pub sort: Option<String>,
}

impl ProductQuery {
    /// Build from decoded `key=value` pairs. The first value of a repeated
    /// key wins and unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "limit" => &mut query.limit,
                "page" => &mut query.page,
                "category" => &mut query.category,
                "status" => &mut query.status,
                "name" => &mut query.name,
                "stock" => &mut query.stock,
                "code" => &mut query.code,
                "sort" => &mut query.sort,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// Normalized list parameters handed to the repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u64,
    pub limit: u64,
    pub category: String,
    pub status: String,
    pub name: String,
    pub stock: String,
    pub code: Option<i64>,
    pub sort: String,
}

/// Price ordering requested through `sort`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "1" => Ok(SortOrder::Ascending),
            "desc" | "descending" | "-1" => Ok(SortOrder::Descending),
            _ => Err(()),
        }
    }
}

/// One page of list results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub docs: Vec<Product>,
    /// Products matching the filters across all pages
    pub total_docs: u64,
    pub limit: u64,
    pub page: u64,
    pub total_pages: u64,
    pub has_prev_page: bool,
    pub has_next_page: bool,
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

fn text(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string()).unwrap_or_default()
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            category: String::new(),
            status: String::new(),
            name: String::new(),
            stock: String::new(),
            code: None,
            sort: String::new(),
        }
    }
}

impl From<ProductQuery> for ListParams {
    fn from(query: ProductQuery) -> Self {
        Self {
            page: positive_or(query.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(query.limit.as_deref(), DEFAULT_LIMIT),
            code: query
                .code
                .as_deref()
                .and_then(|s| s.trim().parse::<i64>().ok())
                .filter(|code| *code != 0),
            category: text(query.category),
            status: text(query.status),
            name: text(query.name),
            stock: text(query.stock),
            sort: text(query.sort),
        }
    }
}

impl ListParams {
    /// Documents to skip before this page, capped at the largest skip
    /// MongoDB accepts
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }

    /// Whether this page starts beyond the last of `total_docs` matches
    pub fn is_past_end(&self, total_docs: u64) -> bool {
        self.skip() >= total_docs
    }

    /// Status filter; unknown values are ignored
    pub fn status_filter(&self) -> Option<ProductStatus> {
        self.status.parse().ok()
    }

    /// Minimum stock filter; non-integers are ignored
    pub fn min_stock(&self) -> Option<i32> {
        self.stock.parse().ok()
    }

    pub fn sort_order(&self) -> Option<SortOrder> {
        self.sort.parse().ok()
    }

    /// Whether `product` passes every active filter
    pub fn matches(&self, product: &Product) -> bool {
        if !self.category.is_empty() && product.category != self.category {
            return false;
        }
        if let Some(status) = self.status_filter() {
            if product.status != status {
                return false;
            }
        }
        if !self.name.is_empty()
            && !product
                .name
                .to_lowercase()
                .contains(&self.name.to_lowercase())
        {
            return false;
        }
        if let Some(min) = self.min_stock() {
            if product.stock < min {
                return false;
            }
        }
        if let Some(code) = self.code {
            if product.code != code {
                return false;
            }
        }
        true
    }
}

impl ProductPage {
    pub fn new(docs: Vec<Product>, total_docs: u64, params: &ListParams) -> Self {
        let total_pages = total_docs.div_ceil(params.limit.max(1));
        Self {
            docs,
            total_docs,
            limit: params.limit,
            page: params.page,
            total_pages,
            has_prev_page: params.page > 1,
            has_next_page: params.page < total_pages,
        }
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            code: input.code,
            status: input.status,
            stock: input.stock,
            category: input.category,
            thumbnail: input.thumbnail,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(thumbnail) = update.thumbnail {
            self.thumbnail = thumbnail;
        }
        self.updated_at = Utc::now();
    }

    /// This product with `update` layered on top; supplied fields win
    pub fn merged_with(mut self, update: UpdateProduct) -> Self {
        self.apply_update(update);
        self
    }
}
