use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CatalogBrand, CatalogItem, CatalogType, NewCatalogItem, Page};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct CatalogTypeResponse {
    pub id: i64,
    #[serde(rename = "type")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct CatalogBrandResponse {
    pub id: i64,
    #[serde(rename = "brand")]
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub picture_file_name: String,
    pub picture_url: String,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedItemsResponse {
    pub page_index: u32,
    pub page_size: u32,
    pub count: u64,
    pub data: Vec<CatalogItemResponse>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Paging-only query string for the name and type/brand listing routes.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageQuery {
    pub page_size: Option<i64>,
    pub page_index: Option<i64>,
}

/// Query string of the unfiltered item listing route.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemsQuery {
    pub page_size: Option<i64>,
    pub page_index: Option<i64>,
    pub catalog_type_id: Option<i64>,
    pub catalog_brand_id: Option<i64>,
}

/// Body of a create request. Any `id` sent by the caller is ignored.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewCatalogItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub picture_file_name: String,
    #[serde(default)]
    pub picture_url: Option<String>,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
}

/// Body of an update request: the complete item, replacing every stored field.
/// Every field is required.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemRequest {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub picture_file_name: String,
    pub picture_url: String,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
}

impl From<CatalogType> for CatalogTypeResponse {
    fn from(value: CatalogType) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CatalogBrand> for CatalogBrandResponse {
    fn from(value: CatalogBrand) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            picture_file_name: item.picture_file_name,
            picture_url: item.picture_url,
            catalog_type_id: item.catalog_type_id,
            catalog_brand_id: item.catalog_brand_id,
        }
    }
}

impl From<Page<CatalogItem>> for PaginatedItemsResponse {
    fn from(page: Page<CatalogItem>) -> Self {
        Self {
            page_index: page.page_index,
            page_size: page.page_size,
            count: page.total_count,
            data: page.data.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<NewCatalogItemRequest> for NewCatalogItem {
    fn from(req: NewCatalogItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            picture_file_name: req.picture_file_name,
            picture_url: req.picture_url,
            catalog_type_id: req.catalog_type_id,
            catalog_brand_id: req.catalog_brand_id,
        }
    }
}

impl From<CatalogItemRequest> for CatalogItem {
    fn from(req: CatalogItemRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            description: req.description,
            price: req.price,
            picture_file_name: req.picture_file_name,
            picture_url: req.picture_url,
            catalog_type_id: req.catalog_type_id,
            catalog_brand_id: req.catalog_brand_id,
        }
    }
}
