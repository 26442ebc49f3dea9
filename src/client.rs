//! Typed HTTP client for the catalog REST API, used by storefront front ends that browse
//! and edit the catalog remotely. Request and response bodies are the `rest::models`
//! wire types, so both ends share one definition of the JSON shapes.

use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::rest::models::{
    CatalogBrandResponse, CatalogItemRequest, CatalogItemResponse, CatalogTypeResponse,
    CreatedResponse, ErrorResponse, NewCatalogItemRequest, PaginatedItemsResponse,
};
use crate::types::ItemId;

const ANY_SEGMENT: &str = "all";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid catalog base url {0:?}")]
    BaseUrl(String),
    #[error("catalog request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("catalog api returned {status}: {message}")]
    Api { status: StatusCode, message: String },
}

impl ClientError {
    /// HTTP status of an API-level failure.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: Client,
    base: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let base = Url::parse(base_url).map_err(|_| ClientError::BaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base })
    }

    pub async fn get_types(&self) -> ClientResult<Vec<CatalogTypeResponse>> {
        let url = self.url(&["api", "catalog", "catalogtypes"])?;
        json(self.http.get(url).send().await?).await
    }

    pub async fn get_brands(&self) -> ClientResult<Vec<CatalogBrandResponse>> {
        let url = self.url(&["api", "catalog", "catalogbrands"])?;
        json(self.http.get(url).send().await?).await
    }

    /// One page of items, optionally narrowed to a brand and/or a type.
    pub async fn get_catalog_items(
        &self,
        page_index: u32,
        page_size: u32,
        brand: Option<i64>,
        catalog_type: Option<i64>,
    ) -> ClientResult<PaginatedItemsResponse> {
        let type_segment = segment(catalog_type);
        let brand_segment = segment(brand);
        let url = self.url(&[
            "api",
            "catalog",
            "items",
            "type",
            &type_segment,
            "brand",
            &brand_segment,
        ])?;
        let request = self
            .http
            .get(url)
            .query(&[("pageIndex", page_index), ("pageSize", page_size)]);
        json(request.send().await?).await
    }

    pub async fn get_items_with_name(
        &self,
        name: &str,
        page_index: u32,
        page_size: u32,
    ) -> ClientResult<PaginatedItemsResponse> {
        let url = self.url(&["api", "catalog", "items", "withname", name])?;
        let request = self
            .http
            .get(url)
            .query(&[("pageIndex", page_index), ("pageSize", page_size)]);
        json(request.send().await?).await
    }

    pub async fn get_item(&self, id: ItemId) -> ClientResult<CatalogItemResponse> {
        let url = self.url(&["api", "catalog", "items", &id.to_string()])?;
        json(self.http.get(url).send().await?).await
    }

    pub async fn create_item(&self, item: &NewCatalogItemRequest) -> ClientResult<ItemId> {
        let url = self.url(&["api", "catalog", "items"])?;
        let created: CreatedResponse = json(self.http.post(url).json(item).send().await?).await?;
        Ok(created.id)
    }

    pub async fn update_item(&self, item: &CatalogItemRequest) -> ClientResult<ItemId> {
        let url = self.url(&["api", "catalog", "items"])?;
        let updated: CreatedResponse = json(self.http.put(url).json(item).send().await?).await?;
        Ok(updated.id)
    }

    pub async fn delete_item(&self, id: ItemId) -> ClientResult<()> {
        let url = self.url(&["api", "catalog", "items", &id.to_string()])?;
        checked(self.http.delete(url).send().await?).await?;
        Ok(())
    }

    pub async fn get_picture(&self, id: ItemId) -> ClientResult<Vec<u8>> {
        let url = self.url(&["api", "pic", &id.to_string()])?;
        let response = checked(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Appends percent-encoded path segments to the base URL.
    fn url(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::BaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn segment(id: Option<i64>) -> String {
    id.map_or_else(|| ANY_SEGMENT.to_string(), |id| id.to_string())
}

async fn checked(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|err| err.message)
        .unwrap_or(body);
    Err(ClientError::Api { status, message })
}

async fn json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(checked(response).await?.json().await?)
}
