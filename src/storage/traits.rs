use anyhow::Result;

use crate::types::{CatalogBrand, CatalogItem, CatalogType, ItemId, NewCatalogItem};

/// Conjunction of optional item predicates. An empty filter matches every item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub name_prefix: Option<String>,
    pub catalog_type_id: Option<i64>,
    pub catalog_brand_id: Option<i64>,
}

impl ItemFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = Some(prefix.into());
        self
    }

    pub fn with_type(mut self, catalog_type_id: i64) -> Self {
        self.catalog_type_id = Some(catalog_type_id);
        self
    }

    pub fn with_brand(mut self, catalog_brand_id: i64) -> Self {
        self.catalog_brand_id = Some(catalog_brand_id);
        self
    }
}

/// Window over the `name ASC, id ASC` ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemRange {
    pub offset: u64,
    pub limit: u64,
}

pub trait StorageRead {
    fn list_types(&self) -> Result<Vec<CatalogType>>;
    fn list_brands(&self) -> Result<Vec<CatalogBrand>>;
    fn load_type(&self, id: i64) -> Result<Option<CatalogType>>;
    fn load_brand(&self, id: i64) -> Result<Option<CatalogBrand>>;
    fn load_item(&self, id: ItemId) -> Result<Option<CatalogItem>>;
    fn count_items(&self, filter: &ItemFilter) -> Result<u64>;
    fn list_items(&self, filter: &ItemFilter, range: ItemRange) -> Result<Vec<CatalogItem>>;
}

pub trait StorageWrite {
    fn insert_type(&self, name: &str) -> Result<i64>;
    fn insert_brand(&self, name: &str) -> Result<i64>;
    /// Inserts the draft and returns the identity assigned by the store.
    fn insert_item(&self, item: &NewCatalogItem) -> Result<ItemId>;
    /// Overwrites every column of the row with `item.id`. Returns the affected row count.
    fn replace_item(&self, item: &CatalogItem) -> Result<usize>;
    fn delete_item(&self, id: ItemId) -> Result<usize>;
}

pub trait StorageTx: StorageRead + StorageWrite {
    fn commit(self) -> Result<()>;
}

pub trait Storage: StorageRead {
    type Tx: StorageTx;

    fn begin_tx(&self) -> Result<Self::Tx>;
}
