use rust_decimal::Decimal;

use crate::storage::{Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::{CatalogError, CatalogItem, ItemId, NewCatalogItem};

use super::require_positive_id;

/// Write side of the catalog. Each command runs in its own store transaction and is
/// either fully applied or not applied at all.
#[derive(Clone)]
pub struct CatalogCommands<S> {
    storage: S,
}

impl<S: Storage> CatalogCommands<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Inserts a new item and returns the identity the store assigned to it.
    pub fn create_item(&self, draft: NewCatalogItem) -> Result<ItemId, CatalogError> {
        validate_fields(&draft.name, draft.price)?;
        require_positive_id(draft.catalog_type_id, "catalog type")?;
        require_positive_id(draft.catalog_brand_id, "catalog brand")?;

        let tx = self.begin()?;
        ensure_references(&tx, draft.catalog_type_id, draft.catalog_brand_id)?;
        let id = tx.insert_item(&draft).map_err(CatalogError::from_store)?;
        tx.commit().map_err(CatalogError::from_store)?;

        log::info!("Created catalog item {} ({})", id, draft.name);
        Ok(id)
    }

    /// Overwrites every field of an existing item with `item`.
    pub fn update_item(&self, item: CatalogItem) -> Result<ItemId, CatalogError> {
        require_positive_id(item.id, "item")?;
        validate_fields(&item.name, item.price)?;
        require_positive_id(item.catalog_type_id, "catalog type")?;
        require_positive_id(item.catalog_brand_id, "catalog brand")?;

        let tx = self.begin()?;
        if tx
            .load_item(item.id)
            .map_err(CatalogError::from_store)?
            .is_none()
        {
            return Err(CatalogError::NotFound(format!("catalog item {}", item.id)));
        }
        ensure_references(&tx, item.catalog_type_id, item.catalog_brand_id)?;
        tx.replace_item(&item).map_err(CatalogError::from_store)?;
        tx.commit().map_err(CatalogError::from_store)?;

        log::info!("Updated catalog item {}", item.id);
        Ok(item.id)
    }

    pub fn delete_item(&self, id: ItemId) -> Result<(), CatalogError> {
        require_positive_id(id, "item")?;

        let tx = self.begin()?;
        let existing = tx.load_item(id).map_err(CatalogError::from_store)?;
        if existing.is_none() {
            return Err(CatalogError::NotFound(format!("catalog item {id}")));
        }
        tx.delete_item(id).map_err(CatalogError::from_store)?;
        tx.commit().map_err(CatalogError::from_store)?;

        log::info!("Deleted catalog item {}", id);
        Ok(())
    }

    fn begin(&self) -> Result<S::Tx, CatalogError> {
        self.storage.begin_tx().map_err(CatalogError::from_store)
    }
}

fn validate_fields(name: &str, price: Decimal) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::InvalidArgument(
            "item name must not be empty".to_string(),
        ));
    }
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CatalogError::InvalidArgument(format!(
            "item price must not be negative, got {price}"
        )));
    }
    Ok(())
}

fn ensure_references<T: StorageRead>(
    tx: &T,
    catalog_type_id: i64,
    catalog_brand_id: i64,
) -> Result<(), CatalogError> {
    if tx
        .load_type(catalog_type_id)
        .map_err(CatalogError::from_store)?
        .is_none()
    {
        return Err(CatalogError::InvalidArgument(format!(
            "unknown catalog type {catalog_type_id}"
        )));
    }
    if tx
        .load_brand(catalog_brand_id)
        .map_err(CatalogError::from_store)?
        .is_none()
    {
        return Err(CatalogError::InvalidArgument(format!(
            "unknown catalog brand {catalog_brand_id}"
        )));
    }
    Ok(())
}
