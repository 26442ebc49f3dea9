use rust_decimal::Decimal;
use tempfile::TempDir;

use crate::storage::{SqliteStorage, Storage, StorageTx, StorageWrite};
use crate::types::{ItemId, NewCatalogItem};

pub const BASE_URL: &str = "http://catalog.test";

/// A migrated store in a scratch directory with types 1..=3 and brands 1..=3.
pub struct Fixture {
    pub storage: SqliteStorage,
    _dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let storage = SqliteStorage::new(dir.path().join("catalog.sqlite"));
        storage.init().unwrap();

        let tx = storage.begin_tx().unwrap();
        for name in ["Running", "Basketball", "Tennis"] {
            tx.insert_type(name).unwrap();
        }
        for name in ["Addidas", "Puma", "Nike"] {
            tx.insert_brand(name).unwrap();
        }
        tx.commit().unwrap();

        Self { storage, _dir: dir }
    }

    pub fn insert(&self, name: &str, type_id: i64, brand_id: i64) -> ItemId {
        let tx = self.storage.begin_tx().unwrap();
        let id = tx.insert_item(&draft(name, type_id, brand_id)).unwrap();
        tx.commit().unwrap();
        id
    }
}

pub fn draft(name: &str, type_id: i64, brand_id: i64) -> NewCatalogItem {
    NewCatalogItem {
        name: name.to_string(),
        description: format!("{name} shoes"),
        price: Decimal::new(4999, 2),
        picture_file_name: format!("{name}.png"),
        picture_url: None,
        catalog_type_id: type_id,
        catalog_brand_id: brand_id,
    }
}
