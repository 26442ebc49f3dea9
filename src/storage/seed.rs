use anyhow::{Context, Result};
use rust_decimal::Decimal;

use super::traits::{Storage, StorageRead, StorageTx, StorageWrite};
use crate::types::NewCatalogItem;

const BRANDS: &[&str] = &["Addidas", "Puma", "Nike"];
const TYPES: &[&str] = &["Running", "Basketball", "Tennis"];

/// (name, description, price in cents, type index, brand index)
const ITEMS: &[(&str, &str, i64, usize, usize)] = &[
    ("World Star", "Shoes for next century", 19950, 1, 1),
    ("White Line", "Will make you world champions", 8850, 1, 1),
    ("Prism White", "You have already won gold medal", 12900, 1, 1),
    ("Foundation Hitech", "Olympic runner", 1200, 1, 1),
    ("Roc Tribe", "Fluid design", 3050, 1, 0),
    ("Aqua Powder", "Air Terminator", 1850, 1, 1),
    ("Rocket", "Sky is not the limit", 2450, 2, 0),
    ("Boot", "Blue feet", 1900, 0, 2),
    ("Roamer", "Trails everywhere", 14500, 0, 2),
];

/// Populates an empty catalog with the reference data set. Returns false, leaving the
/// store untouched, when any catalog type already exists.
pub fn seed_if_empty<S: Storage>(storage: &S) -> Result<bool> {
    if !storage
        .list_types()
        .context("checking for existing catalog types")?
        .is_empty()
    {
        return Ok(false);
    }

    let tx = storage.begin_tx().context("opening seed transaction")?;

    let mut brand_ids = Vec::with_capacity(BRANDS.len());
    for brand in BRANDS {
        brand_ids.push(tx.insert_brand(brand)?);
    }
    let mut type_ids = Vec::with_capacity(TYPES.len());
    for catalog_type in TYPES {
        type_ids.push(tx.insert_type(catalog_type)?);
    }

    for (index, (name, description, cents, type_idx, brand_idx)) in ITEMS.iter().enumerate() {
        tx.insert_item(&NewCatalogItem {
            name: name.to_string(),
            description: description.to_string(),
            price: Decimal::new(*cents, 2),
            picture_file_name: format!("{}.png", index + 1),
            picture_url: None,
            catalog_type_id: type_ids[*type_idx],
            catalog_brand_id: brand_ids[*brand_idx],
        })?;
    }

    tx.commit().context("committing seed data")?;
    log::info!(
        "🌱 Seeded {} brands, {} types, {} items",
        BRANDS.len(),
        TYPES.len(),
        ITEMS.len()
    );
    Ok(true)
}
