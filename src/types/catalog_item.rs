use rust_decimal::Decimal;

/// Literal host token stored in picture URLs until a caller-visible base is applied.
pub const PICTURE_URL_PLACEHOLDER: &str = "http://externalcatalogbaseurltobereplaced";

pub type ItemId = i64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogType {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogBrand {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub picture_file_name: String,
    pub picture_url: String,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
}

/// An item as submitted for creation. The identity is assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub picture_file_name: String,
    pub picture_url: Option<String>,
    pub catalog_type_id: i64,
    pub catalog_brand_id: i64,
}

/// Stored picture URL for an item that was created without one.
pub fn default_picture_url(id: ItemId) -> String {
    format!("{PICTURE_URL_PLACEHOLDER}/api/pic/{id}")
}
