mod catalog_error;
mod catalog_item;
mod page;

pub use catalog_error::CatalogError;
pub use catalog_item::{
    default_picture_url, CatalogBrand, CatalogItem, CatalogType, ItemId, NewCatalogItem,
    PICTURE_URL_PLACEHOLDER,
};
pub use page::{Page, PageRequest, DEFAULT_PAGE_SIZE};
