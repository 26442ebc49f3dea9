//! Catalog core: read-side queries, write-side commands, picture URL resolution and
//! picture file lookup. Every operation is stateless and goes through [`Storage`].
//!
//! [`Storage`]: crate::storage::Storage

pub mod command;
pub mod picture_url;
pub mod pictures;
pub mod query;

#[cfg(test)]
pub(crate) mod test_support;

pub use command::CatalogCommands;
pub use picture_url::PictureUrlResolver;
pub use pictures::PictureStore;
pub use query::CatalogQueries;

use crate::types::{CatalogError, ItemId};

pub(crate) fn require_positive_id(id: ItemId, what: &str) -> Result<(), CatalogError> {
    if id <= 0 {
        return Err(CatalogError::InvalidArgument(format!(
            "{what} id must be positive, got {id}"
        )));
    }
    Ok(())
}
