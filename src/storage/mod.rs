pub mod seed;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{ItemFilter, ItemRange, Storage, StorageRead, StorageTx, StorageWrite};
