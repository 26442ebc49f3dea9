use std::io::ErrorKind;
use std::path::PathBuf;

use crate::types::{CatalogError, ItemId};

/// Item pictures stored as `shoes-{id}.png` files under one directory.
#[derive(Clone, Debug)]
pub struct PictureStore {
    root: PathBuf,
}

impl PictureStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, id: ItemId) -> PathBuf {
        self.root.join(format!("shoes-{id}.png"))
    }

    pub async fn load(&self, id: ItemId) -> Result<Vec<u8>, CatalogError> {
        super::require_positive_id(id, "picture")?;
        let path = self.path_for(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(CatalogError::NotFound(format!("picture {id}")))
            }
            Err(err) => Err(CatalogError::StoreUnavailable(format!(
                "reading {}: {}",
                path.display(),
                err
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_returns_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = PictureStore::new(dir.path());
        std::fs::write(store.path_for(3), [0x89, b'P', b'N', b'G']).unwrap();

        assert_eq!(store.load(3).await.unwrap(), vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn load_reports_missing_picture() {
        let dir = tempfile::tempdir().unwrap();
        let store = PictureStore::new(dir.path());
        assert!(matches!(
            store.load(4).await,
            Err(CatalogError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn load_rejects_non_positive_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = PictureStore::new(dir.path());
        assert!(matches!(
            store.load(0).await,
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn file_name_is_derived_from_id() {
        let store = PictureStore::new("/srv/pics");
        assert_eq!(store.path_for(12), PathBuf::from("/srv/pics/shoes-12.png"));
    }
}
