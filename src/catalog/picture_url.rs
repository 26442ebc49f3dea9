use crate::types::{CatalogError, CatalogItem, PICTURE_URL_PLACEHOLDER};

/// Replaces the placeholder host token with `base`. Every occurrence is replaced, not
/// only the first.
///
/// A second pass is a no-op for the stored form this service writes (one leading token).
/// That does not hold for arbitrary input: a base sharing characters with the token can
/// join with neighbouring text into a fresh token.
pub fn resolve(url: &str, base: &str) -> String {
    if !url.contains(PICTURE_URL_PLACEHOLDER) {
        return url.to_string();
    }
    url.replace(PICTURE_URL_PLACEHOLDER, base)
}

/// Rewrites stored picture URLs against the configured external base URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PictureUrlResolver {
    base: String,
}

impl PictureUrlResolver {
    pub fn new(base: impl Into<String>) -> Result<Self, CatalogError> {
        let base = base.into();
        if base.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "external base url must not be empty".to_string(),
            ));
        }
        if base.contains(PICTURE_URL_PLACEHOLDER) {
            return Err(CatalogError::InvalidArgument(format!(
                "external base url must not contain {PICTURE_URL_PLACEHOLDER}"
            )));
        }
        Ok(Self { base })
    }

    pub fn resolve(&self, url: &str) -> String {
        resolve(url, &self.base)
    }

    pub fn resolve_item(&self, mut item: CatalogItem) -> CatalogItem {
        item.picture_url = self.resolve(&item.picture_url);
        item
    }
}
