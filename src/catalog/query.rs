use crate::storage::{ItemFilter, ItemRange, Storage};
use crate::types::{CatalogBrand, CatalogError, CatalogItem, CatalogType, ItemId, Page, PageRequest};

use super::{require_positive_id, PictureUrlResolver};

/// Read side of the catalog. Items leave this type only with resolved picture URLs.
#[derive(Clone)]
pub struct CatalogQueries<S> {
    storage: S,
    pictures: PictureUrlResolver,
}

impl<S: Storage> CatalogQueries<S> {
    pub fn new(storage: S, pictures: PictureUrlResolver) -> Self {
        Self { storage, pictures }
    }

    pub fn list_types(&self) -> Result<Vec<CatalogType>, CatalogError> {
        self.storage.list_types().map_err(CatalogError::from_store)
    }

    pub fn list_brands(&self) -> Result<Vec<CatalogBrand>, CatalogError> {
        self.storage.list_brands().map_err(CatalogError::from_store)
    }

    pub fn get_item(&self, id: ItemId) -> Result<CatalogItem, CatalogError> {
        require_positive_id(id, "item")?;
        match self.storage.load_item(id).map_err(CatalogError::from_store)? {
            Some(item) => Ok(self.pictures.resolve_item(item)),
            None => Err(CatalogError::NotFound(format!("catalog item {id}"))),
        }
    }

    /// One page of the items matching `filter`, ordered by name then id.
    /// `total_count` counts every match regardless of the page window.
    pub fn list_items(
        &self,
        page: PageRequest,
        filter: &ItemFilter,
    ) -> Result<Page<CatalogItem>, CatalogError> {
        validate_filter(filter)?;

        let total_count = self
            .storage
            .count_items(filter)
            .map_err(CatalogError::from_store)?;

        // Skip the range fetch when the window starts past the last match.
        let data = if page.offset() >= total_count {
            Vec::new()
        } else {
            let range = ItemRange {
                offset: page.offset(),
                limit: page.limit(),
            };
            self.storage
                .list_items(filter, range)
                .map_err(CatalogError::from_store)?
        };

        Ok(Page::new(page, total_count, data).map(|item| self.pictures.resolve_item(item)))
    }
}

fn validate_filter(filter: &ItemFilter) -> Result<(), CatalogError> {
    if filter.name_prefix.as_deref() == Some("") {
        return Err(CatalogError::InvalidArgument(
            "name filter must not be empty".to_string(),
        ));
    }
    if let Some(id) = filter.catalog_type_id {
        require_positive_id(id, "catalog type")?;
    }
    if let Some(id) = filter.catalog_brand_id {
        require_positive_id(id, "catalog brand")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{Fixture, BASE_URL};
    use crate::storage::SqliteStorage;

    fn queries(fixture: &Fixture) -> CatalogQueries<SqliteStorage> {
        CatalogQueries::new(
            fixture.storage.clone(),
            PictureUrlResolver::new(BASE_URL).unwrap(),
        )
    }

    fn names(page: &Page<CatalogItem>) -> Vec<&str> {
        page.data.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn get_item_rejects_non_positive_ids() {
        let fixture = Fixture::new();
        let queries = queries(&fixture);
        for id in [0, -5] {
            assert!(matches!(
                queries.get_item(id),
                Err(CatalogError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn get_item_reports_missing_item() {
        let fixture = Fixture::new();
        assert!(matches!(
            queries(&fixture).get_item(42),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn get_item_resolves_picture_url() {
        let fixture = Fixture::new();
        let id = fixture.insert("Roamer", 1, 1);

        let item = queries(&fixture).get_item(id).unwrap();
        assert_eq!(item.picture_url, format!("{BASE_URL}/api/pic/{id}"));
    }

    #[test]
    fn name_prefix_filter_matches_and_orders() {
        let fixture = Fixture::new();
        fixture.insert("Roamer", 1, 1);
        fixture.insert("Boot", 1, 1);
        fixture.insert("Rocket", 1, 1);

        let page = queries(&fixture)
            .list_items(
                PageRequest::new(0, 10).unwrap(),
                &ItemFilter::all().with_name_prefix("Ro"),
            )
            .unwrap();
        assert_eq!(names(&page), vec!["Roamer", "Rocket"]);
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn type_and_brand_filters_are_conjunctive() {
        let fixture = Fixture::new();
        fixture.insert("Both", 2, 3);
        fixture.insert("TypeOnly", 2, 1);
        fixture.insert("BrandOnly", 1, 3);
        fixture.insert("Neither", 1, 1);
        // Brand 2 equals the type id; a brand filter compared against the type would match it.
        fixture.insert("BrandTwo", 2, 2);

        let page = queries(&fixture)
            .list_items(
                PageRequest::new(0, 10).unwrap(),
                &ItemFilter::all().with_type(2).with_brand(3),
            )
            .unwrap();
        assert_eq!(names(&page), vec!["Both"]);
        assert_eq!(page.total_count, 1);
    }

    #[test]
    fn page_length_follows_total_count() {
        let fixture = Fixture::new();
        for i in 0..14 {
            fixture.insert(&format!("Item {i:02}"), 1, 1);
        }
        let queries = queries(&fixture);

        for (page_index, page_size) in [(0, 6), (1, 6), (2, 6), (3, 6), (0, 20), (6, 2), (7, 2)] {
            let page = queries
                .list_items(
                    PageRequest::new(page_index, page_size).unwrap(),
                    &ItemFilter::all(),
                )
                .unwrap();
            let expected = page_size.min((14 - page_index * page_size).max(0)) as usize;
            assert_eq!(page.total_count, 14);
            assert_eq!(page.data.len(), expected, "page {page_index} of {page_size}");
        }
    }

    #[test]
    fn pages_are_disjoint_and_ordered() {
        let fixture = Fixture::new();
        for name in ["Delta", "Alpha", "Charlie", "Bravo", "Echo"] {
            fixture.insert(name, 1, 1);
        }
        let queries = queries(&fixture);

        let first = queries
            .list_items(PageRequest::new(0, 2).unwrap(), &ItemFilter::all())
            .unwrap();
        let second = queries
            .list_items(PageRequest::new(1, 2).unwrap(), &ItemFilter::all())
            .unwrap();
        let third = queries
            .list_items(PageRequest::new(2, 2).unwrap(), &ItemFilter::all())
            .unwrap();
        assert_eq!(names(&first), vec!["Alpha", "Bravo"]);
        assert_eq!(names(&second), vec!["Charlie", "Delta"]);
        assert_eq!(names(&third), vec!["Echo"]);
        assert_eq!(third.page_index, 2);
        assert_eq!(third.page_size, 2);
    }

    #[test]
    fn page_past_the_end_is_empty_with_count() {
        let fixture = Fixture::new();
        fixture.insert("Roamer", 1, 1);
        fixture.insert("Boot", 1, 1);

        let page = queries(&fixture)
            .list_items(PageRequest::new(100, 6).unwrap(), &ItemFilter::all())
            .unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn every_listed_item_has_resolved_picture_url() {
        let fixture = Fixture::new();
        fixture.insert("Roamer", 1, 1);
        fixture.insert("Boot", 1, 1);

        let page = queries(&fixture)
            .list_items(PageRequest::default(), &ItemFilter::all())
            .unwrap();
        assert_eq!(page.data.len(), 2);
        for item in &page.data {
            assert!(item.picture_url.starts_with(BASE_URL));
            assert!(!item
                .picture_url
                .contains(crate::types::PICTURE_URL_PLACEHOLDER));
        }
    }

    #[test]
    fn empty_name_filter_is_rejected() {
        let fixture = Fixture::new();
        assert!(matches!(
            queries(&fixture).list_items(
                PageRequest::default(),
                &ItemFilter::all().with_name_prefix("")
            ),
            Err(CatalogError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lists_reference_data() {
        let fixture = Fixture::new();
        let queries = queries(&fixture);
        let types: Vec<_> = queries
            .list_types()
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(types, vec!["Running", "Basketball", "Tennis"]);
        assert_eq!(queries.list_brands().unwrap().len(), 3);
    }

    #[test]
    fn unavailable_store_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let storage = SqliteStorage::new(dir.path());
        let queries = CatalogQueries::new(storage, PictureUrlResolver::new(BASE_URL).unwrap());
        assert!(matches!(
            queries.list_types(),
            Err(CatalogError::StoreUnavailable(_))
        ));
    }
}
