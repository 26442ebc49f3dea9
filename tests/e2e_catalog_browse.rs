mod common;

use std::collections::HashSet;

use axum::http::StatusCode;
use product_catalog::rest::models::{
    CatalogBrandResponse, CatalogItemResponse, CatalogTypeResponse, PaginatedItemsResponse,
};

#[tokio::test]
async fn seeded_catalog_pages_cover_every_item_once() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::app(dir.path(), true);

    let first: PaginatedItemsResponse =
        common::json(common::send(&app, "GET", "/api/catalog/items?pageSize=4", None).await).await;
    let total = first.count;
    assert!(total > 4);

    let mut seen = HashSet::new();
    let mut previous_name: Option<String> = None;
    let pages = (total + 3) / 4;
    for page_index in 0..pages {
        let page: PaginatedItemsResponse = common::json(
            common::send(
                &app,
                "GET",
                &format!("/api/catalog/items?pageSize=4&pageIndex={page_index}"),
                None,
            )
            .await,
        )
        .await;
        assert_eq!(page.count, total);
        let expected = 4u64.min(total - page_index * 4);
        assert_eq!(page.data.len() as u64, expected);
        for item in page.data {
            if let Some(previous) = &previous_name {
                assert!(previous <= &item.name, "{previous} > {}", item.name);
            }
            assert!(item.picture_url.starts_with(common::BASE_URL));
            previous_name = Some(item.name.clone());
            assert!(seen.insert(item.id));
        }
    }
    assert_eq!(seen.len() as u64, total);
}

#[tokio::test]
async fn page_beyond_the_end_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::app(dir.path(), true);

    let response =
        common::send(&app, "GET", "/api/catalog/items?pageIndex=100&pageSize=6", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let page: PaginatedItemsResponse = common::json(response).await;
    assert!(page.data.is_empty());
    assert!(page.count > 0);
    assert_eq!(page.page_index, 100);
}

#[tokio::test]
async fn name_prefix_search_on_seeded_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::app(dir.path(), true);

    let page: PaginatedItemsResponse = common::json(
        common::send(&app, "GET", "/api/catalog/items/withname/Ro?pageSize=10", None).await,
    )
    .await;
    let names: Vec<_> = page.data.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Roamer", "Roc Tribe", "Rocket"]);
    assert_eq!(page.count, 3);
}

#[tokio::test]
async fn type_and_brand_filters_intersect() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::app(dir.path(), true);

    let types: Vec<CatalogTypeResponse> =
        common::json(common::send(&app, "GET", "/api/catalog/catalogtypes", None).await).await;
    let brands: Vec<CatalogBrandResponse> =
        common::json(common::send(&app, "GET", "/api/catalog/catalogbrands", None).await).await;
    let running = types.iter().find(|t| t.name == "Running").unwrap().id;
    let nike = brands.iter().find(|b| b.name == "Nike").unwrap().id;

    let page: PaginatedItemsResponse = common::json(
        common::send(
            &app,
            "GET",
            &format!("/api/catalog/items/type/{running}/brand/{nike}?pageSize=20"),
            None,
        )
        .await,
    )
    .await;
    assert!(page.count > 0);
    for item in &page.data {
        assert_eq!(item.catalog_type_id, running);
        assert_eq!(item.catalog_brand_id, nike);
    }

    let by_type: PaginatedItemsResponse = common::json(
        common::send(
            &app,
            "GET",
            &format!("/api/catalog/items?catalogTypeId={running}&pageSize=20"),
            None,
        )
        .await,
    )
    .await;
    assert!(by_type.count >= page.count);
    assert!(by_type
        .data
        .iter()
        .all(|item: &CatalogItemResponse| item.catalog_type_id == running));
}
