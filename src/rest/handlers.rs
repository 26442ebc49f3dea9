use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    storage::{ItemFilter, Storage},
    types::{CatalogError, ItemId, PageRequest, DEFAULT_PAGE_SIZE},
};

use super::{
    models::{
        CatalogBrandResponse, CatalogItemRequest, CatalogItemResponse, CatalogTypeResponse,
        CreatedResponse, ErrorResponse, HealthResponse, ItemsQuery, NewCatalogItemRequest,
        PageQuery, PaginatedItemsResponse,
    },
    AppState,
};

const ANY_SEGMENT: &str = "all";

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_secs,
        }),
    )
}

pub async fn list_types<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.queries.list_types() {
        Ok(types) => Json(
            types
                .into_iter()
                .map(CatalogTypeResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_brands<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> Response {
    match state.queries.list_brands() {
        Ok(brands) => Json(
            brands
                .into_iter()
                .map(CatalogBrandResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_item<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let result = parse_id(&id).and_then(|id| state.queries.get_item(id));
    match result {
        Ok(item) => Json(CatalogItemResponse::from(item)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn list_items<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    query: Result<Query<ItemsQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    let mut filter = ItemFilter::all();
    filter.catalog_type_id = query.catalog_type_id;
    filter.catalog_brand_id = query.catalog_brand_id;
    items_page(&state, query.page_index, query.page_size, filter)
}

pub async fn list_items_with_name<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    items_page(
        &state,
        query.page_index,
        query.page_size,
        ItemFilter::all().with_name_prefix(name),
    )
}

pub async fn list_items_by_type_and_brand<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path((type_id, brand_id)): Path<(String, String)>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    let filter = parse_optional_id(&type_id).and_then(|catalog_type_id| {
        parse_optional_id(&brand_id).map(|catalog_brand_id| ItemFilter {
            name_prefix: None,
            catalog_type_id,
            catalog_brand_id,
        })
    });
    match filter {
        Ok(filter) => items_page(&state, query.page_index, query.page_size, filter),
        Err(err) => error_response(err),
    }
}

pub async fn create_item<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<NewCatalogItemRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    match state.commands.create_item(body.into()) {
        Ok(id) => created(id),
        Err(err) => error_response(err),
    }
}

pub async fn update_item<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    body: Result<Json<CatalogItemRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return rejected(rejection.body_text()),
    };
    match state.commands.update_item(body.into()) {
        Ok(id) => created(id),
        Err(err) => error_response(err),
    }
}

pub async fn delete_item<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let result = parse_id(&id).and_then(|id| state.commands.delete_item(id));
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn get_picture<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return error_response(err),
    };
    match state.pictures.load(id).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/png")], bytes).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}

fn items_page<S: Storage + Clone + Send + Sync + 'static>(
    state: &AppState<S>,
    page_index: Option<i64>,
    page_size: Option<i64>,
    filter: ItemFilter,
) -> Response {
    let page = PageRequest::new(
        page_index.unwrap_or(0),
        page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    );
    match page.and_then(|page| state.queries.list_items(page, &filter)) {
        Ok(page) => Json(PaginatedItemsResponse::from(page)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Malformed query strings and bodies get the same JSON 400 as other bad input.
fn rejected(message: String) -> Response {
    error_response(CatalogError::InvalidArgument(message))
}

fn created(id: ItemId) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/catalog/items/{id}"))],
        Json(CreatedResponse { id }),
    )
        .into_response()
}

fn parse_id(raw: &str) -> Result<ItemId, CatalogError> {
    raw.trim()
        .parse::<ItemId>()
        .map_err(|err| CatalogError::InvalidArgument(format!("invalid id {raw:?}: {err}")))
}

/// `all` leaves the corresponding filter out.
fn parse_optional_id(raw: &str) -> Result<Option<i64>, CatalogError> {
    if raw.eq_ignore_ascii_case(ANY_SEGMENT) {
        return Ok(None);
    }
    parse_id(raw).map(Some)
}

fn error_response(err: CatalogError) -> Response {
    let (status, message) = match &err {
        CatalogError::InvalidArgument(message) => {
            log::warn!("Rejected catalog request: {}", message);
            (StatusCode::BAD_REQUEST, message.clone())
        }
        CatalogError::NotFound(message) => (StatusCode::NOT_FOUND, format!("{message} not found")),
        CatalogError::ConstraintViolation(_) | CatalogError::StoreUnavailable(_) => {
            log::error!("Catalog request failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    };
    (status, Json(ErrorResponse { message })).into_response()
}
