use std::net::SocketAddr;

use axum::{routing::get, Router};

use crate::catalog::{CatalogCommands, CatalogQueries, PictureStore};
use crate::storage::Storage;

mod handlers;
pub mod models;

use handlers::{
    create_item, delete_item, get_item, get_picture, health, list_brands, list_items,
    list_items_by_type_and_brand, list_items_with_name, list_types, not_found, update_item,
};

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub queries: CatalogQueries<S>,
    pub commands: CatalogCommands<S>,
    pub pictures: PictureStore,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health::<S>))
        .route("/api/catalog/catalogtypes", get(list_types::<S>))
        .route("/api/catalog/catalogbrands", get(list_brands::<S>))
        .route(
            "/api/catalog/items",
            get(list_items::<S>)
                .post(create_item::<S>)
                .put(update_item::<S>),
        )
        .route(
            "/api/catalog/items/:id",
            get(get_item::<S>).delete(delete_item::<S>),
        )
        .route(
            "/api/catalog/items/withname/:name",
            get(list_items_with_name::<S>),
        )
        .route(
            "/api/catalog/items/type/:catalog_type_id/brand/:catalog_brand_id",
            get(list_items_by_type_and_brand::<S>),
        )
        .route("/api/pic/:id", get(get_picture::<S>))
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    state: AppState<S>,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    log::info!("🌐 REST service on http://{}", addr);

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
