use anyhow::{Context, Result};

use crate::catalog::{CatalogCommands, CatalogQueries, PictureStore, PictureUrlResolver};
use crate::configuration::Configuration;
use crate::rest::AppState;
use crate::storage::{self, SqliteStorage};

pub fn init_data_dir(config: &Configuration) -> Result<()> {
    std::fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;
    std::fs::create_dir_all(&config.pics_dir)
        .with_context(|| format!("creating pics dir {}", config.pics_dir.display()))?;
    Ok(())
}

pub fn init_storage(config: &Configuration) -> Result<SqliteStorage> {
    let sqlite = SqliteStorage::new(config.db_path());
    if config.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;
    if config.seed {
        storage::seed::seed_if_empty(&sqlite).context("seeding catalog")?;
    }
    Ok(sqlite)
}

pub fn build_resolver(config: &Configuration) -> Result<PictureUrlResolver> {
    PictureUrlResolver::new(config.external_base_url.clone()).context("invalid external base url")
}

pub fn build_state(
    config: &Configuration,
    storage: SqliteStorage,
    resolver: PictureUrlResolver,
) -> AppState<SqliteStorage> {
    AppState {
        queries: CatalogQueries::new(storage.clone(), resolver),
        commands: CatalogCommands::new(storage),
        pictures: PictureStore::new(&config.pics_dir),
        started_at: std::time::SystemTime::now(),
    }
}
