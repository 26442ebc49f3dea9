mod wiring;

use crate::{
    catalog::PictureUrlResolver, cli, configuration::Configuration, context, rest,
    storage::SqliteStorage,
};
use anyhow::{Context as AnyhowContext, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The running service: configuration plus the storage it was wired against.
pub struct App {
    config: Configuration,
    storage: SqliteStorage,
    resolver: PictureUrlResolver,
    shutdown: CancellationToken,
}

impl App {
    /// Parses the CLI and performs the start-up side effects: log file, directories,
    /// storage initialization and optional seeding.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();

        let ctx = context::Context::from_cli(&cli);
        crate::tracing::set_log_file(ctx.config.log_file.as_deref())
            .context("opening log file")?;
        log_startup_info(&ctx.config);

        let app = App::new(ctx.config)?;
        Ok((app, cli))
    }

    /// Fails on an unusable base URL before touching the data dir, so a bad
    /// configuration never resets or seeds the database.
    pub fn new(config: Configuration) -> Result<Self> {
        let resolver = wiring::build_resolver(&config)?;
        wiring::init_data_dir(&config).context("initializing data dir")?;
        let storage = wiring::init_storage(&config)?;
        Ok(Self {
            config,
            storage,
            resolver,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// REST state built from this app's configuration and storage.
    pub fn state(&self) -> rest::AppState<SqliteStorage> {
        wiring::build_state(&self.config, self.storage.clone(), self.resolver.clone())
    }

    /// Main entry point for the daemon.
    pub async fn run_daemon(&self) -> Result<()> {
        let mut rest_handle = self.spawn_rest_server();
        self.wait_for_shutdown(&mut rest_handle).await
    }

    fn spawn_rest_server(&self) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let state = self.state();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, state, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // Polling a completed JoinHandle again panics.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }
}

fn log_startup_info(config: &Configuration) {
    log::info!("🚀 Starting product catalog");
    log::info!("🖼️ External base URL: {}", config.external_base_url);
    log::info!("📂 Data dir: {}", config.data_dir.display());
    log::info!("🗂️ Pics dir: {}", config.pics_dir.display());
    log::info!("🌐 REST API: http://{}", config.api_listen);
    if let Some(path) = config.log_file.as_deref() {
        log::info!("📝 Log file: {}", path.display());
    }
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    if let Some(cmd) = &cli.cmd {
        return cmd.run(app.storage());
    }

    app.run_daemon().await
}
