use anyhow::Result;
use clap::Subcommand;

use crate::storage::{self, SqliteStorage};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    #[command(
        about = "Seed the reference catalog and exit",
        long_about = "Insert the reference brands, types and items into an empty catalog database, then exit without serving."
    )]
    Seed,
}

impl Command {
    pub fn run(&self, storage: &SqliteStorage) -> Result<()> {
        match self {
            Command::Seed => {
                if storage::seed::seed_if_empty(storage)? {
                    log::info!("✅ Catalog seeded");
                } else {
                    log::info!("ℹ️ Catalog already has data; nothing seeded");
                }
                Ok(())
            }
        }
    }
}
