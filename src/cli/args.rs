use clap::Parser;
use std::env;

use crate::cli::command::Command;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Serve a browsable, editable product catalog over HTTP",
    long_about = "Product catalog service: paginated item listings filtered by name, type and brand, item editing, and item pictures.",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    #[arg(
        long = "external-base-url",
        env = "EXTERNAL_BASE_URL",
        value_name = "URL",
        help = "Base URL substituted into item picture URLs returned to callers"
    )]
    pub external_base_url: String,

    #[arg(
        long,
        default_value_t = false,
        help = "Reset all persisted state (delete the SQLite database) before starting"
    )]
    pub reset: bool,

    #[arg(
        long,
        default_value_t = false,
        help = "Insert the reference catalog (brands, types, items) when the catalog is empty"
    )]
    pub seed: bool,

    #[arg(
        long,
        default_value = ".catalog/",
        value_name = "DIR",
        help = "Directory to store persistent data"
    )]
    pub data_dir: String,

    #[arg(
        long = "pics-dir",
        env = "CATALOG_PICS_DIR",
        value_name = "DIR",
        help = "Directory holding item pictures (defaults to <data-dir>/pics)"
    )]
    pub pics_dir: Option<String>,

    #[arg(
        long = "log-file",
        env = "CATALOG_LOG_FILE",
        value_name = "PATH",
        help = "Write logs to PATH (in addition to stderr)"
    )]
    pub log_file: Option<String>,

    #[arg(
        long = "api-listen",
        env = "CATALOG_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "REST API listen address (host:port)"
    )]
    pub api_listen: std::net::SocketAddr,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

pub fn parse() -> Cli {
    let dotenv_path = env::var("DOTENV_PATH").unwrap_or(".env".into());
    dotenvy::from_filename(&dotenv_path).ok();

    Cli::parse()
}
