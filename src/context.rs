use std::path::PathBuf;

use crate::configuration::Configuration;

pub struct Context {
    pub config: Configuration,
}

impl Context {
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let data_dir = PathBuf::from(&cli.data_dir);
        let pics_dir = cli
            .pics_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("pics"));
        let cfg = Configuration {
            external_base_url: cli.external_base_url.clone(),
            data_dir,
            pics_dir,
            api_listen: cli.api_listen,
            log_file: cli.log_file.as_ref().map(PathBuf::from),
            reset: cli.reset,
            seed: cli.seed,
        };
        Self { config: cfg }
    }
}
