use anyhow::Result;
use clap::Parser;

use crashload::cli::Cli;
use crashload::config::{Config, LOG_FILE};
use crashload::loader::{self, SUCCESS_MESSAGE};
use crashload::logger::{error, init};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize file logging under the app config directory
    if let Ok(dir) = Config::app_config_dir() {
        let _ = init(dir.join(LOG_FILE));
    }

    let result = run(&cli);
    if let Err(err) = &result {
        error(&format!("fatal error: {:?}", err));
    }
    result
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;

    if config.dry_run {
        for line in loader::plan(&config)? {
            println!("{}", line);
        }
        return Ok(());
    }

    loader::run(&config)?;
    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}
