use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::source::{default_files, source_files, SourceFile, DATABASE_FILE};

const APP_NAME: &str = "crashload";
const CONFIG_FILE: &str = "crashload.yaml";
pub const LOG_FILE: &str = "crashload.log";

/// Optional on-disk settings. Anything left out falls back to the defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub data_dir: Option<PathBuf>,
    pub database: Option<PathBuf>,
    pub files: Option<Vec<String>>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub files: Vec<SourceFile>,
    pub dry_run: bool,
}

fn config_root() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }
    .ok_or_else(|| anyhow::anyhow!("failed to find os config dir."))?;
    path.push(APP_NAME);
    Ok(path)
}

impl Config {
    /// Return the application config directory path, creating it if missing.
    pub fn app_config_dir() -> Result<PathBuf> {
        let path = config_root()?;
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Resolve settings: CLI flag, then config file, then built-in default.
    pub fn from_cli(cli: &Cli) -> Result<Config> {
        Config::from_cli_in(cli, config_root().ok().as_deref())
    }

    /// Like [`Config::from_cli`], looking for `crashload.yaml` under `root`
    /// when no `--config` is given.
    pub fn from_cli_in(cli: &Cli, root: Option<&Path>) -> Result<Config> {
        let file = match (&cli.config, root) {
            (Some(path), _) => load_file(path)?,
            (None, Some(dir)) if dir.join(CONFIG_FILE).exists() => {
                load_file(&dir.join(CONFIG_FILE))?
            }
            _ => FileConfig::default(),
        };
        Config::resolve(cli, file)
    }

    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Config> {
        let data_dir = cli
            .data_dir
            .clone()
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let data_dir = expand(&data_dir)?;

        let database = cli
            .database
            .clone()
            .or(file.database)
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE));
        let database = expand(&database)?;
        let database = if database.is_relative() {
            data_dir.join(database)
        } else {
            database
        };

        let names = file.files.unwrap_or_else(default_files);
        if names.is_empty() {
            anyhow::bail!("no CSV files configured");
        }
        let files = source_files(names.as_slice())?;

        Ok(Config {
            data_dir,
            database,
            files,
            dry_run: cli.dry_run,
        })
    }
}

/// Load a YAML config file.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let cfg: FileConfig = serde_yaml::from_slice(&data)
        .with_context(|| format!("failed to parse YAML at {}", path.display()))?;
    Ok(cfg)
}

fn expand(path: &Path) -> Result<PathBuf> {
    expand_path(path).ok_or_else(|| anyhow::anyhow!("cannot expand file path {}", path.display()))
}

/// Expand a leading `~` and `$VAR` (or `%VAR%` on windows) components.
fn expand_path(path: &Path) -> Option<PathBuf> {
    let mut expanded_path = PathBuf::new();
    let mut path_iter = path.iter();
    if path.starts_with("~") {
        path_iter.next()?;
        expanded_path = expanded_path.join(dirs_next::home_dir()?);
    }
    for path in path_iter {
        let path = path.to_str()?;
        expanded_path = if cfg!(unix) && path.starts_with('$') {
            expanded_path.join(std::env::var(path.strip_prefix('$')?).unwrap_or_default())
        } else if cfg!(windows) && path.starts_with('%') && path.ends_with('%') {
            expanded_path
                .join(std::env::var(path.strip_prefix('%')?.strip_suffix('%')?).unwrap_or_default())
        } else {
            expanded_path.join(path)
        }
    }
    Some(expanded_path)
}
