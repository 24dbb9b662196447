use std::path::PathBuf;

use clap::Parser;

/// Load the road crash CSV extracts into a SQLite database.
///
/// Each CSV becomes one table named after the file (lowercased, without
/// `.csv`). Existing tables of the same name are replaced.
#[derive(Debug, Default, Parser)]
#[command(name = "crashload", version, about)]
pub struct Cli {
    /// Directory holding the CSV files [default: current working directory,
    /// not the directory of the executable]
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Database file; relative paths resolve against the data directory
    /// [default: RoadCrashesVic.sqlite]
    #[arg(short = 'o', long, value_name = "FILE")]
    pub database: Option<PathBuf>,

    /// YAML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Parse and infer every file, print the planned tables, write nothing
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_defaults() {
        let cli = Cli::try_parse_from(["crashload"]).unwrap();
        assert!(cli.data_dir.is_none());
        assert!(cli.database.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "crashload",
            "-d",
            "/data",
            "--database",
            "out.sqlite",
            "-c",
            "cfg.yaml",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
        assert_eq!(cli.database, Some(PathBuf::from("out.sqlite")));
        assert_eq!(cli.config, Some(PathBuf::from("cfg.yaml")));
        assert!(cli.dry_run);
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["crashload", "extra"]).is_err());
    }
}
