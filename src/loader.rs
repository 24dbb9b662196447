use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::db::{Sqlite, TableWriter};
use crate::frame::Frame;
use crate::logger::{debug, info, trace, warn};
use crate::source::SourceFile;

pub const SUCCESS_MESSAGE: &str =
    "Creation of RoadCrashesVic database and tables completed successfully.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLoad {
    pub source: PathBuf,
    pub table: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub tables: Vec<TableLoad>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

fn read_source(config: &Config, file: &SourceFile) -> Result<(PathBuf, Frame)> {
    let path = file.path_in(&config.data_dir);
    debug(&format!("reading {}", path.display()));
    let frame = Frame::read_path(&path)?;
    trace(&format!(
        "{}: columns {:?} types {:?}",
        file.table, frame.columns, frame.types
    ));
    if frame.rows.is_empty() {
        warn(&format!("{} has no data rows", path.display()));
    }
    Ok((path, frame))
}

/// Load every configured CSV through `writer`, in order. Stops at the first
/// failure; tables already written stay written.
pub fn load_all<W: TableWriter>(config: &Config, writer: &mut W) -> Result<LoadReport> {
    let mut report = LoadReport::default();
    for file in &config.files {
        let (source, frame) = read_source(config, file)?;
        let rows = writer
            .replace_table(&file.table, &frame)
            .with_context(|| format!("failed to replace table {}", file.table))?;
        let stored = writer.fetch_properties(&file.table)?;
        debug(&format!(
            "{} schema: {}",
            file.table,
            stored
                .columns
                .iter()
                .map(|c| format!("{} {}", c.name, c.data_type))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        info(&format!(
            "loaded {} -> {} ({} rows, {} columns)",
            source.display(),
            file.table,
            rows,
            frame.columns.len()
        ));
        report.tables.push(TableLoad {
            source,
            table: file.table.clone(),
            rows,
            columns: stored.columns.len(),
        });
    }
    Ok(report)
}

/// Open the database once, load everything, close it once.
pub fn run(config: &Config) -> Result<LoadReport> {
    info(&format!(
        "loading {} files from {} into {}",
        config.files.len(),
        config.data_dir.display(),
        config.database.display()
    ));
    let mut db = Sqlite::open(&config.database)?;
    let report = load_all(config, &mut db)?;
    db.close()?;
    info(&format!(
        "done: {} tables, {} rows",
        report.tables.len(),
        report.total_rows()
    ));
    Ok(report)
}

/// Parse and infer every file without touching the database.
pub fn plan(config: &Config) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for file in &config.files {
        let (path, frame) = read_source(config, file)?;
        lines.push(format!(
            "{} -> {} ({} rows)",
            path.display(),
            file.table,
            frame.row_count()
        ));
        for (name, ty) in frame.columns.iter().zip(&frame.types) {
            lines.push(format!("    {} {}", name, ty.sql_type()));
        }
    }
    Ok(lines)
}
