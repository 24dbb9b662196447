mod sqlite;

use anyhow::Result;

use crate::frame::Frame;

pub use sqlite::Sqlite;

/// Storage side of the loader.
pub trait TableWriter {
    /// Drop `table` if present, recreate it from `frame` and insert every
    /// row. Returns the number of rows written.
    fn replace_table(&mut self, table: &str, frame: &Frame) -> Result<usize>;
    fn fetch_tables(&self) -> Result<Vec<String>>;
    fn fetch_properties(&self, table: &str) -> Result<TableProperties>;
    fn fetch_records(&self, table: &str, limit: usize, offset: usize) -> Result<Records>;
}

#[derive(Debug, Clone)]
pub struct Records {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>, // each inner Vec is a row of stringified values
}

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone)]
pub struct TableProperties {
    pub columns: Vec<ColumnInfo>,
}

impl TableProperties {
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Quote an SQL identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
