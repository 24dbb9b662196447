use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection};

use crate::db::{quote_ident, ColumnInfo, Records, TableProperties, TableWriter};
use crate::frame::Frame;
use crate::infer::Cell;
use crate::logger::debug;

pub struct Sqlite {
    conn: Connection,
}

impl Sqlite {
    /// Open (creating if needed) the database file.
    pub fn open(path: &Path) -> Result<Sqlite> {
        debug(&format!("sqlite: opening {}", path.display()));
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database {}", path.display()))?;
        debug("sqlite: opened");
        Ok(Sqlite { conn })
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Sqlite> {
        Ok(Sqlite {
            conn: Connection::open_in_memory()?,
        })
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| e)
            .context("failed to close database")
    }
}

fn to_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Integer(i) => Value::Integer(*i),
        Cell::Real(f) => Value::Real(*f),
        Cell::Text(s) => Value::Text(s.clone()),
    }
}

fn create_table_sql(table: &str, frame: &Frame) -> String {
    let cols = frame
        .columns
        .iter()
        .zip(&frame.types)
        .map(|(name, ty)| format!("{} {}", quote_ident(name), ty.sql_type()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({})", quote_ident(table), cols)
}

fn insert_sql(table: &str, frame: &Frame) -> String {
    let cols = frame
        .columns
        .iter()
        .map(|c| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let marks = (1..=frame.columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        cols,
        marks
    )
}

impl TableWriter for Sqlite {
    fn replace_table(&mut self, table: &str, frame: &Frame) -> Result<usize> {
        if frame.columns.is_empty() {
            anyhow::bail!("table {} has no columns", table);
        }
        let tx = self.conn.transaction()?;
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", quote_ident(table)))?;
        tx.execute_batch(&create_table_sql(table, frame))?;
        debug(&format!("sqlite: created {}", table));

        let mut written = 0;
        {
            let mut stmt = tx.prepare(&insert_sql(table, frame))?;
            for row in &frame.rows {
                written += stmt.execute(params_from_iter(row.iter().map(to_value)))?;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    fn fetch_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut tables = Vec::new();
        for r in rows {
            tables.push(r?);
        }
        Ok(tables)
    }

    fn fetch_properties(&self, table: &str) -> Result<TableProperties> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let rows = stmt.query_map([], |row| {
            Ok(ColumnInfo {
                name: row.get(1)?,
                data_type: row.get(2)?,
            })
        })?;
        let mut columns = Vec::new();
        for c in rows {
            columns.push(c?);
        }
        if columns.is_empty() {
            anyhow::bail!("no such table: {}", table);
        }
        Ok(TableProperties { columns })
    }

    fn fetch_records(&self, table: &str, limit: usize, offset: usize) -> Result<Records> {
        let columns = self.fetch_properties(table)?.column_names();

        // stringify conservatively, NULL as empty
        let q = format!(
            "SELECT * FROM {} LIMIT {} OFFSET {}",
            quote_ident(table),
            limit,
            offset
        );
        let mut stmt = self.conn.prepare(&q)?;
        let col_count = stmt.column_count();
        let mut rows = stmt.query([])?;
        let mut out: Vec<Vec<String>> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut v = Vec::with_capacity(col_count);
            for i in 0..col_count {
                let s = match row.get_ref(i)? {
                    ValueRef::Null => String::new(),
                    ValueRef::Integer(i) => i.to_string(),
                    ValueRef::Real(f) => f.to_string(),
                    ValueRef::Text(t) => String::from_utf8_lossy(t).into_owned(),
                    ValueRef::Blob(b) => format!("<blob {} bytes>", b.len()),
                };
                v.push(s);
            }
            out.push(v);
        }

        Ok(Records { columns, rows: out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str) -> Frame {
        Frame::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn replace_creates_typed_table() {
        let mut db = Sqlite::open_in_memory().unwrap();
        let f = frame("NODE_ID,LAT,LGA_NAME,DEG_URBAN\n1,-37.8,MELBOURNE,\n2,-38.1,CASEY,5\n");
        assert_eq!(db.replace_table("node", &f).unwrap(), 2);

        let props = db.fetch_properties("node").unwrap();
        assert_eq!(props.column_names(), vec!["NODE_ID", "LAT", "LGA_NAME", "DEG_URBAN"]);
        let types: Vec<_> = props.columns.iter().map(|c| c.data_type.as_str()).collect();
        assert_eq!(types, vec!["INTEGER", "REAL", "TEXT", "INTEGER"]);

        let recs = db.fetch_records("node", 10, 0).unwrap();
        assert_eq!(recs.rows[0], vec!["1", "-37.8", "MELBOURNE", ""]);
        assert_eq!(recs.rows[1], vec!["2", "-38.1", "CASEY", "5"]);
    }

    #[test]
    fn replace_drops_previous_contents_and_shape() {
        let mut db = Sqlite::open_in_memory().unwrap();
        db.replace_table("person", &frame("A,B\n1,2\n3,4\n5,6\n")).unwrap();
        db.replace_table("person", &frame("SEX\nM\n")).unwrap();

        let recs = db.fetch_records("person", 10, 0).unwrap();
        assert_eq!(recs.columns, vec!["SEX"]);
        assert_eq!(recs.rows, vec![vec!["M".to_string()]]);
        assert_eq!(db.fetch_tables().unwrap(), vec!["person"]);
    }

    #[test]
    fn quotes_awkward_identifiers() {
        let mut db = Sqlite::open_in_memory().unwrap();
        let f = frame("\"say \"\"hi\"\"\",select,with space\n1,2,3\n");
        db.replace_table("order", &f).unwrap();
        let cols = db.fetch_properties("order").unwrap().column_names();
        assert_eq!(cols, vec!["say \"hi\"", "select", "with space"]);
    }

    #[test]
    fn header_only_frame_makes_empty_table() {
        let mut db = Sqlite::open_in_memory().unwrap();
        assert_eq!(db.replace_table("sub_dca", &frame("A,B\n")).unwrap(), 0);
        assert!(db.fetch_records("sub_dca", 10, 0).unwrap().rows.is_empty());
    }

    #[test]
    fn records_page_with_limit_and_offset() {
        let mut db = Sqlite::open_in_memory().unwrap();
        db.replace_table("t", &frame("N\n1\n2\n3\n4\n")).unwrap();
        let recs = db.fetch_records("t", 2, 1).unwrap();
        assert_eq!(recs.rows, vec![vec!["2".to_string()], vec!["3".to_string()]]);
    }

    #[test]
    fn unknown_table_properties_fail() {
        let db = Sqlite::open_in_memory().unwrap();
        assert!(db.fetch_properties("vehicle").is_err());
    }
}
