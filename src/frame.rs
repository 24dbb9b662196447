use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::infer::{convert, infer_column, Cell, ColumnType};

/// One CSV file held in memory with its inferred column types.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub columns: Vec<String>,
    pub types: Vec<ColumnType>,
    pub rows: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn read_path(path: &Path) -> Result<Frame> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("failed to open {}", path.display()))?;
        Frame::from_reader(file).with_context(|| format!("failed to read {}", path.display()))
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<Frame> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        let mut records = reader.records();
        let header = match records.next() {
            Some(rec) => rec?,
            None => anyhow::bail!("no header row"),
        };
        let columns = header_names(&header);
        let width = columns.len();

        // raw cells, column-major, so inference can walk a column at a time
        let mut raw: Vec<Vec<String>> = vec![Vec::new(); width];
        let mut row_count = 0usize;
        for rec in records {
            let rec = rec?;
            if rec.len() == 1 && rec[0].trim().is_empty() {
                continue;
            }
            if rec.len() > width {
                let line = rec.position().map(|p| p.line()).unwrap_or_default();
                anyhow::bail!(
                    "line {}: expected {} fields, found {}",
                    line,
                    width,
                    rec.len()
                );
            }
            for (i, col) in raw.iter_mut().enumerate() {
                col.push(rec.get(i).unwrap_or_default().to_string());
            }
            row_count += 1;
        }

        let types: Vec<ColumnType> = raw
            .iter()
            .map(|col| infer_column(col.iter().map(String::as_str)))
            .collect();

        let mut rows = Vec::with_capacity(row_count);
        for r in 0..row_count {
            let row = raw
                .iter()
                .zip(&types)
                .map(|(col, ty)| convert(&col[r], *ty))
                .collect();
            rows.push(row);
        }

        Ok(Frame {
            columns,
            types,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Clean up header names: strip a BOM, name blank headers and
/// number repeated ones (`A`, `A.1`, `A.2`).
fn header_names(header: &csv::StringRecord) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(header.len());
    for (i, field) in header.iter().enumerate() {
        let field = if i == 0 {
            field.trim_start_matches('\u{feff}')
        } else {
            field
        };
        let base = if field.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            field.to_string()
        };
        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{}.{}", base, n);
            n += 1;
        }
        used.insert(name.clone());
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(text: &str) -> Frame {
        Frame::from_reader(text.as_bytes()).unwrap()
    }

    #[test]
    fn reads_header_rows_and_types() {
        let f = frame("NODE_ID,LAT,LONG,LGA_NAME\n1,-37.8,144.9,MELBOURNE\n2,-38.1,145.2,CASEY\n");
        assert_eq!(f.columns, vec!["NODE_ID", "LAT", "LONG", "LGA_NAME"]);
        assert_eq!(
            f.types,
            vec![
                ColumnType::Integer,
                ColumnType::Real,
                ColumnType::Real,
                ColumnType::Text
            ]
        );
        assert_eq!(f.row_count(), 2);
        assert_eq!(
            f.rows[1],
            vec![
                Cell::Integer(2),
                Cell::Real(-38.1),
                Cell::Real(145.2),
                Cell::Text("CASEY".into())
            ]
        );
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let f = frame("ACCIDENT_NO,DCA_DESC\nT1,\"LEFT OFF CARRIAGEWAY, INTO OBJECT\"\n");
        assert_eq!(
            f.rows[0][1],
            Cell::Text("LEFT OFF CARRIAGEWAY, INTO OBJECT".into())
        );
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let f = frame("A,B,C\n1,2,3\n4\n");
        assert_eq!(f.rows[1], vec![Cell::Integer(4), Cell::Null, Cell::Null]);
        assert_eq!(f.types[1], ColumnType::Integer);
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = Frame::from_reader("A,B\n1,2\n3,4,5\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("expected 2 fields, found 3"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let f = frame("A,B\n1,2\n\n3,4\n");
        assert_eq!(f.row_count(), 2);
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let f = frame("A,B\n1,2\n   \n\t\n3,4\n");
        assert_eq!(f.row_count(), 2);
        assert_eq!(f.rows[1], vec![Cell::Integer(3), Cell::Integer(4)]);
    }

    #[test]
    fn header_only_yields_empty_text_columns() {
        let f = frame("A,B\n");
        assert_eq!(f.columns, vec!["A", "B"]);
        assert_eq!(f.types, vec![ColumnType::Text, ColumnType::Text]);
        assert!(f.rows.is_empty());
    }

    #[test]
    fn empty_input_has_no_header() {
        let err = Frame::from_reader("".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no header"));
    }

    #[test]
    fn header_names_are_cleaned() {
        let f = frame("\u{feff}ID,,ID,ID\n1,2,3,4\n");
        assert_eq!(f.columns, vec!["ID", "Unnamed: 1", "ID.1", "ID.2"]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Frame::read_path(Path::new("/nonexistent/NODE.csv")).unwrap_err();
        assert!(format!("{:#}", err).contains("NODE.csv"));
    }
}
