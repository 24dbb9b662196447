//! Column type inference for CSV cells.
//!
//! A column is typed by looking at every non-null cell: integers first, then
//! floats, then booleans, falling back to text. Null markers are the usual
//! spreadsheet and dataframe spellings of a missing value.

/// Cell values treated as missing.
const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Boolean,
    Text,
}

impl ColumnType {
    /// Declared SQLite type for the column.
    pub fn sql_type(self) -> &'static str {
        match self {
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

pub fn is_null(raw: &str) -> bool {
    NULL_MARKERS.contains(&raw.trim())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

/// Infer the type of one column from its raw cells.
pub fn infer_column<'a, I>(cells: I) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut int = true;
    let mut real = true;
    let mut boolean = true;
    let mut any = false;

    for raw in cells {
        if is_null(raw) {
            continue;
        }
        any = true;
        let s = raw.trim();
        if int && s.parse::<i64>().is_err() {
            int = false;
        }
        if real && s.parse::<f64>().is_err() {
            real = false;
        }
        if boolean && parse_bool(s).is_none() {
            boolean = false;
        }
        if !(int || real || boolean) {
            break;
        }
    }

    match (any, int, real, boolean) {
        (false, ..) => ColumnType::Text,
        (true, true, _, _) => ColumnType::Integer,
        (true, _, true, _) => ColumnType::Real,
        (true, _, _, true) => ColumnType::Boolean,
        _ => ColumnType::Text,
    }
}

/// Convert a raw cell once its column type is known.
///
/// Inference guarantees every non-null cell of the column parses as
/// `ty`, so a failed parse here falls back to text rather than erroring.
pub fn convert(raw: &str, ty: ColumnType) -> Cell {
    if is_null(raw) {
        return Cell::Null;
    }
    let s = raw.trim();
    let parsed = match ty {
        ColumnType::Integer => s.parse::<i64>().ok().map(Cell::Integer),
        ColumnType::Real => s.parse::<f64>().ok().map(Cell::Real),
        ColumnType::Boolean => parse_bool(s).map(|b| Cell::Integer(b as i64)),
        ColumnType::Text => None,
    };
    parsed.unwrap_or_else(|| Cell::Text(raw.to_string()))
}
