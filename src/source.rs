use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

/// The road crash extracts, in load order.
pub const ROAD_CRASH_FILES: [&str; 9] = [
    "ACCIDENT.csv",
    "ACCIDENT_EVENT.csv",
    "ACCIDENT_LOCATION.csv",
    "ATMOSPHERIC_COND.csv",
    "NODE.csv",
    "PERSON.csv",
    "ROAD_SURFACE_COND.csv",
    "SUB_DCA.csv",
    "VEHICLE.csv",
];

pub const DATABASE_FILE: &str = "RoadCrashesVic.sqlite";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub file_name: String,
    pub table: String,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let table = table_name(&file_name);
        Self { file_name, table }
    }

    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

/// `ACCIDENT_EVENT.csv` -> `accident_event`.
pub fn table_name(file_name: &str) -> String {
    file_name.replace(".csv", "").to_lowercase()
}

/// Build the ordered source list, rejecting names that would share a table.
pub fn source_files<S: AsRef<str>>(names: &[S]) -> Result<Vec<SourceFile>> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let file = SourceFile::new(name.as_ref());
        if file.table.is_empty() {
            anyhow::bail!("{:?} does not yield a table name", file.file_name);
        }
        if let Some(prev) = seen.insert(file.table.clone(), file.file_name.clone()) {
            anyhow::bail!(
                "{} and {} would both load into table {}",
                prev,
                file.file_name,
                file.table
            );
        }
        files.push(file);
    }
    Ok(files)
}

pub fn default_files() -> Vec<String> {
    ROAD_CRASH_FILES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_extension_and_lowercases() {
        assert_eq!(table_name("ACCIDENT_EVENT.csv"), "accident_event");
        assert_eq!(table_name("SUB_DCA.csv"), "sub_dca");
        assert_eq!(table_name("node"), "node");
    }

    #[test]
    fn default_set_maps_to_nine_distinct_tables() {
        let files = source_files(&ROAD_CRASH_FILES).unwrap();
        let tables: Vec<_> = files.iter().map(|f| f.table.as_str()).collect();
        assert_eq!(
            tables,
            vec![
                "accident",
                "accident_event",
                "accident_location",
                "atmospheric_cond",
                "node",
                "person",
                "road_surface_cond",
                "sub_dca",
                "vehicle",
            ]
        );
    }

    #[test]
    fn rejects_colliding_table_names() {
        let err = source_files(&["NODE.csv", "node.csv"]).unwrap_err();
        assert!(err.to_string().contains("table node"));
    }

    #[test]
    fn rejects_empty_table_name() {
        assert!(source_files(&[".csv"]).is_err());
    }

    #[test]
    fn joins_file_onto_directory() {
        let f = SourceFile::new("NODE.csv");
        assert_eq!(f.path_in(Path::new("/data")), PathBuf::from("/data/NODE.csv"));
    }
}
