//! Load the Victorian road crash CSV extracts into a SQLite database.
//!
//! Each file in [`source::ROAD_CRASH_FILES`] becomes one table, named after
//! the file without its extension and lowercased. Tables are replaced on
//! every run.

pub mod cli;
pub mod config;
pub mod db;
pub mod frame;
pub mod infer;
pub mod loader;
pub mod logger;
pub mod source;
