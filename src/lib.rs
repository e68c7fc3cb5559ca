#![forbid(unsafe_code)]

pub mod book;
pub mod catalog;
pub mod cli;
pub mod columns;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod last_file;
pub mod logging;
pub mod reader;
pub mod record_store;
pub mod sort;

pub use book::{BookInfo, BookRecord};
pub use catalog::{Catalog, UpsertOutcome};
pub use error::CatalogError;
pub use record_store::{LocalFsRecordStore, MemoryRecordStore, RecordStore};
pub use sort::{SortField, SortMode};
