//! Record source for attune.
//!
//! Decodes the tab-separated song catalog into [`Record`]s, inferring a type
//! for every cell, and loads it from a local file or over HTTP with retry.
//! Also owns the layered configuration shared by the CLI.
//!
//! [`Record`]: attune_core::Record

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod autotype;
pub mod config;
pub mod error;
pub mod loader;
pub mod tsv;

pub use config::{Config, LoggingConfig};
pub use error::{SourceError, SourceResult};
pub use loader::{Loader, RecordSource};
pub use tsv::parse_records;
