//! Core domain model for attune.
//!
//! This crate defines the song [`Record`], the six feature [`Dimension`]s,
//! the record validator, the [`ParameterVector`] driving a filter pass, and
//! the tolerance filter engine that narrows a catalog to the records lying
//! within tolerance of every target.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod dimension;
pub mod error;
pub mod filter;
pub mod params;
pub mod record;
pub mod validate;

pub use dimension::Dimension;
pub use error::{Error, Result};
pub use filter::{filter, filter_indices, qualifies, FilterCache};
pub use params::{Control, Parameter, ParameterVector, DEFAULT_TEMPO_TOLERANCE};
pub use record::{FieldValue, Record};
pub use validate::{is_usable, missing_dimensions};
