use thiserror::Error;

use crate::params::Parameter;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{parameter} must be a finite number, got {value}")]
    NonFinite { parameter: Parameter, value: f64 },

    #[error("{parameter} = {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        parameter: Parameter,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
