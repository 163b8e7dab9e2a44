pub mod browse;
pub mod config;
pub mod filter;

pub use browse::run_browse;
pub use filter::run_filter;
