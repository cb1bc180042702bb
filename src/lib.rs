pub mod api;
pub mod constants;
pub mod error;
pub mod generator;
pub mod interfaces;
pub mod models;
pub mod parser;
pub mod settings;
pub mod utils;

pub use error::{Error, Result};
pub use interfaces::{run_aggregator, run_zone_fetch, RunSummary};
pub use settings::Settings;
