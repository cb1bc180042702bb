//! Settings module
//!
//! This module contains the run configuration and the token sources

pub mod settings;
pub mod tokens;

// Re-export settings struct and functions
pub use settings::{
    HttpSettings, ManifestFormat, NodeSettings, Settings, ZoneSettings, ENV_API_TOKEN,
    ENV_API_TOKENS, ENV_DOMAIN, ENV_REPOSITORY,
};
pub use tokens::collect_tokens;
