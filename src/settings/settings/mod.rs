// Re-export types and implementations
pub mod settings_struct;

pub use settings_struct::{
    HttpSettings, ManifestFormat, NodeSettings, Settings, ZoneSettings, ENV_API_TOKEN,
    ENV_API_TOKENS, ENV_DOMAIN, ENV_REPOSITORY,
};
