use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::defaults::*;
use crate::error::{Error, Result};
use crate::models::GroupMode;
use crate::utils::file_get;
use crate::utils::http::RetryPolicy;

pub const ENV_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const ENV_API_TOKENS: &str = "CLOUDFLARE_API_TOKENS";
pub const ENV_DOMAIN: &str = "CLOUDFLARE_DOMAIN";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";

/// Settings for one invocation.
///
/// Built once in `main` from an optional settings file, the environment and
/// the command line, then passed by reference to each pipeline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub http: HttpSettings,
    pub zones: ZoneSettings,
    pub nodes: NodeSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub max_attempts: u32,
    pub retry_delay_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    pub api_base: String,
    pub tokens: Vec<String>,
    pub token_file: Option<PathBuf>,
    /// Only process the zone with exactly this name.
    pub domain: Option<String>,
    pub output_dir: PathBuf,
    /// Prefix of the per-zone files, e.g. `subdomains` → `subdomains_example_com.txt`.
    pub output_base: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    #[default]
    Json,
    Yaml,
}

impl ManifestFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ManifestFormat::Json => "json",
            ManifestFormat::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    pub sources_file: PathBuf,
    pub output_dir: PathBuf,
    /// `owner/name`, used only to build raw file URLs in the manifest.
    pub repository: Option<String>,
    pub branch: String,
    pub write_manifest: bool,
    pub manifest_format: ManifestFormat,
    pub group_mode: GroupMode,
    /// Sources fetched at once; results are merged in source order regardless.
    pub concurrency: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        HttpSettings {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: Duration::from_secs(self.retry_delay_secs),
        }
    }
}

impl Default for ZoneSettings {
    fn default() -> Self {
        ZoneSettings {
            api_base: DEFAULT_API_BASE.to_string(),
            tokens: Vec::new(),
            token_file: None,
            domain: None,
            output_dir: PathBuf::from("."),
            output_base: DEFAULT_SUBDOMAIN_BASE.to_string(),
        }
    }
}

impl Default for NodeSettings {
    fn default() -> Self {
        NodeSettings {
            sources_file: PathBuf::from(DEFAULT_SOURCES_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            repository: None,
            branch: DEFAULT_BRANCH.to_string(),
            write_manifest: true,
            manifest_format: ManifestFormat::Json,
            group_mode: GroupMode::Synthesize,
            concurrency: 1,
        }
    }
}

impl Settings {
    /// Create a new settings instance with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings text. TOML is tried first, then YAML.
    pub fn load_from_content(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        match toml::from_str::<Settings>(content) {
            Ok(settings) => Ok(settings),
            Err(toml_err) => serde_yaml::from_str::<Settings>(content).map_err(|yaml_err| {
                Error::Config(format!(
                    "not valid TOML ({}) or YAML ({})",
                    toml_err, yaml_err
                ))
            }),
        }
    }

    /// Load settings from a file; the extension picks the format when known.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = file_get(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => toml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| Error::Config(format!("{}: {}", path.display(), e))),
            _ => Settings::load_from_content(&content),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any variable lookup. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(token) = get(ENV_API_TOKEN) {
            self.zones.tokens.push(token);
        }
        if let Some(tokens) = get(ENV_API_TOKENS) {
            self.zones.tokens.extend(
                tokens
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string),
            );
        }
        if let Some(domain) = get(ENV_DOMAIN) {
            self.zones.domain = Some(domain);
        }
        if let Some(repository) = get(ENV_REPOSITORY) {
            self.nodes.repository = Some(repository);
        }
    }
}
