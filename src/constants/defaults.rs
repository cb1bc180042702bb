// Default values shared by the settings layer and the pipelines.

/// Cloudflare v4 API root.
pub const DEFAULT_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Cloudflare caps `per_page` at 50 for zone listings.
pub const ZONES_PER_PAGE: u32 = 50;
pub const RECORDS_PER_PAGE: u32 = 100;

/// Per-request timeout in seconds, used by both pipelines.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_SOURCES_FILE: &str = "node.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_SUBDOMAIN_BASE: &str = "subdomains";
pub const DEFAULT_BRANCH: &str = "main";

pub const NODE_CONTENT_FILE: &str = "node_content.txt";
pub const CLASH_OUTPUT_FILE: &str = "clash.yml";
pub const SOURCES_SUBDIR: &str = "sources";
pub const MANIFEST_BASENAME: &str = "manifest";

pub const AUTO_GROUP_NAME: &str = "auto";
pub const SELECT_GROUP_NAME: &str = "PROXY";
pub const LATENCY_TEST_URL: &str = "http://www.gstatic.com/generate_204";
pub const LATENCY_TEST_INTERVAL: u32 = 300;
