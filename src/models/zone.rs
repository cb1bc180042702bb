//! DNS provider API types

use serde::Deserialize;

/// Generic list envelope returned by every provider endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub result: Option<Vec<T>>,
    #[serde(default)]
    pub errors: Option<Vec<ApiErrorItem>>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

impl<T> ApiEnvelope<T> {
    /// First error message of a failed response, or a generic fallback.
    pub fn error_message(&self) -> String {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    /// Total page count; responses without pagination info are one page.
    pub fn total_pages(&self) -> u32 {
        self.result_info
            .as_ref()
            .and_then(|info| info.total_pages)
            .unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorItem {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u32>,
}

/// A DNS-managed domain owned by the account behind the token.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

/// One DNS entry within a zone. Only `name` is consumed.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DnsRecord {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl DnsRecord {
    pub fn named(name: &str) -> Self {
        DnsRecord {
            name: name.to_string(),
            ..Default::default()
        }
    }
}
