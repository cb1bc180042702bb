use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Type of proxy group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyGroupType {
    Select,
    URLTest,
}

impl ProxyGroupType {
    /// Get string representation of the proxy group type
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyGroupType::Select => "select",
            ProxyGroupType::URLTest => "url-test",
        }
    }

    /// Groups that latency-test their members need a test url and interval.
    pub fn is_latency_tested(&self) -> bool {
        matches!(self, ProxyGroupType::URLTest)
    }
}

/// How `proxy-groups` and `rules` of a merged bundle are produced.
///
/// The two modes never mix within one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    /// Build an `auto` latency group and a `PROXY` selector over all proxies.
    /// With no proxies at all, upstream groups and rules are passed through.
    #[default]
    Synthesize,
    /// Concatenate the groups and rules carried by the upstream bundles.
    Preserve,
}

/// Configuration for a proxy group
#[derive(Debug, Clone)]
pub struct ProxyGroupConfig {
    /// Name of the proxy group
    pub name: String,
    /// Type of the proxy group
    pub group_type: ProxyGroupType,
    /// List of proxy names in this group
    pub proxies: Vec<String>,
    /// URL for testing
    pub url: String,
    /// Interval in seconds between tests
    pub interval: u32,
}

impl ProxyGroupConfig {
    /// Create a new proxy group config
    pub fn new(name: &str, group_type: ProxyGroupType) -> Self {
        Self {
            name: name.to_string(),
            group_type,
            proxies: Vec::new(),
            url: String::new(),
            interval: 0,
        }
    }

    /// Get string representation of the group type
    pub fn type_str(&self) -> &'static str {
        self.group_type.as_str()
    }

    /// Render as a Clash `proxy-groups` entry, keys in Clash's usual order.
    pub fn to_yaml(&self) -> Value {
        let mut map = Mapping::new();
        map.insert("name".into(), self.name.clone().into());
        map.insert("type".into(), self.type_str().into());
        map.insert(
            "proxies".into(),
            Value::Sequence(self.proxies.iter().cloned().map(Value::from).collect()),
        );
        if self.group_type.is_latency_tested() {
            map.insert("url".into(), self.url.clone().into());
            map.insert("interval".into(), self.interval.into());
        }
        Value::Mapping(map)
    }
}
