use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// Represents a merged Clash configuration output
///
/// Field order is the order written to `clash.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ClashYamlOutput {
    pub proxies: Vec<Mapping>,
    pub proxy_groups: Vec<Value>,
    pub rules: Vec<Value>,
}

impl ClashYamlOutput {
    /// Nothing worth writing: no proxies, groups or rules.
    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty() && self.proxy_groups.is_empty() && self.rules.is_empty()
    }

    /// Names of all proxies, in order.
    pub fn proxy_names(&self) -> Vec<&str> {
        self.proxies
            .iter()
            .filter_map(|proxy| proxy.get("name").and_then(Value::as_str))
            .collect()
    }

    /// Find a proxy group by name.
    pub fn group(&self, name: &str) -> Option<&Mapping> {
        self.proxy_groups
            .iter()
            .filter_map(Value::as_mapping)
            .find(|group| group.get("name").and_then(Value::as_str) == Some(name))
    }

    /// Member names of a proxy group.
    pub fn group_members(&self, name: &str) -> Vec<&str> {
        self.group(name)
            .and_then(|group| group.get("proxies"))
            .and_then(Value::as_sequence)
            .map(|members| members.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
