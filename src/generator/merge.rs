//! Folding Clash bundles into one configuration

use std::collections::{HashMap, HashSet};

use log::{debug, info, warn};
use serde_yaml::{Mapping, Value};

use crate::constants::defaults::{
    AUTO_GROUP_NAME, LATENCY_TEST_INTERVAL, LATENCY_TEST_URL, SELECT_GROUP_NAME,
};
use crate::generator::yaml::ClashYamlOutput;
use crate::models::{GroupMode, ProxyGroupConfig, ProxyGroupType};

/// Hands out unique names by appending `_1`, `_2`, ... on collision.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `name`, or the first free `name_N`, and return what was reserved.
    pub fn claim(&mut self, name: &str) -> String {
        let mut candidate = name.to_string();
        let mut counter = 1;
        while self.taken.contains(&candidate) {
            candidate = format!("{}_{}", name, counter);
            counter += 1;
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Merge parsed bundles in encounter order.
///
/// Returns `None` when no bundle was given at all. Proxies keep their order;
/// colliding names are renamed and the new name is what groups reference.
/// See [`GroupMode`] for how groups and rules are produced. When no proxy
/// survives, upstream groups and rules are kept in either mode.
pub fn merge_bundles<I>(bundles: I, mode: GroupMode) -> Option<ClashYamlOutput>
where
    I: IntoIterator<Item = Mapping>,
{
    let mut bundles = bundles.into_iter().peekable();
    bundles.peek()?;

    let mut output = ClashYamlOutput::default();
    let mut names = NameRegistry::new();
    let mut group_names = HashSet::new();
    let mut bundle_count = 0;

    for bundle in bundles {
        bundle_count += 1;
        let renames = append_proxies(&bundle, &mut output.proxies, &mut names);
        append_groups(&bundle, &renames, &mut output.proxy_groups, &mut group_names);
        if let Some(rules) = bundle.get("rules").and_then(Value::as_sequence) {
            output.rules.extend(rules.iter().cloned());
        }
    }

    if mode == GroupMode::Synthesize && !output.proxies.is_empty() {
        if !output.proxy_groups.is_empty() || !output.rules.is_empty() {
            debug!(
                "replacing {} upstream group(s) and {} rule(s) with synthesized ones",
                output.proxy_groups.len(),
                output.rules.len()
            );
        }
        let all: Vec<String> = output
            .proxy_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        output.proxy_groups = synthesize_groups(&all);
        output.rules = vec![Value::from(format!("MATCH,{}", SELECT_GROUP_NAME))];
    }

    info!(
        "Merged {} bundle(s): {} proxies, {} group(s), {} rule(s)",
        bundle_count,
        output.proxies.len(),
        output.proxy_groups.len(),
        output.rules.len()
    );
    Some(output)
}

/// Copy named proxies of one bundle, returning original → stored name for
/// the entries that had to be renamed.
fn append_proxies(
    bundle: &Mapping,
    proxies: &mut Vec<Mapping>,
    names: &mut NameRegistry,
) -> HashMap<String, String> {
    let mut renames = HashMap::new();
    let Some(entries) = bundle.get("proxies").and_then(Value::as_sequence) else {
        return renames;
    };

    for entry in entries {
        let Some(proxy) = entry.as_mapping() else {
            debug!("skipping proxy entry that is not a mapping");
            continue;
        };
        let Some(original) = proxy.get("name").and_then(name_of) else {
            debug!("skipping proxy entry without a name");
            continue;
        };

        let name = names.claim(&original);
        if name != original {
            renames.entry(original).or_insert_with(|| name.clone());
        }

        let mut proxy = proxy.clone();
        proxy.insert("name".into(), name.into());
        proxies.push(proxy);
    }
    renames
}

fn append_groups(
    bundle: &Mapping,
    renames: &HashMap<String, String>,
    groups: &mut Vec<Value>,
    group_names: &mut HashSet<String>,
) {
    let Some(entries) = bundle.get("proxy-groups").and_then(Value::as_sequence) else {
        return;
    };

    for entry in entries {
        let Some(group) = entry.as_mapping() else {
            continue;
        };
        let Some(name) = group.get("name").and_then(name_of) else {
            continue;
        };
        if !group_names.insert(name.clone()) {
            warn!("Dropping duplicate proxy group '{}'", name);
            continue;
        }

        let mut group = group.clone();
        if let Some(Value::Sequence(members)) = group.get_mut("proxies") {
            for member in members.iter_mut() {
                if let Some(renamed) = member.as_str().and_then(|m| renames.get(m)) {
                    *member = Value::from(renamed.as_str());
                }
            }
        }
        groups.push(Value::Mapping(group));
    }
}

/// `auto` latency group over every proxy and a `PROXY` selector on top.
fn synthesize_groups(proxy_names: &[String]) -> Vec<Value> {
    let mut auto = ProxyGroupConfig::new(AUTO_GROUP_NAME, ProxyGroupType::URLTest);
    auto.proxies = proxy_names.to_vec();
    auto.url = LATENCY_TEST_URL.to_string();
    auto.interval = LATENCY_TEST_INTERVAL;

    let mut select = ProxyGroupConfig::new(SELECT_GROUP_NAME, ProxyGroupType::Select);
    select.proxies = std::iter::once(AUTO_GROUP_NAME.to_string())
        .chain(proxy_names.iter().cloned())
        .collect();

    vec![auto.to_yaml(), select.to_yaml()]
}

fn name_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_registry() {
        let mut names = NameRegistry::new();
        assert_eq!(names.claim("node"), "node");
        assert_eq!(names.claim("node"), "node_1");
        assert_eq!(names.claim("node"), "node_2");
        assert_eq!(names.claim("node_1"), "node_1_1");
    }

    #[test]
    fn test_no_bundles() {
        assert!(merge_bundles(Vec::<Mapping>::new(), GroupMode::Synthesize).is_none());
        assert!(merge_bundles(Vec::<Mapping>::new(), GroupMode::Preserve).is_none());
    }

    fn bundle(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_synthesize_renames_and_groups() {
        let first = bundle("proxies:\n  - {name: node, type: ss}\n  - {name: hk, type: vmess}\n");
        let second = bundle(
            "proxies:\n  - {name: node, type: trojan}\n  - not-a-mapping\n  - {type: ss}\nproxy-groups:\n  - {name: upstream, type: select, proxies: [node]}\nrules:\n  - DOMAIN,a.com,DIRECT\n",
        );
        let merged = merge_bundles(vec![first, second], GroupMode::Synthesize).unwrap();

        assert_eq!(merged.proxy_names(), vec!["node", "hk", "node_1"]);
        assert_eq!(merged.proxies[2].get("type").and_then(Value::as_str), Some("trojan"));
        assert_eq!(merged.group_members("auto"), vec!["node", "hk", "node_1"]);
        assert_eq!(
            merged.group_members("PROXY"),
            vec!["auto", "node", "hk", "node_1"]
        );
        assert!(merged.group("upstream").is_none());
        assert_eq!(merged.rules, vec![Value::from("MATCH,PROXY")]);
    }

    #[test]
    fn test_synthesize_without_proxies_keeps_upstream_groups_and_rules() {
        let merged = merge_bundles(
            vec![bundle(
                "proxy-groups:\n  - {name: g, type: select, proxies: [DIRECT]}\nrules:\n  - MATCH,g\n",
            )],
            GroupMode::default(),
        )
        .unwrap();
        assert!(!merged.is_empty());
        assert!(merged.proxies.is_empty());
        assert_eq!(merged.group_members("g"), vec!["DIRECT"]);
        assert_eq!(merged.rules, vec![Value::from("MATCH,g")]);
    }

    #[test]
    fn test_synthesize_with_nothing_usable_is_empty() {
        let merged =
            merge_bundles(vec![bundle("proxies: []\n")], GroupMode::Synthesize).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_preserve_rewrites_members_and_drops_duplicate_groups() {
        let first = bundle(
            "proxies:\n  - {name: node, type: ss}\nproxy-groups:\n  - {name: sel, type: select, proxies: [node, DIRECT]}\nrules:\n  - MATCH,sel\n",
        );
        let second = bundle(
            "proxies:\n  - {name: node, type: ss}\nproxy-groups:\n  - {name: sel, type: select, proxies: [node]}\n  - {name: other, type: select, proxies: [node]}\nrules:\n  - DOMAIN,b.com,other\n",
        );
        let merged = merge_bundles(vec![first, second], GroupMode::Preserve).unwrap();

        assert_eq!(merged.proxy_names(), vec!["node", "node_1"]);
        assert_eq!(merged.proxy_groups.len(), 2);
        assert_eq!(merged.group_members("sel"), vec!["node", "DIRECT"]);
        assert_eq!(merged.group_members("other"), vec!["node_1"]);
        assert_eq!(
            merged.rules,
            vec![Value::from("MATCH,sel"), Value::from("DOMAIN,b.com,other")]
        );
    }

    #[test]
    fn test_name_of_numbers() {
        assert_eq!(name_of(&Value::from(42)), Some("42".to_string()));
        assert_eq!(name_of(&Value::Null), None);
    }
}
