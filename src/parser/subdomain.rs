use std::collections::BTreeSet;

use crate::models::DnsRecord;

/// Sorted, deduplicated, non-empty record names.
pub fn extract_subdomains(records: &[DnsRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name.trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Sorted union of several subdomain sets.
pub fn merge_subdomains<'a, I>(sets: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    sets.into_iter()
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
