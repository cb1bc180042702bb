//! Zone/record fetching pipeline
//!
//! For every token: list zones → list each zone's records → extract names →
//! write one file per zone, plus a merged file when several zones were found.

use std::collections::BTreeMap;

use log::{error, info, warn};

use crate::api::DnsApiClient;
use crate::error::Result;
use crate::generator::subdomains::{write_merged_file, write_zone_file};
use crate::interfaces::RunSummary;
use crate::models::Zone;
use crate::parser::{extract_subdomains, merge_subdomains};
use crate::settings::{collect_tokens, Settings};
use crate::utils::time::local_timestamp;

/// Keep only the zone named `domain`, when set.
pub fn filter_zones(zones: Vec<Zone>, domain: Option<&str>) -> Vec<Zone> {
    match domain {
        Some(domain) => {
            let wanted = domain.trim().trim_end_matches('.').to_ascii_lowercase();
            zones
                .into_iter()
                .filter(|zone| zone.name.to_ascii_lowercase() == wanted)
                .collect()
        }
        None => zones,
    }
}

/// Run the zone fetcher. `cli_token` comes first among the token sources.
///
/// A missing token, or one rejected while listing zones, aborts the run. Any
/// failure while listing one zone's records, permission errors included,
/// skips that zone only.
pub async fn run_zone_fetch(settings: &Settings, cli_token: Option<&str>) -> Result<RunSummary> {
    let zones_cfg = &settings.zones;
    let tokens = collect_tokens(cli_token, zones_cfg)?;
    info!("Using {} API token(s)", tokens.len());

    let mut results: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut summary = RunSummary::default();

    for (i, token) in tokens.iter().enumerate() {
        let client = DnsApiClient::new(
            &zones_cfg.api_base,
            token,
            settings.http.timeout(),
            &settings.http.user_agent,
        )?;

        let zones = match client.list_zones().await {
            Ok(zones) => zones,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!("Token #{}: cannot list zones: {}", i + 1, e);
                continue;
            }
        };
        let zones = filter_zones(zones, zones_cfg.domain.as_deref());
        if zones.is_empty() {
            warn!("Token #{}: no zones found", i + 1);
            continue;
        }
        info!("Token #{}: {} zone(s)", i + 1, zones.len());

        for zone in zones {
            summary.attempted += 1;
            let records = match client.list_dns_records(&zone.id).await {
                Ok(records) => records,
                Err(e) => {
                    error!("{}: cannot list DNS records: {}", zone.name, e);
                    summary.failed += 1;
                    continue;
                }
            };
            if records.is_empty() {
                warn!("{}: no DNS records", zone.name);
                summary.failed += 1;
                continue;
            }

            summary.succeeded += 1;
            let subdomains = extract_subdomains(&records);
            let entry = results.entry(zone.name).or_default();
            *entry = merge_subdomains([&*entry, &subdomains]);
        }
    }

    if results.is_empty() {
        warn!("No zones produced any subdomains");
        return Ok(summary);
    }

    let generated_at = local_timestamp();
    for (zone, subdomains) in &results {
        match write_zone_file(
            &zones_cfg.output_dir,
            &zones_cfg.output_base,
            zone,
            subdomains,
            &generated_at,
        ) {
            Ok(path) => summary.artifacts.push(path),
            Err(e) => error!("{}: cannot write subdomain file: {}", zone, e),
        }
    }

    let all = merge_subdomains(results.values());
    if results.len() > 1 {
        match write_merged_file(&zones_cfg.output_dir, &zones_cfg.output_base, &all) {
            Ok(path) => summary.artifacts.push(path),
            Err(e) => error!("Cannot write merged subdomain file: {}", e),
        }
    }

    info!(
        "Done: {} zone(s), {} subdomain(s)",
        results.len(),
        all.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(name: &str) -> Zone {
        Zone {
            id: format!("id-{}", name),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_filter_zones() {
        let zones = vec![zone("a.com"), zone("b.com")];
        assert_eq!(filter_zones(zones.clone(), None).len(), 2);
        let filtered = filter_zones(zones, Some(" B.com. "));
        assert_eq!(filtered, vec![zone("b.com")]);
    }
}
