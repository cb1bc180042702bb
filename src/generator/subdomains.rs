//! Subdomain list files

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::generator::dedup::render_lines;
use crate::utils::{file_write, sanitize_file_name};

/// Strip a trailing `.txt` from the output-filename argument.
pub fn output_base_from_arg(arg: &str) -> String {
    arg.strip_suffix(".txt").unwrap_or(arg).to_string()
}

/// `{base}_{zone}.txt` with the zone name sanitized.
pub fn zone_file_name(base: &str, zone: &str) -> String {
    format!("{}_{}.txt", base, sanitize_file_name(zone))
}

pub fn merged_file_name(base: &str) -> String {
    format!("{}_all.txt", base)
}

/// Header block followed by one subdomain per line.
pub fn render_zone_file(zone: &str, subdomains: &[String], generated_at: &str) -> String {
    let mut out = format!(
        "# Domain: {}\n# Subdomains: {}\n# Generated: {}\n\n",
        zone,
        subdomains.len(),
        generated_at
    );
    out.push_str(&render_lines(subdomains));
    out
}

pub fn write_zone_file(
    dir: &Path,
    base: &str,
    zone: &str,
    subdomains: &[String],
    generated_at: &str,
) -> Result<PathBuf> {
    let path = dir.join(zone_file_name(base, zone));
    file_write(&path, &render_zone_file(zone, subdomains, generated_at))?;
    info!("{}: {} subdomain(s) -> {}", zone, subdomains.len(), path.display());
    Ok(path)
}

/// Union of every zone, no header.
pub fn write_merged_file(dir: &Path, base: &str, subdomains: &[String]) -> Result<PathBuf> {
    let path = dir.join(merged_file_name(base));
    file_write(&path, &render_lines(subdomains))?;
    info!("All zones: {} subdomain(s) -> {}", subdomains.len(), path.display());
    Ok(path)
}
