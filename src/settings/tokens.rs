use std::collections::HashSet;

use log::info;

use crate::error::{Error, Result};
use crate::settings::ZoneSettings;
use crate::utils::file::read_list_file;

/// Gather API tokens from the command line, the settings (file and
/// environment) and the optional token file, in that order.
///
/// Duplicates are dropped. Having no token at all is an [`Error::Auth`].
pub fn collect_tokens(cli_token: Option<&str>, zones: &ZoneSettings) -> Result<Vec<String>> {
    let mut candidates: Vec<String> = Vec::new();
    if let Some(token) = cli_token {
        candidates.push(token.to_string());
    }
    candidates.extend(zones.tokens.iter().cloned());

    if let Some(path) = &zones.token_file {
        let from_file = read_list_file(path).map_err(|e| {
            Error::Config(format!("cannot read token file {}: {}", path.display(), e))
        })?;
        info!("Loaded {} token(s) from {}", from_file.len(), path.display());
        candidates.extend(from_file);
    }

    let mut seen = HashSet::new();
    let tokens: Vec<String> = candidates
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.clone()))
        .collect();

    if tokens.is_empty() {
        return Err(Error::Auth("no API token provided".to_string()));
    }
    Ok(tokens)
}
