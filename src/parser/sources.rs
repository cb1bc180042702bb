use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::utils::{file_get, is_link};

/// One configured subscription URL with its 1-based position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub index: usize,
    pub url: String,
}

/// Source URLs from a line-oriented list; lines not starting with `http` are ignored.
pub fn parse_sources(content: &str) -> Vec<SourceEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| is_link(line))
        .enumerate()
        .map(|(i, url)| SourceEntry {
            index: i + 1,
            url: url.to_string(),
        })
        .collect()
}

pub fn read_sources(path: &Path) -> Result<Vec<SourceEntry>> {
    let content = file_get(path).map_err(|e| {
        Error::Config(format!("cannot read source list {}: {}", path.display(), e))
    })?;
    let sources = parse_sources(&content);
    info!("Found {} source(s) in {}", sources.len(), path.display());
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources_keeps_order_and_ignores_other_lines() {
        let content = "# free nodes\nhttps://a.example/sub\n\nftp://nope\n  http://b.example/list.txt  \nnot a url\n";
        let sources = parse_sources(content);
        assert_eq!(
            sources,
            vec![
                SourceEntry {
                    index: 1,
                    url: "https://a.example/sub".to_string()
                },
                SourceEntry {
                    index: 2,
                    url: "http://b.example/list.txt".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_read_sources_missing_file() {
        assert!(matches!(
            read_sources(Path::new("/nonexistent/node.txt")),
            Err(Error::Config(_))
        ));
    }
}
