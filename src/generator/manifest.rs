//! Manifest generation for the subscription aggregator

use std::path::{Path, PathBuf};

use log::info;

use crate::constants::defaults::MANIFEST_BASENAME;
use crate::error::{Error, Result};
use crate::models::{Manifest, OutputFile, SourceReport};
use crate::settings::ManifestFormat;
use crate::utils::file_write;
use crate::utils::time::utc_timestamp;
use crate::utils::url::raw_file_url;

/// Describes files under the output directory, adding raw URLs when the
/// repository is known.
#[derive(Debug, Clone)]
pub struct OutputLocator {
    pub output_dir: PathBuf,
    pub repository: Option<String>,
    pub branch: String,
}

impl OutputLocator {
    pub fn new(output_dir: &Path, repository: Option<&str>, branch: &str) -> Self {
        OutputLocator {
            output_dir: output_dir.to_path_buf(),
            repository: repository.map(str::to_string),
            branch: branch.to_string(),
        }
    }

    /// Absolute or working-directory path of `relative`.
    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.output_dir.join(relative)
    }

    pub fn describe(&self, relative: &str, bytes: u64) -> OutputFile {
        let url = self.repository.as_deref().map(|repo| {
            let repo_path = if self.output_dir.is_absolute() {
                relative.to_string()
            } else {
                let dir = self.output_dir.to_string_lossy().replace('\\', "/");
                let dir = dir.trim_start_matches("./").trim_end_matches('/');
                if dir.is_empty() || dir == "." {
                    relative.to_string()
                } else {
                    format!("{}/{}", dir, relative)
                }
            };
            raw_file_url(repo, &self.branch, &repo_path)
        });
        OutputFile {
            path: relative.to_string(),
            bytes,
            url,
        }
    }
}

/// Summarize per-source reports and the merged outputs.
pub fn build_manifest(
    sources: Vec<SourceReport>,
    outputs: Vec<OutputFile>,
    repository: Option<&str>,
) -> Manifest {
    let succeeded = sources.iter().filter(|s| s.is_success()).count();
    Manifest {
        generated_at: utc_timestamp(),
        repository: repository.map(str::to_string),
        total_sources: sources.len(),
        succeeded,
        failed: sources.len() - succeeded,
        sources,
        outputs,
    }
}

pub fn render_manifest(manifest: &Manifest, format: ManifestFormat) -> Result<String> {
    match format {
        ManifestFormat::Json => {
            serde_json::to_string_pretty(manifest).map_err(|e| Error::Parse(e.to_string()))
        }
        ManifestFormat::Yaml => {
            serde_yaml::to_string(manifest).map_err(|e| Error::Parse(e.to_string()))
        }
    }
}

/// Write the manifest into the output directory and return its path.
pub fn write_manifest(
    output_dir: &Path,
    manifest: &Manifest,
    format: ManifestFormat,
) -> Result<PathBuf> {
    let content = render_manifest(manifest, format)?;
    let path = output_dir.join(format!("{}.{}", MANIFEST_BASENAME, format.extension()));
    let bytes = file_write(&path, &content)?;
    info!("Manifest written: {} ({} bytes)", path.display(), bytes);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentKind, SourceStatus};

    fn success(index: usize, file: OutputFile) -> SourceReport {
        SourceReport {
            index,
            url: format!("https://s{}.example/sub", index),
            status: SourceStatus::Success,
            detected: vec![ContentKind::Base64],
            files: vec![file],
            fetched_at: Some(utc_timestamp()),
            error: None,
        }
    }

    #[test]
    fn test_describe_with_repository() {
        let locator = OutputLocator::new(Path::new("output"), Some("octo/nodes"), "main");
        let file = locator.describe("clash.yml", 12);
        assert_eq!(file.path, "clash.yml");
        assert_eq!(file.bytes, 12);
        assert_eq!(
            file.url.as_deref(),
            Some("https://raw.githubusercontent.com/octo/nodes/main/output/clash.yml")
        );
        assert_eq!(locator.path_of("clash.yml"), PathBuf::from("output/clash.yml"));
    }

    #[test]
    fn test_describe_without_repository() {
        let locator = OutputLocator::new(Path::new("./"), None, "main");
        assert_eq!(locator.describe("a.txt", 1).url, None);
    }

    #[test]
    fn test_build_manifest_counts() {
        let locator = OutputLocator::new(Path::new("out"), None, "main");
        let manifest = build_manifest(
            vec![
                success(1, locator.describe("sources/01_a.txt", 10)),
                SourceReport::failed(2, "https://s2.example/sub", "no content"),
            ],
            vec![locator.describe("node_content.txt", 10)],
            None,
        );
        assert_eq!(manifest.total_sources, 2);
        assert_eq!(manifest.succeeded, 1);
        assert_eq!(manifest.failed, 1);

        let json = render_manifest(&manifest, ManifestFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["sources"][0]["detected"][0], "base64");
        assert_eq!(value["sources"][1]["status"], "failed");
        assert!(value.get("repository").is_none());
    }

    #[test]
    fn test_write_yaml_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = build_manifest(Vec::new(), Vec::new(), Some("octo/nodes"));
        let path = write_manifest(dir.path(), &manifest, ManifestFormat::Yaml).unwrap();
        assert_eq!(path.file_name().unwrap(), "manifest.yaml");
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("repository: octo/nodes"));
        assert!(content.contains("total_sources: 0"));
    }
}
