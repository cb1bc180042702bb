//! Subscription aggregation pipeline
//!
//! Source list → download with retry → classify → per-source files →
//! merged plain list and merged Clash bundle → manifest.

use futures::stream::{self, StreamExt};
use log::{error, info, warn};
use serde_yaml::Mapping;

use crate::constants::defaults::{CLASH_OUTPUT_FILE, NODE_CONTENT_FILE, SOURCES_SUBDIR};
use crate::error::Result;
use crate::generator::{
    build_manifest, dedup_lines, merge_bundles, render_lines, write_manifest, OutputLocator,
};
use crate::interfaces::RunSummary;
use crate::models::{Classification, ClassifiedContent, OutputFile, SourceReport, SourceStatus};
use crate::parser::{read_sources, Classifier, SourceEntry};
use crate::settings::Settings;
use crate::utils::http::{build_client, download_with_retry};
use crate::utils::time::utc_timestamp;
use crate::utils::url::url_host;
use crate::utils::{file_write, sanitize_file_name};

/// State folded over the sources of one run.
struct Accumulator {
    locator: OutputLocator,
    bundles: Vec<Mapping>,
    texts: Vec<String>,
    reports: Vec<SourceReport>,
    artifacts: Vec<std::path::PathBuf>,
}

impl Accumulator {
    fn new(locator: OutputLocator) -> Self {
        Accumulator {
            locator,
            bundles: Vec::new(),
            texts: Vec::new(),
            reports: Vec::new(),
            artifacts: Vec::new(),
        }
    }

    /// Write `content` under the output directory and describe it.
    fn write(&mut self, relative: &str, content: &str) -> Option<OutputFile> {
        let path = self.locator.path_of(relative);
        match file_write(&path, content) {
            Ok(bytes) => {
                self.artifacts.push(path);
                Some(self.locator.describe(relative, bytes))
            }
            Err(e) => {
                error!("Failed to write {}: {}", path.display(), e);
                None
            }
        }
    }

    fn add_source(&mut self, source: &SourceEntry, body: Option<String>, fetched_at: String) {
        let body = match body {
            Some(body) if !body.trim().is_empty() => body,
            Some(_) => {
                warn!("[{}] empty response from {}", source.index, source.url);
                self.reports
                    .push(SourceReport::failed(source.index, &source.url, "empty response"));
                return;
            }
            None => {
                self.reports
                    .push(SourceReport::failed(source.index, &source.url, "download failed"));
                return;
            }
        };

        let classification = Classifier::default().classify(&body);
        self.add_classified(source, classification, fetched_at);
    }

    fn add_classified(
        &mut self,
        source: &SourceEntry,
        classification: Classification,
        fetched_at: String,
    ) {
        let stem = source_file_stem(source);
        let mut files = Vec::new();

        for content in classification.iter() {
            let kind = content.kind();
            let relative = format!("{}/{}.{}", SOURCES_SUBDIR, stem, kind.extension());
            let rendered = match content {
                ClassifiedContent::ClashBundle(map) => match serde_yaml::to_string(map) {
                    Ok(yaml) => yaml,
                    Err(e) => {
                        error!("[{}] cannot render bundle: {}", source.index, e);
                        continue;
                    }
                },
                other => other.text().unwrap_or_default().to_string(),
            };
            if let Some(file) = self.write(&relative, &rendered) {
                files.push(file);
            }
        }

        info!(
            "[{}] {} classified as {}",
            source.index,
            source.url,
            classification
                .kinds()
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("+")
        );

        let detected = classification.kinds();
        if let Some(map) = classification.bundle_mapping() {
            self.bundles.push(map.clone());
        }
        if let Some(text) = classification.text_payload() {
            self.texts.push(text.to_string());
        }

        self.reports.push(SourceReport {
            index: source.index,
            url: source.url.clone(),
            status: SourceStatus::Success,
            detected,
            files,
            fetched_at: Some(fetched_at),
            error: None,
        });
    }

    /// Write the merged plain list and merged bundle.
    fn finish(&mut self, settings: &Settings) -> Vec<OutputFile> {
        let mut outputs = Vec::new();

        let lines = dedup_lines(&self.texts);
        if !lines.is_empty() {
            if let Some(file) = self.write(NODE_CONTENT_FILE, &render_lines(&lines)) {
                info!("{} unique line(s) -> {}", lines.len(), NODE_CONTENT_FILE);
                outputs.push(file);
            }
        }

        let bundles = std::mem::take(&mut self.bundles);
        match merge_bundles(bundles, settings.nodes.group_mode) {
            Some(merged) if !merged.is_empty() => match merged.to_yaml_string() {
                Ok(yaml) => {
                    if let Some(file) = self.write(CLASH_OUTPUT_FILE, &yaml) {
                        info!(
                            "{} prox(ies) -> {}",
                            merged.proxies.len(),
                            CLASH_OUTPUT_FILE
                        );
                        outputs.push(file);
                    }
                }
                Err(e) => error!("Cannot render merged bundle: {}", e),
            },
            Some(_) => warn!("Clash bundles carried no usable proxies"),
            None => {}
        }
        outputs
    }
}

/// `{index:02}_{host}` for per-source files.
fn source_file_stem(source: &SourceEntry) -> String {
    let host = url_host(&source.url).unwrap_or_else(|| "source".to_string());
    format!("{:02}_{}", source.index, sanitize_file_name(&host))
}

/// Run the aggregator with the given settings.
pub async fn run_aggregator(settings: &Settings) -> Result<RunSummary> {
    let nodes = &settings.nodes;
    info!("Reading sources from {}", nodes.sources_file.display());
    let sources = read_sources(&nodes.sources_file)?;
    if sources.is_empty() {
        warn!("No sources to process");
        return Ok(RunSummary::default());
    }

    let client = build_client(settings.http.timeout(), &settings.http.user_agent)?;
    let policy = settings.http.retry_policy();
    let locator = OutputLocator::new(&nodes.output_dir, nodes.repository.as_deref(), &nodes.branch);
    let mut acc = Accumulator::new(locator);

    let total = sources.len();
    let client = &client;
    let policy = &policy;
    let mut fetched = std::pin::pin!(stream::iter(sources)
        .map(move |source| async move {
            let body = download_with_retry(client, &source.url, policy).await;
            (source, body, utc_timestamp())
        })
        .buffered(nodes.concurrency.max(1)));

    while let Some((source, body, fetched_at)) = fetched.next().await {
        info!("[{}/{}] {}", source.index, total, source.url);
        acc.add_source(&source, body, fetched_at);
    }

    let outputs = acc.finish(settings);

    let mut summary = RunSummary {
        attempted: total,
        succeeded: acc.reports.iter().filter(|r| r.is_success()).count(),
        ..Default::default()
    };
    summary.failed = total - summary.succeeded;

    if nodes.write_manifest {
        let manifest = build_manifest(acc.reports, outputs, nodes.repository.as_deref());
        match write_manifest(&nodes.output_dir, &manifest, nodes.manifest_format) {
            Ok(path) => summary.manifest = Some(path),
            Err(e) => error!("Failed to write manifest: {}", e),
        }
    }
    summary.artifacts = acc.artifacts;

    info!(
        "Sources: {} total, {} succeeded, {} failed; {} file(s) written",
        summary.attempted,
        summary.succeeded,
        summary.failed,
        summary.artifacts.len()
    );
    Ok(summary)
}
