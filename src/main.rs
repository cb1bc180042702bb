use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{error, info};

use subfetch::generator::subdomains::output_base_from_arg;
use subfetch::settings::Settings;
use subfetch::{run_aggregator, run_zone_fetch, RunSummary};

/// Fetch DNS subdomain listings and aggregate proxy subscription sources
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML or YAML settings file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every zone's DNS records and write subdomain files
    Zones {
        /// API token (also read from CLOUDFLARE_API_TOKEN / CLOUDFLARE_API_TOKENS)
        token: Option<String>,

        /// Output file name; `.txt` is stripped and used as the file prefix
        output: Option<String>,

        /// File with one token per line, `#` comments allowed
        #[arg(long, value_name = "FILE")]
        token_file: Option<PathBuf>,

        /// Only process this zone (also CLOUDFLARE_DOMAIN)
        #[arg(long, value_name = "DOMAIN")]
        domain: Option<String>,

        /// Directory for the subdomain files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
    /// Download subscription sources, classify and merge them
    Nodes {
        /// File with one source URL per line
        #[arg(short, long, value_name = "FILE")]
        sources: Option<PathBuf>,

        /// Directory for merged and per-source outputs
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// `owner/name` used to build raw file URLs (also GITHUB_REPOSITORY)
        #[arg(short, long, value_name = "REPO")]
        repo: Option<String>,

        /// Branch used in raw file URLs
        #[arg(long, value_name = "BRANCH")]
        branch: Option<String>,

        /// Do not write the manifest
        #[arg(long)]
        no_manifest: bool,

        /// Sources downloaded at once; merge order stays the source order
        #[arg(long, value_name = "N")]
        concurrency: Option<usize>,
    },
}

fn load_settings(args: &Args) -> anyhow::Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::new(),
    };
    settings.apply_env();

    match &args.command {
        Command::Zones {
            output,
            token_file,
            domain,
            output_dir,
            ..
        } => {
            if let Some(output) = output {
                settings.zones.output_base = output_base_from_arg(output);
            }
            if let Some(token_file) = token_file {
                settings.zones.token_file = Some(token_file.clone());
            }
            if let Some(domain) = domain {
                settings.zones.domain = Some(domain.clone());
            }
            if let Some(output_dir) = output_dir {
                settings.zones.output_dir = output_dir.clone();
            }
        }
        Command::Nodes {
            sources,
            output_dir,
            repo,
            branch,
            no_manifest,
            concurrency,
        } => {
            if let Some(sources) = sources {
                settings.nodes.sources_file = sources.clone();
            }
            if let Some(output_dir) = output_dir {
                settings.nodes.output_dir = output_dir.clone();
            }
            if let Some(repo) = repo {
                settings.nodes.repository = Some(repo.clone());
            }
            if let Some(branch) = branch {
                settings.nodes.branch = branch.clone();
            }
            if *no_manifest {
                settings.nodes.write_manifest = false;
            }
            if let Some(concurrency) = concurrency {
                settings.nodes.concurrency = *concurrency;
            }
        }
    }
    Ok(settings)
}

async fn run(args: Args) -> anyhow::Result<RunSummary> {
    let settings = load_settings(&args)?;
    let summary = match &args.command {
        Command::Zones { token, .. } => run_zone_fetch(&settings, token.as_deref())
            .await
            .context("zone fetch failed")?,
        Command::Nodes { .. } => run_aggregator(&settings)
            .await
            .context("subscription aggregation failed")?,
    };
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize the logger
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    match run(args).await {
        Ok(summary) if summary.produced_output() => {
            info!("{} file(s) written", summary.artifacts.len());
            ExitCode::SUCCESS
        }
        Ok(_) => {
            error!("No output was produced");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
