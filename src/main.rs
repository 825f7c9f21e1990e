//! templinst CLI entrypoint
//! Parses command-line arguments and runs the instantiation pipelines.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use std::path::{Path, PathBuf};
use std::sync::Arc;
use templinst::{
    application::{
        GenerateRequest, InstantiationPipeline, PipelineReport, TargetStatus, WriteMode,
    },
    core::config::{Config, DEFAULT_MARKER, PipelineConfig},
    infrastructure::FileSystemSourceStore,
};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "templinst")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Show debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,
    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Regenerate the explicit instantiation block of every target
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// Fail if any target is out of date instead of writing it
        #[arg(long)]
        check: bool,
    },
    /// Print the instantiations each target would receive without writing
    Scan {
        #[command(flatten)]
        input: InputArgs,
        /// Print a JSON report
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Configuration file (templinst.yaml, templinst.yml or templinst.toml)
    #[arg(long, conflicts_with = "declarations")]
    config: Option<PathBuf>,
    /// Directory that relative paths are resolved against
    #[arg(long)]
    root: Option<PathBuf>,
    /// Declarations file of a single pipeline given on the command line
    #[arg(long, requires_all = ["usages", "target"])]
    declarations: Option<PathBuf>,
    /// Usage file of the command-line pipeline (repeatable)
    #[arg(long = "usage", requires = "declarations")]
    usages: Vec<PathBuf>,
    /// Target file of the command-line pipeline
    #[arg(long, requires = "declarations")]
    target: Option<PathBuf>,
    /// Sentinel comment line starting the generated block
    #[arg(long)]
    marker: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting templinst");
    match &cli.command {
        Commands::Generate { input, check } => {
            let mode = if *check {
                WriteMode::Check
            } else {
                WriteMode::Write
            };
            run_generate(input, mode).await?
        }
        Commands::Scan { input, json } => run_scan(input, *json).await?,
    }
    Ok(())
}

/// Build the pipeline requests from command-line flags or a configuration file
async fn load_requests(input: &InputArgs, mode: WriteMode) -> anyhow::Result<Vec<GenerateRequest>> {
    if let Some(declarations) = &input.declarations {
        let root = input.root.clone().unwrap_or_default();
        let pipeline = PipelineConfig {
            declarations: declarations.clone(),
            usages: input.usages.clone(),
            target: input
                .target
                .clone()
                .context("--target is required with --declarations")?,
        }
        .resolved_against(&root);
        let marker = input.marker.as_deref().unwrap_or(DEFAULT_MARKER);
        return Ok(vec![GenerateRequest::from_config(pipeline, marker, mode)]);
    }

    let (config_path, config) = match &input.config {
        Some(path) => {
            let config = Config::load(path)
                .await
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            (path.clone(), config)
        }
        None => {
            let root = match &input.root {
                Some(root) => root.clone(),
                None => std::env::current_dir().context("Failed to get current directory")?,
            };
            Config::discover(&root)
                .await
                .context("Failed to find a templinst configuration")?
        }
    };
    debug!(config_path = %config_path.display(), pipelines = config.pipelines.len(), "Loaded configuration");

    let root = input
        .root
        .clone()
        .or_else(|| config_path.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    let marker = input.marker.as_deref().unwrap_or(&config.marker);

    Ok(config
        .resolved_pipelines(&root)
        .into_iter()
        .map(|pipeline| GenerateRequest::from_config(pipeline, marker, mode))
        .collect())
}

/// Run every pipeline, report each outcome, and fail if any pipeline failed
async fn run_pipelines(requests: Vec<GenerateRequest>) -> anyhow::Result<Vec<PipelineReport>> {
    let pipeline = InstantiationPipeline::new(Arc::new(FileSystemSourceStore::new()));
    let total = requests.len();

    let mut reports = Vec::new();
    let mut failures = 0;
    for result in pipeline.execute_all(requests).await {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("❌ {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {total} pipeline(s) failed");
    }
    Ok(reports)
}

/// Runtime handler for the generate command
async fn run_generate(input: &InputArgs, mode: WriteMode) -> anyhow::Result<()> {
    let requests = load_requests(input, mode).await?;
    let reports = run_pipelines(requests).await?;

    for report in &reports {
        let label = match report.status {
            TargetStatus::Updated => "updated",
            TargetStatus::Unchanged => "unchanged",
            TargetStatus::OutOfDate => "out of date",
        };
        println!(
            "  • {} ({label}, {} instantiation(s))",
            report.target.display(),
            report.declarations.len()
        );
    }
    println!("✅ Template classes instantiation done");
    Ok(())
}

/// Runtime handler for the scan command
async fn run_scan(input: &InputArgs, json: bool) -> anyhow::Result<()> {
    let requests = load_requests(input, WriteMode::DryRun).await?;
    let reports = run_pipelines(requests).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for report in &reports {
        println!("{}:", report.target.display());
        if report.declarations.is_empty() {
            println!("  (no instantiations)");
        }
        for declaration in &report.declarations {
            println!("  {declaration}");
        }
    }
    Ok(())
}
