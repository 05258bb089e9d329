//! Forcescan CLI - scan sources for market forces shaping an industry.

use clap::Parser;
use forcescan_cli::scanners::{DocumentScanner, WebScanner};
use forcescan_cli::{Cli, CliError, Config, ConsoleReviewChannel};
use forcescan_domain::{PlanInput, SourceCategory, SourceGroup, StageStatus};
use forcescan_oracle::OllamaOracle;
use forcescan_pipeline::Pipeline;
use forcescan_scanner::ScanCoordinator;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> forcescan_cli::Result<()> {
    let cli = Cli::parse();

    // Log to stderr; the checkpoint prompts own stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load(Path::new(path))?,
        None => Config::default(),
    };

    if let Some(endpoint) = &cli.oracle_endpoint {
        config.oracle.endpoint = endpoint.clone();
    }
    if let Some(model) = &cli.oracle_model {
        config.oracle.model = model.clone();
    }
    if cli.no_force_review || cli.yes {
        config.pipeline.review_forces = false;
    }
    config
        .pipeline
        .validate()
        .map_err(CliError::Config)?;

    let input = plan_input(&cli);

    let oracle = OllamaOracle::new(&config.oracle.endpoint, &config.oracle.model);

    let coordinator = ScanCoordinator::new(config.pipeline.scan.clone())
        .register("web", Arc::new(WebScanner::new()))
        .register(
            "document",
            Arc::new(DocumentScanner::new(SourceCategory::Document)),
        )
        .register(
            "uploaded",
            Arc::new(DocumentScanner::new(SourceCategory::Uploaded)),
        );

    let review = ConsoleReviewChannel::new(cli.yes);
    let pipeline = Pipeline::new(oracle, coordinator, review, review, config.pipeline.clone());

    let outcome = pipeline.run(input).await;

    match outcome.status {
        StageStatus::Approved => {
            let report = outcome
                .report
                .ok_or_else(|| CliError::Pipeline("run approved but produced no report".into()))?;

            let (table_path, report_path) =
                report.write_markdown(Path::new(&cli.output_dir))?;

            info!("{}", outcome.summary);
            println!("\n{}", report.markdown_table);
            println!("Table:  {}", table_path.display());
            println!("Report: {}", report_path.display());

            if !report.scan_failures.is_empty() {
                eprintln!("\n{} source(s) could not be scanned:", report.scan_failures.len());
                for failure in &report.scan_failures {
                    eprintln!("  - {}: {}", failure.source, failure.reason);
                }
            }
            Ok(())
        }
        StageStatus::Rejected => {
            println!(
                "Run halted by reviewer: {}",
                outcome.message.unwrap_or_else(|| "no reason given".into())
            );
            Ok(())
        }
        StageStatus::Error => Err(CliError::Pipeline(
            outcome.message.unwrap_or_else(|| outcome.summary.clone()),
        )),
    }
}

/// Translate CLI arguments into pipeline input.
fn plan_input(cli: &Cli) -> PlanInput {
    let mut source_groups = Vec::new();

    if !cli.source.is_empty() {
        source_groups.push(SourceGroup {
            category: "web".to_string(),
            sources: cli.source.clone(),
        });
    }
    if !cli.document.is_empty() {
        source_groups.push(SourceGroup {
            category: "document".to_string(),
            sources: cli.document.clone(),
        });
    }

    PlanInput {
        target_industry: cli.industry.clone(),
        target_market: cli.market.clone(),
        keywords: cli.keyword.clone(),
        time_horizon: cli.horizon.clone(),
        source_groups,
        uploaded_files: cli.upload.clone(),
    }
}
