use repo_arch_analyzer::{
    config::Config,
    logging,
    report::{self, AnalysisReport},
    utils::normalize_repo_input,
    ArchitectureAnalyzer, RepositoryCollector,
};
use anyhow::Context;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// GitHub repository URLs to analyze, one after another
    #[arg(required = true)]
    urls: Vec<String>,

    /// Configuration file (TOML); environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write all reports to this JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print reports as JSON instead of the colored summary
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Collect repository content without calling the model
    #[arg(long)]
    collect_only: bool,
}

fn progress_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        pb.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]));
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message);
    pb
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_env(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    logging::init(&config.log_level)?;
    config.validate()?;

    let collector = RepositoryCollector::new(&config.github)?;
    let analyzer = if cli.collect_only {
        None
    } else {
        Some(ArchitectureAnalyzer::from_config(&config)
            .context("Azure OpenAI is not configured; set the AZURE_OPENAI_* variables or pass --collect-only")?)
    };

    let mut reports = Vec::new();
    let mut failures = 0usize;

    for raw in &cli.urls {
        let url = normalize_repo_input(raw);
        let pb = progress_spinner(format!("Collecting {}", url));

        let snapshot = match collector.collect(&url).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                pb.finish_and_clear();
                error!("Skipping {}: {}", url, e);
                eprintln!("{} {}", "[ERROR]".bright_red(), e.to_string().bright_red());
                failures += 1;
                continue;
            }
        };

        let result = match &analyzer {
            Some(analyzer) => {
                pb.set_message(format!("Analyzing {}", snapshot.repo()));
                Some(analyzer.analyze(&snapshot).await)
            }
            None => None,
        };
        pb.finish_and_clear();

        let report = AnalysisReport::new(&snapshot, result);
        if !cli.json {
            println!("{}", report::render_summary(&report));
        }
        reports.push(report);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if let Some(path) = &cli.output {
        report::write_reports(path, &reports).await?;
        info!("Wrote {} reports to {}", reports.len(), path.display());
    }

    if failures > 0 {
        anyhow::bail!("{} of {} repositories could not be analyzed", failures, cli.urls.len());
    }
    Ok(())
}
