use crate::analysis::{AnalysisResult, Confidence};
use crate::error::{AnalyzerError, Result};
use crate::github::{RepoRef, RepoSnapshot};
use chrono::{DateTime, Utc};
use colored::*;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

/// Everything recorded about one analyzed repository
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Repository identity
    pub repository: RepoRef,
    /// When the analysis finished
    pub analyzed_at: DateTime<Utc>,
    /// Number of files collected
    pub files_collected: usize,
    /// Paths of the collected files, in discovery order
    pub file_paths: Vec<String>,
    /// Whether a README was found
    pub readme_present: bool,
    /// Candidate architecture diagram URLs
    pub diagram_urls: Vec<String>,
    /// Model answers; absent for collect-only runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
}

impl AnalysisReport {
    /// Summarizes a snapshot and its analysis
    pub fn new(snapshot: &RepoSnapshot, result: Option<AnalysisResult>) -> Self {
        Self {
            repository: snapshot.repo().clone(),
            analyzed_at: Utc::now(),
            files_collected: snapshot.files().len(),
            file_paths: snapshot.files().iter().map(|file| file.path.clone()).collect(),
            readme_present: !snapshot.readme().is_empty(),
            diagram_urls: snapshot.diagram_urls().to_vec(),
            result,
        }
    }
}

/// Writes reports as a pretty-printed JSON array, creating parent directories
pub async fn write_reports(path: &Path, reports: &[AnalysisReport]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await
                .map_err(AnalyzerError::IO)?;
        }
    }

    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json).await
        .map_err(AnalyzerError::IO)
}

fn paint_confidence(confidence: Confidence) -> ColoredString {
    match confidence {
        Confidence::High => confidence.as_str().bright_green(),
        Confidence::Medium => confidence.as_str().bright_yellow(),
        Confidence::Low => confidence.as_str().bright_red(),
    }
}

/// Formats one report for the terminal
pub fn render_summary(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", report.repository.to_string().bright_green().bold()));
    out.push_str(&format!("{}\n", report.repository.url().bright_blue()));
    out.push_str(&format!(
        "  {} {}   {} {}   {} {}\n",
        "Files:".bright_white().bold(),
        report.files_collected,
        "README:".bright_white().bold(),
        if report.readme_present { "yes" } else { "no" },
        "Diagrams:".bright_white().bold(),
        report.diagram_urls.len()
    ));

    let Some(result) = &report.result else {
        return out;
    };

    if result.is_sentinel() {
        out.push_str(&format!("  {}\n", "The model reply could not be parsed.".bright_red()));
    }

    for (key, field) in result.iter() {
        out.push_str(&format!(
            "  {:<32} {} [{}]\n",
            key.label().bright_cyan(),
            field.display_value(),
            paint_confidence(field.confidence)
        ));
        if !field.explanation.is_empty() {
            out.push_str(&format!("  {:<32} {}\n", "", field.explanation.dimmed()));
        }
    }

    out
}
