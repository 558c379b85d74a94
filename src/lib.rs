#![warn(clippy::all)]

//! repo-arch-analyzer - classify the architecture of a GitHub repository with Azure OpenAI
//!
//! The crate is two sequential pipelines:
//! - [`github::RepositoryCollector`] gathers relevant files, the README and
//!   architecture diagram candidates, degrading to raw-content scraping when
//!   the authenticated API is unavailable.
//! - [`analysis::ArchitectureAnalyzer`] flattens that snapshot into a prompt,
//!   asks the model twelve fixed questions and parses the JSON answer,
//!   substituting a fixed fallback result when the reply is unusable.
//!
//! ## Usage
//! ```rust,ignore
//! use repo_arch_analyzer::{ArchitectureAnalyzer, Config, RepositoryCollector};
//!
//! async fn example() -> repo_arch_analyzer::Result<()> {
//!     let config = Config::from_env();
//!     let collector = RepositoryCollector::new(&config.github)?;
//!     let analyzer = ArchitectureAnalyzer::from_config(&config)?;
//!
//!     let snapshot = collector.collect("https://github.com/Azure-Samples/azure-search-openai-demo").await?;
//!     let result = analyzer.analyze(&snapshot).await;
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```

/// Model-backed analysis of a repository snapshot
pub mod analysis;
/// Configuration module for the application
pub mod config;
/// Error handling types and utilities
pub mod error;
/// GitHub access and repository collection
pub mod github;
/// Logging configuration and utilities
pub mod logging;
/// Prompt templates
pub mod prompts;
/// JSON and terminal reports
pub mod report;
/// Utilities (strategy fallback, input normalization)
pub mod utils;

// Re-export common types
pub use analysis::{AnalysisResult, AnswerField, ArchitectureAnalyzer, Confidence, QuestionKey};
pub use config::Config;
pub use error::{AnalyzerError, Result};
pub use github::{RepoRef, RepoSnapshot, RepositoryCollector, SourceFile};
pub use report::AnalysisReport;
