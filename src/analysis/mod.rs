//! Turns a repository snapshot into a model-backed [`AnalysisResult`]

pub mod client;
pub mod content;
pub mod parse;
pub mod result;

pub use client::{AzureChatModel, ChatModel};
pub use content::{flatten_files, prepare_content, FileBlock};
pub use parse::parse_analysis_response;
pub use result::{AnalysisResult, AnswerField, Confidence, QuestionKey};

use crate::config::{AnalysisSettings, Config};
use crate::error::Result;
use crate::github::RepoSnapshot;
use crate::prompts::{render_analysis_prompt, SYSTEM_PROMPT};
use log::{error, info, warn};

/// Reply substituted when the model call fails
const EMPTY_REPLY: &str = "{}";

/// Asks the model the fixed architecture questions about one snapshot
pub struct ArchitectureAnalyzer {
    model: Box<dyn ChatModel>,
    settings: AnalysisSettings,
}

impl ArchitectureAnalyzer {
    /// Creates an analyzer around any chat model
    pub fn new(model: Box<dyn ChatModel>, settings: AnalysisSettings) -> Self {
        Self { model, settings }
    }

    /// Creates an analyzer backed by the configured Azure OpenAI deployment
    pub fn from_config(config: &Config) -> Result<Self> {
        let model = AzureChatModel::from_config(config)?;
        Ok(Self::new(Box::new(model), config.analysis.clone()))
    }

    /// Analyzes a snapshot; never fails, unusable replies yield the sentinel result
    pub async fn analyze(&self, snapshot: &RepoSnapshot) -> AnalysisResult {
        let content = prepare_content(snapshot, self.settings.max_content_chars);
        let prompt = render_analysis_prompt(snapshot.repo(), &content);
        info!(
            "Analyzing {} ({} prompt characters)",
            snapshot.repo(),
            prompt.chars().count()
        );

        let reply = self.request_analysis(&prompt).await;
        let result = parse_analysis_response(&reply);
        if result.is_sentinel() {
            warn!("Analysis of {} produced no usable answer", snapshot.repo());
        }
        result
    }

    async fn request_analysis(&self, prompt: &str) -> String {
        match self.model.complete(SYSTEM_PROMPT, prompt).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!("Model returned an empty reply");
                EMPTY_REPLY.to_string()
            }
            Err(e) => {
                error!("Error calling Azure OpenAI: {}", e);
                EMPTY_REPLY.to_string()
            }
        }
    }
}
