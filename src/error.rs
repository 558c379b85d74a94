use thiserror::Error;
use std::io;
use async_openai::error::OpenAIError;

/// Custom result type alias for the application
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that can occur while collecting or analyzing a repository
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The repository URL has no recognizable host/owner/name triple
    #[error("Invalid GitHub URL: {0}")]
    InvalidUrl(String),

    /// I/O errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing/serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network connectivity errors
    #[error("Network error: {0}")]
    Network(String),

    /// GitHub API specific errors
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Content that could not be decoded into text
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Language model errors
    #[error("LLM error: {0}")]
    LLM(String),

    /// OpenAI API errors
    #[error("OpenAI error: {0}")]
    OpenAI(#[from] OpenAIError),
}

impl AnalyzerError {
    /// Checks if this error came from a remote collaborator rather than from bad input
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Network(_) |
            Self::Http(_) |
            Self::GitHubApi(_) |
            Self::OpenAI(_) |
            Self::LLM(_) |
            Self::IO(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_transient() {
        let transient = AnalyzerError::GitHubApi("HTTP 403".into());
        let fatal = AnalyzerError::InvalidUrl("https://example.com".into());

        assert!(transient.is_transient());
        assert!(!fatal.is_transient());
        assert!(!AnalyzerError::Decode("invalid utf-8".into()).is_transient());
    }

    #[test]
    fn test_invalid_url_message() {
        let error = AnalyzerError::InvalidUrl("github.com/only-owner".into());
        assert_eq!(error.to_string(), "Invalid GitHub URL: github.com/only-owner");
    }
}
