mod env_manager;

use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::error::{AnalyzerError, Result};
use std::fs;
use url::Url;

pub use env_manager::get_env_value;
use env_manager::override_from_env;

/// Public GitHub REST API
pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
/// Public raw-content host
pub const DEFAULT_GITHUB_RAW_BASE: &str = "https://raw.githubusercontent.com";
/// API version used when none is configured
pub const DEFAULT_AZURE_API_VERSION: &str = "2023-12-01-preview";
/// Character budget for the flattened repository content
pub const DEFAULT_MAX_CONTENT_CHARS: usize = 50_000;

/// Main configuration struct for the application
///
/// Every component receives the settings it needs from this value at
/// construction time; nothing below `main` reads the environment directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source host settings
    pub github: GitHubSettings,
    /// Language model host settings
    pub azure: AzureSettings,
    /// Prompt and sampling settings
    pub analysis: AnalysisSettings,
    /// Default log level when `RUST_LOG` is not set
    pub log_level: String,
}

/// Settings for the GitHub API and raw-content host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// Token for the authenticated contents API; enables tree traversal
    pub token: Option<String>,
    /// Base URL of the REST API
    pub api_base: String,
    /// Base URL of the raw-content host
    pub raw_base: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Settings for the Azure OpenAI deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureSettings {
    /// Resource endpoint, e.g. `https://my-resource.openai.azure.com`
    pub endpoint: Option<String>,
    /// API key
    pub api_key: Option<String>,
    /// Deployment name
    pub deployment: Option<String>,
    /// REST API version
    pub api_version: String,
}

/// A fully specified Azure OpenAI deployment
#[derive(Debug, Clone, PartialEq)]
pub struct AzureDeployment {
    /// Resource endpoint
    pub endpoint: String,
    /// API key
    pub api_key: String,
    /// Deployment name
    pub deployment: String,
    /// REST API version
    pub api_version: String,
}

/// Settings for prompt construction and the model call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Character budget for file contents in the prompt
    pub max_content_chars: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the model reply
    pub max_tokens: u32,
}

impl Config {
    /// Builds a configuration from defaults and environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Location of the optional configuration file
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AnalyzerError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("repo-arch-analyzer").join("config.toml"))
    }

    /// Loads configuration from a TOML file, then applies environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AnalyzerError::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let mut config: Self = toml::from_str(&content)
            .map_err(|e| AnalyzerError::Config(format!("Failed to parse config file: {}", e)))?;
        config.apply_env();
        Ok(config)
    }

    /// Loads the given file, the default file if it exists, or the environment alone
    pub fn load_or_env(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            _ => Ok(Self::from_env()),
        }
    }

    fn apply_env(&mut self) {
        override_from_env(&mut self.github.token, env_manager::GITHUB_TOKEN);
        if let Some(base) = get_env_value(env_manager::GITHUB_API_BASE_URL) {
            self.github.api_base = base;
        }
        if let Some(base) = get_env_value(env_manager::GITHUB_RAW_BASE_URL) {
            self.github.raw_base = base;
        }

        override_from_env(&mut self.azure.api_key, env_manager::AZURE_OPENAI_KEY);
        override_from_env(&mut self.azure.endpoint, env_manager::AZURE_OPENAI_ENDPOINT);
        override_from_env(&mut self.azure.deployment, env_manager::AZURE_OPENAI_DEPLOYMENT);
        if let Some(version) = get_env_value(env_manager::AZURE_OPENAI_API_VERSION) {
            self.azure.api_version = version;
        }
    }

    /// Checks that URLs parse, the token is not blank and the budget is usable
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.github.api_base)
            .map_err(|e| AnalyzerError::Config(format!("Invalid GitHub API base URL: {}", e)))?;
        Url::parse(&self.github.raw_base)
            .map_err(|e| AnalyzerError::Config(format!("Invalid raw-content base URL: {}", e)))?;

        if let Some(token) = &self.github.token {
            if token.trim().is_empty() {
                return Err(AnalyzerError::Config("GitHub token is empty".into()));
            }
        }

        if let Some(endpoint) = &self.azure.endpoint {
            Url::parse(endpoint)
                .map_err(|e| AnalyzerError::Config(format!("Invalid Azure OpenAI endpoint: {}", e)))?;
        }

        if self.analysis.max_content_chars == 0 {
            return Err(AnalyzerError::Config("max_content_chars must be greater than zero".into()));
        }

        Ok(())
    }
}

impl GitHubSettings {
    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AzureSettings {
    /// Returns the complete deployment, or a config error naming what is missing
    pub fn require(&self) -> Result<AzureDeployment> {
        let mut missing = Vec::new();
        if self.endpoint.is_none() {
            missing.push("AZURE_OPENAI_ENDPOINT");
        }
        if self.api_key.is_none() {
            missing.push("AZURE_OPENAI_KEY");
        }
        if self.deployment.is_none() {
            missing.push("AZURE_OPENAI_DEPLOYMENT");
        }

        match (&self.endpoint, &self.api_key, &self.deployment) {
            (Some(endpoint), Some(api_key), Some(deployment)) => Ok(AzureDeployment {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                api_key: api_key.clone(),
                deployment: deployment.clone(),
                api_version: self.api_version.clone(),
            }),
            _ => Err(AnalyzerError::Config(format!(
                "Missing Azure OpenAI configuration: {}",
                missing.join(", ")
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubSettings::default(),
            azure: AzureSettings::default(),
            analysis: AnalysisSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            token: None,
            api_base: DEFAULT_GITHUB_API_BASE.to_string(),
            raw_base: DEFAULT_GITHUB_RAW_BASE.to_string(),
            timeout_secs: 30,
            user_agent: "repo-arch-analyzer".to_string(),
        }
    }
}

impl Default for AzureSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            deployment: None,
            api_version: DEFAULT_AZURE_API_VERSION.to_string(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_content_chars: DEFAULT_MAX_CONTENT_CHARS,
            temperature: 0.1,
            max_tokens: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_validate() -> Result<()> {
        let config = Config::default();
        config.validate()?;
        assert!(config.github.token.is_none());
        assert_eq!(config.analysis.max_content_chars, 50_000);
        assert_eq!(config.azure.api_version, "2023-12-01-preview");
        Ok(())
    }

    #[test]
    fn test_blank_token_is_rejected() {
        let mut config = Config::default();
        config.github.token = Some("  ".to_string());
        assert!(matches!(config.validate(), Err(AnalyzerError::Config(_))));
    }

    #[test]
    fn test_zero_budget_is_rejected() {
        let mut config = Config::default();
        config.analysis.max_content_chars = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_require_names_missing_settings() {
        let settings = AzureSettings {
            endpoint: Some("https://example.openai.azure.com".into()),
            ..AzureSettings::default()
        };
        let err = settings.require().unwrap_err().to_string();
        assert!(err.contains("AZURE_OPENAI_KEY"));
        assert!(err.contains("AZURE_OPENAI_DEPLOYMENT"));
        assert!(!err.contains("AZURE_OPENAI_ENDPOINT"));
    }

    #[test]
    fn test_require_trims_endpoint() -> Result<()> {
        let settings = AzureSettings {
            endpoint: Some("https://example.openai.azure.com/".into()),
            api_key: Some("key".into()),
            deployment: Some("gpt-4o".into()),
            ..AzureSettings::default()
        };
        let deployment = settings.require()?;
        assert_eq!(deployment.endpoint, "https://example.openai.azure.com");
        assert_eq!(deployment.deployment, "gpt-4o");
        Ok(())
    }

    #[test]
    fn test_load_partial_toml() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "log_level = \"debug\"\n\n[analysis]\nmax_content_chars = 1200\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.analysis.max_content_chars, 1200);
        assert_eq!(config.analysis.max_tokens, 4000);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/repo-arch-analyzer.toml"));
        assert!(matches!(result, Err(AnalyzerError::Config(_))));
    }
}
