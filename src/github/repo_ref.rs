use crate::error::{AnalyzerError, Result};
use serde::Serialize;
use std::fmt;

const GITHUB_HOSTS: &[&str] = &["github.com", "www.github.com"];

/// Identity of a GitHub repository, derived once from its URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    url: String,
    owner: String,
    name: String,
}

impl RepoRef {
    /// Parses `https://github.com/{owner}/{repo}[/...]`
    ///
    /// The URL is split on `/`; the two segments after the host are the
    /// owner and the repository name. Anything missing is an error.
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        let parts: Vec<&str> = trimmed.split('/').collect();

        let host_idx = parts.iter()
            .position(|part| GITHUB_HOSTS.iter().any(|host| part.eq_ignore_ascii_case(host)))
            .ok_or_else(|| AnalyzerError::InvalidUrl(url.to_string()))?;

        let owner = parts.get(host_idx + 1)
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| AnalyzerError::InvalidUrl(format!("{} (missing owner)", url)))?;

        let name = parts.get(host_idx + 2)
            .map(|segment| segment.strip_suffix(".git").unwrap_or(*segment))
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| AnalyzerError::InvalidUrl(format!("{} (missing repository name)", url)))?;

        Ok(Self {
            url: trimmed.to_string(),
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// URL as supplied, without trailing slashes
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Repository owner (user or organization)
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Repository name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
