//! GitHub access: REST contents API, raw-content host and the repository collector

use crate::config::GitHubSettings;
use crate::error::{AnalyzerError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::{header, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

pub mod collector;
pub mod repo_ref;
pub mod snapshot;

pub use collector::{is_relevant_file, RepositoryCollector};
pub use repo_ref::RepoRef;
pub use snapshot::{RepoSnapshot, SourceFile};

/// Thin client over the GitHub REST API and the raw-content host
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    api_base: String,
    raw_base: String,
}

/// Kind of an entry returned by the contents API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symlinks, submodules and anything newer
    #[serde(other)]
    Other,
}

/// One entry of a directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    /// File or directory name
    pub name: String,
    /// Path from the repository root
    pub path: String,
    /// Entry kind
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A single file fetched from the contents or readme API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileContent {
    /// File name
    pub name: String,
    /// Path from the repository root
    pub path: String,
    /// Encoded content; absent for files too large to inline
    #[serde(default)]
    pub content: Option<String>,
    /// Transport encoding of `content`
    #[serde(default)]
    pub encoding: Option<String>,
}

impl FileContent {
    /// Decodes the transport encoding into UTF-8 text
    pub fn decoded_text(&self) -> Result<String> {
        let content = self.content.as_deref().unwrap_or_default();
        match self.encoding.as_deref() {
            Some("base64") => decode_base64_text(content),
            Some("utf-8") | Some("utf8") => Ok(content.to_string()),
            other => Err(AnalyzerError::Decode(format!(
                "{}: unsupported encoding {:?}",
                self.path, other
            ))),
        }
    }
}

/// Decodes base64 (GitHub wraps it at 60 columns) into UTF-8 text
pub fn decode_base64_text(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| AnalyzerError::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AnalyzerError::Decode(e.to_string()))
}

impl GitHubClient {
    /// Creates a client for the configured hosts
    pub fn new(settings: &GitHubSettings) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        let user_agent = header::HeaderValue::from_str(&settings.user_agent)
            .map_err(|e| AnalyzerError::Config(format!("Invalid user agent: {}", e)))?;
        headers.insert(header::USER_AGENT, user_agent);

        let client = Client::builder()
            .timeout(settings.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        Ok(Self {
            client,
            token: settings.token.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            raw_base: settings.raw_base.trim_end_matches('/').to_string(),
        })
    }

    /// Returns true when a token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Lists a directory through the contents API; `""` is the repository root
    pub async fn list_directory(&self, repo: &RepoRef, path: &str) -> Result<Vec<ContentEntry>> {
        self.api_get(self.api_url(repo, "contents", path)?).await
    }

    /// Fetches a single file through the contents API
    pub async fn get_file(&self, repo: &RepoRef, path: &str) -> Result<FileContent> {
        self.api_get(self.api_url(repo, "contents", path)?).await
    }

    /// Fetches and decodes the repository README through the readme API
    pub async fn get_readme(&self, repo: &RepoRef) -> Result<String> {
        let readme: FileContent = self.api_get(self.api_url(repo, "readme", "")?).await?;
        readme.decoded_text()
    }

    /// `{api_base}/repos/{owner}/{name}/{endpoint}/{path}` with every segment percent-encoded
    pub fn api_url(&self, repo: &RepoRef, endpoint: &str, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| AnalyzerError::Config(format!("Invalid GitHub API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AnalyzerError::Config(format!("GitHub API base URL cannot hold a path: {}", self.api_base)))?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.name(), endpoint])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// URL of a file on the raw-content host
    pub fn raw_url(&self, repo: &RepoRef, branch: &str, path: &str) -> String {
        format!("{}/{}/{}/{}/{}", self.raw_base, repo.owner(), repo.name(), branch, path)
    }

    /// Fetches a file from the raw-content host; non-success statuses are errors
    pub async fn fetch_raw(&self, repo: &RepoRef, branch: &str, path: &str) -> Result<String> {
        let url = self.raw_url(repo, branch, path);
        let response = self.client.get(&url)
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalyzerError::GitHubApi(format!(
                "GET {} failed: HTTP {}",
                url,
                response.status()
            )));
        }

        response.text().await.map_err(AnalyzerError::Http)
    }

    /// Sends a HEAD request and reports whether the URL answered with success
    pub async fn probe(&self, url: &str) -> Result<bool> {
        let response = self.client.head(url)
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;
        Ok(response.status().is_success())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(header::ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn api_get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| AnalyzerError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AnalyzerError::GitHubApi(format!(
                "GitHub API request failed: HTTP {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_wrapped_base64() -> Result<()> {
        // "hello world\n" split across lines the way the contents API returns it
        let text = decode_base64_text("aGVsbG8g\nd29ybGQK\n")?;
        assert_eq!(text, "hello world\n");
        Ok(())
    }

    #[test]
    fn test_decode_rejects_binary() {
        // 0xFF 0xFE is not valid UTF-8
        let result = decode_base64_text("//4=");
        assert!(matches!(result, Err(AnalyzerError::Decode(_))));
    }

    #[test]
    fn test_large_file_without_inline_content() {
        let file = FileContent {
            name: "big.json".into(),
            path: "data/big.json".into(),
            content: Some(String::new()),
            encoding: Some("none".into()),
        };
        assert!(file.decoded_text().is_err());
    }

    #[test]
    fn test_entry_kind_parsing() -> Result<()> {
        let entries: Vec<ContentEntry> = serde_json::from_str(
            r#"[
                {"name": "src", "path": "src", "type": "dir"},
                {"name": "main.py", "path": "main.py", "type": "file"},
                {"name": "vendor", "path": "vendor", "type": "submodule"}
            ]"#,
        )?;
        let kinds: Vec<EntryKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntryKind::Dir, EntryKind::File, EntryKind::Other]);
        Ok(())
    }

    #[test]
    fn test_api_url_encodes_path_segments() -> Result<()> {
        let settings = GitHubSettings {
            api_base: "https://ghe.example.com/api/v3/".into(),
            ..GitHubSettings::default()
        };
        let client = GitHubClient::new(&settings)?;
        let repo = RepoRef::parse("https://github.com/octo/widgets")?;

        assert_eq!(
            client.api_url(&repo, "contents", "notes #1/50% done?.md")?.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/widgets/contents/notes%20%231/50%25%20done%3F.md"
        );
        assert_eq!(
            client.api_url(&repo, "contents", "")?.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/widgets/contents"
        );
        assert_eq!(
            client.api_url(&repo, "readme", "")?.as_str(),
            "https://ghe.example.com/api/v3/repos/octo/widgets/readme"
        );
        Ok(())
    }

    #[test]
    fn test_raw_url_layout() -> Result<()> {
        let settings = GitHubSettings {
            raw_base: "https://raw.example.com/".into(),
            ..GitHubSettings::default()
        };
        let client = GitHubClient::new(&settings)?;
        let repo = RepoRef::parse("https://github.com/octo/widgets")?;
        assert_eq!(
            client.raw_url(&repo, "main", "docs/architecture.png"),
            "https://raw.example.com/octo/widgets/main/docs/architecture.png"
        );
        Ok(())
    }
}
