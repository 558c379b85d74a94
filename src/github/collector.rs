//! Repository collection: files, README and architecture diagram candidates
//!
//! Every remote failure in here degrades to "absent". The only error that
//! leaves [`RepositoryCollector::collect`] is an unparseable repository URL.

use super::{EntryKind, GitHubClient, RepoRef, RepoSnapshot, SourceFile};
use crate::config::GitHubSettings;
use crate::error::Result;
use crate::utils::fallback::{attempt, first_success, Attempt};
use log::{debug, info, warn};
use std::collections::VecDeque;
use std::path::Path;

/// Extensions worth sending to the model
pub const RELEVANT_EXTENSIONS: &[&str] = &[
    ".md", ".py", ".js", ".ts", ".json", ".yaml", ".yml",
    ".bicep", ".arm", ".tf", ".html", ".ipynb", ".sh",
];

/// Name fragments that make a file relevant regardless of extension
pub const RELEVANT_NAME_KEYWORDS: &[&str] = &[
    "readme", "dockerfile", "license", "requirements.txt",
    "package.json", "config", "setup", "deploy",
];

/// Files probed on the raw-content host when the contents API is unavailable
pub const FALLBACK_FILES: &[&str] = &[
    "README.md", "DEPLOYMENT.md", "ARCHITECTURE.md", "deployment/README.md",
];

const FALLBACK_BRANCH: &str = "main";

/// Raw-content README locations, tried in order after the readme API
const README_CANDIDATES: &[(&str, &str)] = &[
    ("main", "README.md"),
    ("main", "README.MD"),
    ("master", "README.md"),
];

const DIAGRAM_FOLDERS: &[&str] = &["", "images/", "docs/", "assets/", "media/"];
const DIAGRAM_STEMS: &[&str] = &["architecture", "diagram", "overview", "design"];
const DIAGRAM_EXTENSIONS: &[&str] = &["png", "jpg", "svg"];
const DIAGRAM_BRANCHES: &[&str] = &["main", "master"];

/// Checks if a file is relevant for analysis
///
/// Relevant means the extension is in [`RELEVANT_EXTENSIONS`] or the
/// lower-cased name contains one of [`RELEVANT_NAME_KEYWORDS`].
pub fn is_relevant_file(filename: &str) -> bool {
    let name_lower = filename.to_lowercase();
    let extension = Path::new(&name_lower)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext));

    let extension_match = extension
        .as_deref()
        .map_or(false, |ext| RELEVANT_EXTENSIONS.contains(&ext));

    extension_match || RELEVANT_NAME_KEYWORDS.iter().any(|keyword| name_lower.contains(keyword))
}

/// Gathers the raw material for one repository analysis
#[derive(Clone)]
pub struct RepositoryCollector {
    client: GitHubClient,
}

impl RepositoryCollector {
    /// Creates a collector for the configured GitHub hosts
    pub fn new(settings: &GitHubSettings) -> Result<Self> {
        Ok(Self::with_client(GitHubClient::new(settings)?))
    }

    /// Creates a collector around an existing client
    pub fn with_client(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Collects files, README and diagram URLs for `repo_url`
    ///
    /// Fails only with `InvalidUrl`, before any request is made.
    pub async fn collect(&self, repo_url: &str) -> Result<RepoSnapshot> {
        let repo = RepoRef::parse(repo_url)?;
        info!("Collecting repository {}", repo);

        let files = self.collect_files(&repo).await;
        let readme = self.fetch_readme(&repo).await;
        let diagram_urls = self.find_architecture_diagrams(&repo).await;

        info!(
            "Collected {} files, README {} bytes, {} diagram candidates for {}",
            files.len(),
            readme.len(),
            diagram_urls.len(),
            repo
        );

        Ok(RepoSnapshot::new(repo, files, readme, diagram_urls))
    }

    /// Collects relevant files via the contents API, or by scraping well-known paths
    ///
    /// A failed traversal discards everything it gathered and the scrape
    /// result is used for the whole request.
    pub async fn collect_files(&self, repo: &RepoRef) -> Vec<SourceFile> {
        let mut attempts: Vec<Attempt<'_, Vec<SourceFile>>> = Vec::new();

        if self.client.has_token() {
            attempts.push(attempt(async move {
                self.traverse_repository(repo).await.map_err(|e| {
                    warn!("Error accessing GitHub API for {}: {}; falling back to raw content", repo, e);
                    e
                })
            }));
        }
        attempts.push(attempt(async move { Ok(self.scrape_common_files(repo).await) }));

        first_success("file collection", attempts).await.unwrap_or_default()
    }

    /// Breadth-first walk of the contents API from the repository root
    async fn traverse_repository(&self, repo: &RepoRef) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        let mut queue: VecDeque<_> = self.client.list_directory(repo, "").await?.into();

        while let Some(entry) = queue.pop_front() {
            match entry.kind {
                EntryKind::Dir => {
                    queue.extend(self.client.list_directory(repo, &entry.path).await?);
                }
                EntryKind::File if is_relevant_file(&entry.name) => {
                    let decoded = self.client
                        .get_file(repo, &entry.path)
                        .await
                        .and_then(|file| file.decoded_text());

                    match decoded {
                        Ok(content) => files.push(SourceFile::new(entry.name, entry.path, content)),
                        Err(e) => debug!("Skipping {}: {}", entry.path, e),
                    }
                }
                _ => {}
            }
        }

        Ok(files)
    }

    /// Probes [`FALLBACK_FILES`] on the raw-content host; misses are dropped
    pub async fn scrape_common_files(&self, repo: &RepoRef) -> Vec<SourceFile> {
        let mut files = Vec::new();

        for path in FALLBACK_FILES {
            match self.client.fetch_raw(repo, FALLBACK_BRANCH, path).await {
                Ok(content) => {
                    let name = path.rsplit('/').next().unwrap_or(*path);
                    files.push(SourceFile::new(name, *path, content));
                }
                Err(e) => debug!("Skipping {}: {}", path, e),
            }
        }

        files
    }

    /// Returns the README text, or an empty string when no location answers
    pub async fn fetch_readme(&self, repo: &RepoRef) -> String {
        let mut attempts: Vec<Attempt<'_, String>> = Vec::new();

        if self.client.has_token() {
            attempts.push(attempt(self.client.get_readme(repo)));
        }
        for (branch, file) in README_CANDIDATES {
            attempts.push(attempt(self.client.fetch_raw(repo, branch, file)));
        }

        first_success("readme", attempts).await.unwrap_or_default()
    }

    /// HEAD-probes common diagram locations on `main` and `master`
    pub async fn find_architecture_diagrams(&self, repo: &RepoRef) -> Vec<String> {
        let mut diagrams = Vec::new();

        for folder in DIAGRAM_FOLDERS {
            for stem in DIAGRAM_STEMS {
                for extension in DIAGRAM_EXTENSIONS {
                    let file = format!("{}{}.{}", folder, stem, extension);
                    for branch in DIAGRAM_BRANCHES {
                        let url = self.client.raw_url(repo, branch, &file);
                        match self.client.probe(&url).await {
                            Ok(true) => diagrams.push(url),
                            Ok(false) => {}
                            Err(e) => debug!("Probe of {} failed: {}", url, e),
                        }
                    }
                }
            }
        }

        diagrams
    }
}
