use super::RepoRef;
use serde::{Deserialize, Serialize};

/// A text file collected from the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// File name
    pub name: String,
    /// Path from the repository root
    pub path: String,
    /// Decoded text content
    pub content: String,
}

impl SourceFile {
    /// Creates a file record
    pub fn new(name: impl Into<String>, path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Everything collected for one analysis run
///
/// Built once by the collector and only read afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct RepoSnapshot {
    repo: RepoRef,
    files: Vec<SourceFile>,
    readme: String,
    diagram_urls: Vec<String>,
}

impl RepoSnapshot {
    /// Bundles collected data
    pub fn new(repo: RepoRef, files: Vec<SourceFile>, readme: String, diagram_urls: Vec<String>) -> Self {
        Self {
            repo,
            files,
            readme,
            diagram_urls,
        }
    }

    /// Repository identity
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// Files in discovery order
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// README text, empty when none was found
    pub fn readme(&self) -> &str {
        &self.readme
    }

    /// Candidate architecture diagram URLs in probe order
    pub fn diagram_urls(&self) -> &[String] {
        &self.diagram_urls
    }
}
