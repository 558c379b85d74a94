//! Flattens a snapshot into the text blob embedded in the prompt

use crate::github::{RepoSnapshot, SourceFile};
use log::debug;

/// Suffix on the header of a file left out for size
pub const SUMMARY_ONLY_SUFFIX: &str = " (summary only due to size)";

/// One file as it appears in the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBlock {
    /// Header and full content
    Full(String),
    /// Header only
    Placeholder(String),
}

impl FileBlock {
    /// Rendered text
    pub fn text(&self) -> &str {
        match self {
            FileBlock::Full(text) | FileBlock::Placeholder(text) => text,
        }
    }

    /// Returns true when the content is included
    pub fn is_full(&self) -> bool {
        matches!(self, FileBlock::Full(_))
    }
}

/// Renders files in order until `budget` characters are used
///
/// The first file that does not fit and every file after it become
/// placeholders, even if a later file would still fit.
pub fn flatten_files(files: &[SourceFile], budget: usize) -> Vec<FileBlock> {
    let mut used = 0usize;
    let mut cut_over = false;

    files
        .iter()
        .map(|file| {
            let block = format!("# File: {}\n{}", file.path, file.content);
            let size = block.chars().count();

            if !cut_over && used + size <= budget {
                used += size;
                FileBlock::Full(block)
            } else {
                cut_over = true;
                FileBlock::Placeholder(format!("# File: {}{}", file.path, SUMMARY_ONLY_SUFFIX))
            }
        })
        .collect()
}

/// Builds the README, key-files and diagrams sections, skipping empty ones
pub fn prepare_content(snapshot: &RepoSnapshot, budget: usize) -> String {
    let mut sections = Vec::new();

    if !snapshot.readme().is_empty() {
        sections.push(format!("# README Content\n{}", snapshot.readme()));
    }

    let blocks = flatten_files(snapshot.files(), budget);
    let omitted = blocks.iter().filter(|block| !block.is_full()).count();
    if omitted > 0 {
        debug!("{} of {} files left out of the prompt for size", omitted, blocks.len());
    }
    if !blocks.is_empty() {
        let files = blocks.iter().map(FileBlock::text).collect::<Vec<_>>().join("\n\n");
        sections.push(format!("# Key Files\n{}", files));
    }

    if !snapshot.diagram_urls().is_empty() {
        let diagrams = snapshot
            .diagram_urls()
            .iter()
            .map(|url| format!("- {}", url))
            .collect::<Vec<_>>()
            .join("\n");
        sections.push(format!("# Architecture Diagrams\n{}", diagrams));
    }

    sections.join("\n\n")
}
