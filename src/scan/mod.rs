// src/scan/mod.rs
// =============================================================================
// The scan driver: ties file discovery and link checking together.
//
// How it works:
// 1. Find every markdown file under the scan path (or take the single file)
// 2. Read each file and extract its links
// 3. Resolve every link, collecting a FailureReport for each broken one
// 4. Return everything as one ScanOutcome
//
// Several files are scanned at once (--concurrency), but results come back
// in file order, and links within a file are checked in document order.
//
// A file we can't read aborts the whole scan: that means the scan target
// itself is broken, not one of its links.
// =============================================================================

mod files;
mod report;

pub use files::markdown_files;

use crate::checker::{DiagnosticSink, FailureReport, LinkExtractor, Probe, Resolver};
use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Serialize;
use std::path::Path;

// The result of a whole scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    pub files_scanned: usize,
    pub links_checked: usize,
    /// Broken links, in file order then document order
    pub broken: Vec<FailureReport>,
}

// The result of checking one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOutcome {
    pub links_checked: usize,
    pub broken: Vec<FailureReport>,
}

pub struct Scanner<P, S> {
    extractor: LinkExtractor,
    resolver: Resolver<P, S>,
    concurrency: usize,
}

impl<P: Probe, S: DiagnosticSink> Scanner<P, S> {
    pub fn new(resolver: Resolver<P, S>, concurrency: usize) -> Self {
        Self {
            extractor: LinkExtractor::new(),
            resolver,
            concurrency: concurrency.max(1),
        }
    }

    // Scans a file or a directory tree
    pub async fn scan(&self, root: &Path) -> Result<ScanOutcome> {
        let files = markdown_files(root)?;
        let context = self.resolver.context();
        tracing::info!(
            files = files.len(),
            root = %root.display(),
            site_prefix = self.resolver.classifier().site_prefix(),
            skip_external = context.skip_external,
            "Found markdown files to check"
        );

        // buffered() (not buffer_unordered) keeps results in file order
        let per_file: Vec<FileOutcome> = stream::iter(files.iter())
            .map(|file| self.scan_file(file))
            .buffered(self.concurrency)
            .try_collect()
            .await?;

        let mut outcome = ScanOutcome {
            files_scanned: files.len(),
            ..Default::default()
        };
        for file in per_file {
            outcome.links_checked += file.links_checked;
            outcome.broken.extend(file.broken);
        }

        tracing::info!(
            links = outcome.links_checked,
            broken = outcome.broken.len(),
            "Scan finished"
        );
        Ok(outcome)
    }

    // Reads one markdown file and checks its links
    pub async fn scan_file(&self, file: &Path) -> Result<FileOutcome> {
        let text = tokio::fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read markdown file {}", file.display()))?;

        Ok(self.check_text(&text, file).await)
    }

    // Checks the links of an already-loaded document
    //
    // `file` is only used to resolve relative links and to label reports.
    pub async fn check_text(&self, text: &str, file: &Path) -> FileOutcome {
        let mut outcome = FileOutcome::default();

        for occurrence in self.extractor.occurrences(text, file) {
            outcome.links_checked += 1;
            if let Some(report) = self.resolver.resolve(&occurrence).await {
                outcome.broken.push(report);
            }
        }

        tracing::debug!(
            file = %file.display(),
            links = outcome.links_checked,
            broken = outcome.broken.len(),
            "Checked file"
        );
        outcome
    }
}
