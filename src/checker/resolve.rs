// src/checker/resolve.rs
// =============================================================================
// This module decides whether a classified link actually points somewhere.
//
// Each shape has its own resolution strategy:
// - Anchors and raw absolute files are always fine (no I/O)
// - External links are probed over HTTP (unless --skip-external)
// - Doc and image links must point at an existing file, resolved against
//   the docs root, the static root, the linking file's folder or the scan root
// - Invalid links are always reported
//
// A broken link produces a `FailureReport`; a working link produces nothing.
// Nothing in here returns an error: a broken link is data, not a crash.
//
// Rust concepts:
// - Generics: Resolver<P, S> works with any probe and any diagnostic sink
// - Option<T>: None means "this link is fine"
// - Path and PathBuf: borrowed and owned filesystem paths
// =============================================================================

use super::classify::{Classifier, LinkShape};
use super::diagnostics::{Diagnostic, DiagnosticSink};
use super::extract::LinkOccurrence;
use super::probe::{Probe, ProbeOutcome};
use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

// Everything the resolver needs to know about the scan, fixed for its lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    /// Root for absolute doc links (/docs/guide -> {docs_root}/guide.md)
    pub docs_root: PathBuf,
    /// Root for absolute image links (/img/a.png -> {static_root}/img/a.png)
    pub static_root: PathBuf,
    /// URL segment of the docs site, without slashes (e.g. "docs")
    pub site_prefix: String,
    /// URL segment of the static assets, without slashes; stored, not used
    pub static_prefix: String,
    /// Base for docroot links (the scanned directory)
    pub docroot_base: PathBuf,
    /// Never probe external links
    pub skip_external: bool,
}

// One broken link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    /// The link as written in the markdown
    pub link: String,
    /// The markdown file containing it
    pub file: PathBuf,
    /// Why it is broken
    pub reason: String,
}

impl FailureReport {
    fn new(occurrence: &LinkOccurrence<'_>, reason: impl Into<String>) -> Self {
        Self {
            link: occurrence.link.to_string(),
            file: occurrence.file.to_path_buf(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FailureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: File: {}, Link: {}",
            self.reason,
            self.file.display(),
            self.link
        )
    }
}

// Classifies and resolves link occurrences
pub struct Resolver<P, S> {
    context: ResolutionContext,
    classifier: Classifier,
    probe: P,
    sink: S,
}

impl<P: Probe, S: DiagnosticSink> Resolver<P, S> {
    pub fn new(context: ResolutionContext, probe: P, sink: S) -> Self {
        let classifier = Classifier::new(&context.site_prefix);
        Self {
            context,
            classifier,
            probe,
            sink,
        }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.context
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    // Checks one occurrence
    //
    // Returns: None if the link works, Some(report) if it is broken
    pub async fn resolve(&self, occurrence: &LinkOccurrence<'_>) -> Option<FailureReport> {
        let shape = self.classifier.classify(occurrence.link, occurrence.is_image);

        match shape {
            LinkShape::Anchor | LinkShape::RawAbsoluteFile => None,
            LinkShape::External { url } => self.check_external(occurrence, &url).await,
            LinkShape::AbsoluteDoc { path, version } => {
                self.check_absolute_doc(occurrence, &path, version.as_deref())
            }
            LinkShape::AbsoluteImage { path } => {
                let image = self.context.static_root.join(&path);
                self.check_file(occurrence, "absolute image", &image, Target::Image)
            }
            LinkShape::RelativeDoc { path } => {
                let doc = relative_to(occurrence.file, &path);
                self.check_file(occurrence, "relative link", &doc, Target::Doc)
            }
            LinkShape::RelativeImage { path } => {
                let image = relative_to(occurrence.file, &path);
                self.check_file(occurrence, "relative image", &image, Target::Image)
            }
            LinkShape::Docroot { path } => {
                let doc = join_lexically(&self.context.docroot_base, &path);
                self.check_file(occurrence, "docroot link", &doc, Target::Doc)
            }
            LinkShape::Invalid { image } => {
                let reason = if image {
                    "Invalid image link format"
                } else {
                    "Invalid link format"
                };
                self.sink
                    .emit(Diagnostic::info(occurrence.link, occurrence.file, reason));
                Some(FailureReport::new(occurrence, reason))
            }
        }
    }

    async fn check_external(
        &self,
        occurrence: &LinkOccurrence<'_>,
        url: &str,
    ) -> Option<FailureReport> {
        if self.context.skip_external {
            return None;
        }

        let (link, file) = (occurrence.link, occurrence.file);
        self.sink
            .emit(Diagnostic::debug(link, file, "Checking external link"));

        match self.probe.probe(url).await {
            ProbeOutcome::Status(code) if (400..500).contains(&code) => {
                self.sink.emit(Diagnostic::info(
                    link,
                    file,
                    format!("External link failed with code {}", code),
                ));
                Some(FailureReport::new(
                    occurrence,
                    format!("External link returned status code: {}", code),
                ))
            }
            ProbeOutcome::Status(code) => {
                self.sink.emit(Diagnostic::debug(
                    link,
                    file,
                    format!("External link successful, response code: {}", code),
                ));
                None
            }
            ProbeOutcome::Failed(detail) => {
                self.sink.emit(Diagnostic::info(
                    link,
                    file,
                    "External link raised a connection error",
                ));
                Some(FailureReport::new(
                    occurrence,
                    format!("External link raised a connection error: {}", detail),
                ))
            }
        }
    }

    fn check_absolute_doc(
        &self,
        occurrence: &LinkOccurrence<'_>,
        path: &str,
        version: Option<&str>,
    ) -> Option<FailureReport> {
        // Versioned docs live in a separate tree we don't model
        if let Some(version) = version {
            self.sink.emit(Diagnostic::debug(
                occurrence.link,
                occurrence.file,
                format!("Skipping absolute link pinned to version {}", version),
            ));
            return None;
        }

        // "/docs/guide/" points at the same page as "/docs/guide"
        let page = path.trim_end_matches('/');
        let doc = join_lexically(&self.context.docs_root, &format!("{}.md", page));
        self.check_file(occurrence, "absolute link", &doc, Target::Doc)
    }

    // The shared "does this file exist?" step for every filesystem shape
    fn check_file(
        &self,
        occurrence: &LinkOccurrence<'_>,
        kind: &str,
        resolved: &Path,
        target: Target,
    ) -> Option<FailureReport> {
        let (link, file) = (occurrence.link, occurrence.file);
        self.sink.emit(Diagnostic::debug(
            link,
            file,
            format!("Checking {} resolved to {}", kind, resolved.display()),
        ));

        if resolved.is_file() {
            self.sink
                .emit(Diagnostic::debug(link, file, format!("{} found", capitalize(kind))));
            return None;
        }

        self.sink
            .emit(Diagnostic::info(link, file, format!("{} was not found", capitalize(kind))));
        let reason = match target {
            Target::Doc => format!("Linked file {} not found", resolved.display()),
            Target::Image => format!("Image {} not found", resolved.display()),
        };
        Some(FailureReport::new(occurrence, reason))
    }
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Doc,
    Image,
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// Resolves `path` against the folder containing `file`
fn relative_to(file: &Path, path: &str) -> PathBuf {
    let dir = file.parent().unwrap_or_else(|| Path::new(""));
    join_lexically(dir, path)
}

// Joins without touching the filesystem, dropping "." components
//
// "docs" + "./missing.md" -> "docs/missing.md"
// ".." is kept as-is so symlinked folders behave like the OS expects.
pub(crate) fn join_lexically(base: &Path, path: &str) -> PathBuf {
    let mut joined: PathBuf = base
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    for component in Path::new(path).components() {
        match component {
            Component::CurDir => {}
            other => joined.push(other.as_os_str()),
        }
    }
    joined
}
