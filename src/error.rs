// src/error.rs
// =============================================================================
// Configuration errors.
//
// These are problems with what the user asked for (a docs root that is not a
// folder, a path that doesn't exist). They stop the scan before it starts and
// exit with code 1, like a broken link would.
//
// Unexpected failures during the scan (an unreadable file) are not here;
// they travel as anyhow::Error and exit with code 2.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Docs root path: {} is not a directory", .0.display())]
    DocsRootNotDirectory(PathBuf),

    #[error("Docs path: {} is not a directory or file", .0.display())]
    PathNotFound(PathBuf),

    #[error("Static root path: {} is not a directory", .0.display())]
    StaticRootNotDirectory(PathBuf),

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}
