// src/config.rs
// =============================================================================
// The validated settings for one scan.
//
// `Cli` (src/cli.rs) is what the user typed; `ScanConfig` is what we run with:
// - Defaults are filled in (docs root falls back to the scan path, or to
//   the file's folder when a single file is scanned)
// - Prefixes have their leading/trailing slashes stripped
// - Paths are checked before any file is opened
// =============================================================================

use crate::checker::ResolutionContext;
use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_STATIC_ROOT: &str = "docs/docusaurus/static";
pub const DEFAULT_SITE_PREFIX: &str = "docs";
pub const DEFAULT_STATIC_PREFIX: &str = "static";
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub path: PathBuf,
    pub docs_root: PathBuf,
    pub static_root: PathBuf,
    pub site_prefix: String,
    pub static_prefix: String,
    pub skip_external: bool,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
}

// Raw settings as they arrive from the command line
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub path: PathBuf,
    pub docs_root: Option<PathBuf>,
    pub static_root: Option<PathBuf>,
    pub site_prefix: String,
    pub static_prefix: String,
    pub skip_external: bool,
    pub concurrency: usize,
    pub timeout_secs: Option<u64>,
}

impl ScanConfig {
    // Validates the options and fills in defaults
    //
    // Order of checks follows what a user fixes first: the docs root, then
    // the scan path itself.
    pub fn from_options(options: ScanOptions) -> Result<Self, ConfigError> {
        let docs_root = match options.docs_root {
            None => folder_of(&options.path),
            Some(root) if root.is_dir() => root,
            Some(root) => return Err(ConfigError::DocsRootNotDirectory(root)),
        };

        if !options.path.is_dir() && !options.path.is_file() {
            return Err(ConfigError::PathNotFound(options.path));
        }

        // Only an explicitly given static root has to exist; the default is
        // merely where Docusaurus usually keeps it
        let static_root = match options.static_root {
            Some(root) if !root.is_dir() => {
                return Err(ConfigError::StaticRootNotDirectory(root))
            }
            Some(root) => root,
            None => PathBuf::from(DEFAULT_STATIC_ROOT),
        };

        if options.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        Ok(Self {
            path: options.path,
            docs_root,
            static_root,
            site_prefix: strip_slashes(&options.site_prefix),
            static_prefix: strip_slashes(&options.static_prefix),
            skip_external: options.skip_external,
            concurrency: options.concurrency,
            timeout: options.timeout_secs.map(Duration::from_secs),
        })
    }

    // The folder docroot links are resolved against
    //
    // When a single file is scanned, that is the file's folder.
    pub fn docroot_base(&self) -> PathBuf {
        folder_of(&self.path)
    }

    pub fn context(&self) -> ResolutionContext {
        ResolutionContext {
            docs_root: self.docs_root.clone(),
            static_root: self.static_root.clone(),
            site_prefix: self.site_prefix.clone(),
            static_prefix: self.static_prefix.clone(),
            docroot_base: self.docroot_base(),
            skip_external: self.skip_external,
        }
    }
}

// The scan path itself for a directory, the containing folder for a file
fn folder_of(path: &Path) -> PathBuf {
    if path.is_file() {
        path.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        path.to_path_buf()
    }
}

fn strip_slashes(prefix: &str) -> String {
    prefix.trim_matches('/').to_string()
}
