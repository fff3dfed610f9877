// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command:
//
//   docs-link-check -p docs -r docs -sr static -s docs -sp static --skip-external
//
// clap only supports one-letter short flags, so the two-letter shorts
// -sr and -sp are rewritten to --static-root and --static-prefix before
// clap ever sees them (see `normalize_args`).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Iterators over OsString: arguments are not guaranteed to be UTF-8
// =============================================================================

use crate::config::{ScanOptions, DEFAULT_CONCURRENCY, DEFAULT_SITE_PREFIX, DEFAULT_STATIC_PREFIX};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug)]
#[command(
    name = "docs-link-check",
    version,
    about = "Checks links and images in Docusaurus markdown files",
    long_about = "docs-link-check finds every inline link and image in your markdown docs and \
                  checks that it points somewhere: local files must exist, external links must \
                  not answer with a 4xx. It's meant for CI: exit code 0 means no broken links, 1 means \
                  broken links or an invalid --path/--docs-root, 2 means an unexpected error such \
                  as an unreadable markdown file."
)]
pub struct Cli {
    /// Path to markdown file(s) to check
    #[arg(short = 'p', long, default_value = ".")]
    pub path: PathBuf,

    /// Root to all docs, used to resolve absolute links (defaults to --path, or its folder for a file)
    #[arg(short = 'r', long)]
    pub docs_root: Option<PathBuf>,

    /// Root (static folder) to all images [default: docs/docusaurus/static] (short form: -sr)
    #[arg(long, value_name = "DIR")]
    pub static_root: Option<PathBuf>,

    /// Top-most folder in the docs URL for resolving absolute paths
    #[arg(short = 's', long, default_value = DEFAULT_SITE_PREFIX)]
    pub site_prefix: String,

    /// Top-most folder in the site URL for absolute image paths (short form: -sp)
    #[arg(long, default_value = DEFAULT_STATIC_PREFIX)]
    pub static_prefix: String,

    /// Don't check external (http/https) links
    #[arg(long)]
    pub skip_external: bool,

    /// Print broken links as JSON instead of the text report
    #[arg(long)]
    pub json: bool,

    /// How many files to scan at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Timeout in seconds for each external request (no timeout by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Show every link as it is checked
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    // Parses the process arguments, accepting -sr and -sp
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            path: self.path.clone(),
            docs_root: self.docs_root.clone(),
            static_root: self.static_root.clone(),
            site_prefix: self.site_prefix.clone(),
            static_prefix: self.static_prefix.clone(),
            skip_external: self.skip_external,
            concurrency: self.concurrency,
            timeout_secs: self.timeout,
        }
    }
}

// Rewrites the two-letter short flags to their long forms
//
//   -sr static      -> --static-root static
//   -sr=static      -> --static-root=static
//   -sp static      -> --static-prefix static
//
// Everything after a bare "--" is left alone.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        if passthrough {
            out.push(arg);
            continue;
        }

        let rewritten = match arg.to_str() {
            Some("--") => {
                passthrough = true;
                None
            }
            Some(s) => rewrite_short(s),
            None => None,
        };
        out.push(rewritten.map(OsString::from).unwrap_or(arg));
    }

    out
}

fn rewrite_short(arg: &str) -> Option<String> {
    const SHORTS: [(&str, &str); 2] = [("-sr", "--static-root"), ("-sp", "--static-prefix")];

    for (short, long) in SHORTS {
        if arg == short {
            return Some(long.to_string());
        }
        if let Some(value) = arg.strip_prefix(short).and_then(|rest| rest.strip_prefix('=')) {
            return Some(format!("{}={}", long, value));
        }
    }
    None
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why OsString and not String?
//    - Command-line arguments can contain bytes that aren't valid UTF-8
//    - OsString holds them as-is; we only inspect the ones that are UTF-8
//
// 2. What is parse_from?
//    - Cli::parse() reads std::env::args() for you
//    - parse_from() takes any list of arguments, which is also what tests use
//
// 3. Why is --static-root an Option?
//    - Its default is just a convention, so we only insist that it exists
//      when the user typed it
// -----------------------------------------------------------------------------
