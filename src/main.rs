// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a ScanConfig
// 3. Scan the markdown files and collect broken links
// 4. Print the report and exit with the proper code
//    (0 = no broken links, 1 = broken links or bad config, 2 = internal error)
//
// Rust concepts used:
// - async/await: External links are checked over the network
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to turn results into exit codes
// =============================================================================

// Module declarations - tells Rust about our other source files
mod checker; // src/checker/ - extract, classify and resolve links
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - validated scan settings
mod error; // src/error.rs - configuration errors
mod scan; // src/scan/ - walks the docs and drives the checker

use checker::{HttpProbe, Probe, Resolver, TracingSink};
use cli::Cli;
use config::{ScanConfig, ScanOptions};
use scan::Scanner;
use std::io::Write;

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;
use tracing::Level;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Diagnostics go to stderr so stdout only ever holds the report
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = no broken links
//   Ok(1) = broken links found, or the configuration was rejected
//   Err = unexpected error (unreadable file, HTTP client failure)
async fn run(cli: Cli) -> Result<i32> {
    let mut stdout = std::io::stdout().lock();
    check_docs(
        cli.scan_options(),
        cli.json,
        |config| HttpProbe::new(config.timeout),
        &mut stdout,
    )
    .await
}

// Validates the options, scans, and writes the report to `out`
//
// Parameters:
//   options: raw settings from the command line
//   json: print the JSON report instead of the text one
//   make_probe: builds the probe for external links once the config is known
//   out: where the report goes (stdout in the binary, a buffer in tests)
async fn check_docs<P, F, W>(
    options: ScanOptions,
    json: bool,
    make_probe: F,
    out: &mut W,
) -> Result<i32>
where
    P: Probe,
    F: FnOnce(&ScanConfig) -> Result<P>,
    W: Write,
{
    let config = match ScanConfig::from_options(options) {
        Ok(config) => config,
        Err(e) => {
            // Bad configuration is reported like a failed check
            writeln!(out, "{}", e)?;
            return Ok(1);
        }
    };

    tracing::debug!(?config, "Starting scan");

    let probe = make_probe(&config)?;
    let resolver = Resolver::new(config.context(), probe, TracingSink);
    let scanner = Scanner::new(resolver, config.concurrency);

    let outcome = scanner.scan(&config.path).await?;

    if json {
        writeln!(out, "{}", outcome.render_json()?)?;
    } else {
        writeln!(out, "{}", outcome.render_text())?;
    }

    Ok(outcome.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{FakeProbe, ProbeOutcome};
    use crate::config::{DEFAULT_CONCURRENCY, DEFAULT_SITE_PREFIX, DEFAULT_STATIC_PREFIX};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn options(path: &Path) -> ScanOptions {
        ScanOptions {
            path: path.to_path_buf(),
            site_prefix: DEFAULT_SITE_PREFIX.to_string(),
            static_prefix: DEFAULT_STATIC_PREFIX.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            ..Default::default()
        }
    }

    // Runs the whole check and returns (exit code, printed report)
    async fn check(options: ScanOptions, json: bool, probe: FakeProbe) -> (i32, String) {
        let mut out = Vec::new();
        let code = check_docs(options, json, |_| Ok(probe), &mut out)
            .await
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_clean_scan_exits_zero() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guide.md"), "# Guide\n").unwrap();
        fs::write(dir.path().join("a.md"), "[guide](./guide.md) [top](#top)\n").unwrap();

        let (code, out) = check(options(dir.path()), false, FakeProbe::default()).await;
        assert_eq!(code, 0);
        assert_eq!(out, "No broken links found\n");
    }

    #[tokio::test]
    async fn test_broken_scan_exits_one() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("a.md");
        fs::write(&page, "[missing](./missing.md)\n").unwrap();

        let (code, out) = check(options(dir.path()), false, FakeProbe::default()).await;
        assert_eq!(code, 1);

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "------------- Broken Link Report -------------");
        assert_eq!(
            lines[3],
            format!(
                "Linked file {} not found: File: {}, Link: ./missing.md",
                dir.path().join("missing.md").display(),
                page.display()
            )
        );
    }

    #[tokio::test]
    async fn test_config_error_prints_message_and_exits_one() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.md");
        fs::write(&file, "").unwrap();

        let mut opts = options(dir.path());
        opts.docs_root = Some(file.clone());
        let (code, out) = check(opts, false, FakeProbe::default()).await;
        assert_eq!(code, 1);
        assert_eq!(
            out,
            format!("Docs root path: {} is not a directory\n", file.display())
        );

        let (code, out) = check(options(&dir.path().join("nope")), false, FakeProbe::default()).await;
        assert_eq!(code, 1);
        assert!(out.ends_with("is not a directory or file\n"));
    }

    #[tokio::test]
    async fn test_single_file_resolves_absolute_links_next_to_it() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("guide.md"), "# Guide\n").unwrap();
        let page = dir.path().join("a.md");
        fs::write(&page, "[guide](/docs/guide)\n[again](/docs/guide/)\n").unwrap();

        let (code, out) = check(options(&page), false, FakeProbe::default()).await;
        assert_eq!(code, 0, "unexpected report:\n{}", out);
        assert_eq!(out, "No broken links found\n");
    }

    #[tokio::test]
    async fn test_external_404_and_skip_external() {
        let dir = TempDir::new().unwrap();
        let url = "https://example.com/gone";
        fs::write(dir.path().join("a.md"), format!("[gone]({})\n", url)).unwrap();

        let probe = FakeProbe::default().with(url, ProbeOutcome::Status(404));
        let (code, out) = check(options(dir.path()), false, probe).await;
        assert_eq!(code, 1);
        assert!(out.contains("External link returned status code: 404"));

        let mut opts = options(dir.path());
        opts.skip_external = true;
        let probe = FakeProbe::default().with(url, ProbeOutcome::Status(404));
        let (code, out) = check(opts, false, probe).await;
        assert_eq!(code, 0);
        assert_eq!(out, "No broken links found\n");
    }

    #[tokio::test]
    async fn test_json_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "[bad](not a link)\n").unwrap();

        let (code, out) = check(options(dir.path()), true, FakeProbe::default()).await;
        assert_eq!(code, 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["files_scanned"], 1);
        assert_eq!(value["broken"][0]["reason"], "Invalid link format");
    }
}
