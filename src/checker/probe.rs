// src/checker/probe.rs
// =============================================================================
// This module checks whether an external URL answers.
//
// Key functionality:
// - Makes an HTTP GET request to the link
// - Reports either the status code or why the request failed
// - Hides the HTTP client behind the `Probe` trait so tests never touch
//   the network
//
// The resolver decides what counts as broken (4xx and transport failures);
// the probe only reports what happened.
//
// Rust concepts:
// - Traits with async fn: an interface whose method is awaited
// - Result<T, E>: building the HTTP client can fail
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

// What happened when we requested a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The server answered with this status code
    Status(u16),
    /// The request never got an answer (DNS, refused connection, TLS, ...)
    Failed(String),
}

// Anything that can look up a URL
//
// The real implementation is `HttpProbe`; tests provide their own.
pub trait Probe {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

// Probes URLs with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    // Creates the probe
    //
    // Parameters:
    //   timeout: optional per-request timeout; None keeps the client default
    //            (which is to wait as long as the server takes)
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(concat!("docs-link-check/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        // Redirects are followed by the client, so we see the final status
        match self.client.get(url).send().await {
            Ok(response) => ProbeOutcome::Status(response.status().as_u16()),
            Err(e) => ProbeOutcome::Failed(describe_error(&e)),
        }
    }
}

// Turns a reqwest error into a short, human-readable reason
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - Connection refused or DNS failure
// - Too many redirects
// - A URL that could not be turned into a request
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed ({})", error)
    } else if error.is_builder() {
        format!("invalid url ({})", error)
    } else {
        error.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for something this small?
//    - The resolver only needs "give me a status for this URL"
//    - In tests we swap in a fake that answers from a table
//    - No test needs an internet connection
//
// 2. Why GET and not HEAD?
//    - Some servers answer HEAD with 405 or 404 even when the page exists
//    - GET is what a reader's browser does
//
// 3. What does concat!/env! do?
//    - They build a string at compile time
//    - env!("CARGO_PKG_VERSION") is the version from Cargo.toml
// -----------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // Answers from a fixed table and remembers every URL it was asked about
    #[derive(Debug, Default)]
    pub struct FakeProbe {
        pub answers: HashMap<String, ProbeOutcome>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeProbe {
        pub fn with(mut self, url: &str, outcome: ProbeOutcome) -> Self {
            self.answers.insert(url.to_string(), outcome);
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl Probe for FakeProbe {
        async fn probe(&self, url: &str) -> ProbeOutcome {
            self.calls.lock().unwrap().push(url.to_string());
            self.answers
                .get(url)
                .cloned()
                .unwrap_or(ProbeOutcome::Status(200))
        }
    }
}
