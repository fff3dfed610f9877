// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - extract: Finds [links](...) and ![images](...) in markdown text
// - classify: Decides which shape a link target has
// - resolve: Checks each shape against the filesystem or the network
// - probe: Makes HTTP requests for external links
// - diagnostics: Where the resolver reports what it is doing
//
// The pipeline for one file is: extract -> classify -> resolve.
// =============================================================================

mod classify;
mod diagnostics;
mod extract;
mod probe;
mod resolve;

// Re-export public items from submodules
// This lets users write `checker::Resolver` instead of
// `checker::resolve::Resolver`
pub use diagnostics::{DiagnosticSink, TracingSink};
pub use extract::LinkExtractor;
pub use probe::{HttpProbe, Probe};
pub use resolve::{FailureReport, ResolutionContext, Resolver};

// Fakes and helpers shared by tests in other modules
#[cfg(test)]
pub(crate) use diagnostics::testing::NullSink;
#[cfg(test)]
pub(crate) use probe::testing::FakeProbe;
#[cfg(test)]
pub(crate) use probe::ProbeOutcome;
