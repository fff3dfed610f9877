// src/checker/diagnostics.rs
// =============================================================================
// Diagnostic events emitted while resolving links.
//
// The resolver never writes to a global logger directly. Instead it reports
// what it is doing to a `DiagnosticSink` that the caller hands in:
// - The binary uses `TracingSink`, which forwards events to `tracing`
// - Tests use a sink that just records events in memory
//
// Rust concepts:
// - Traits: A shared interface that several types can implement
// - Lifetimes: `Diagnostic<'a>` borrows its text instead of copying it
// =============================================================================

use std::path::Path;

// How loud an event is
//
// Debug = routine progress ("checking", "found")
// Info  = something the user should see ("not found", "failed")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
}

// A single diagnostic event about one link
#[derive(Debug, Clone)]
pub struct Diagnostic<'a> {
    pub level: Level,
    /// The raw link target
    pub link: &'a str,
    /// The markdown file the link was found in
    pub file: &'a Path,
    pub message: String,
}

impl<'a> Diagnostic<'a> {
    pub fn debug(link: &'a str, file: &'a Path, message: impl Into<String>) -> Self {
        Self {
            level: Level::Debug,
            link,
            file,
            message: message.into(),
        }
    }

    pub fn info(link: &'a str, file: &'a Path, message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            link,
            file,
            message: message.into(),
        }
    }
}

// Anything that can receive diagnostic events
//
// `&self` (not `&mut self`) so one sink can be shared by every file we scan.
pub trait DiagnosticSink {
    fn emit(&self, event: Diagnostic<'_>);
}

// The sink used by the binary: every event becomes a tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: Diagnostic<'_>) {
        let file = event.file.display();
        match event.level {
            Level::Debug => {
                tracing::debug!(link = event.link, file = %file, "{}", event.message)
            }
            Level::Info => {
                tracing::info!(link = event.link, file = %file, "{}", event.message)
            }
        }
    }
}

// Blanket impl so callers can pass `&sink` wherever a sink is expected
impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn emit(&self, event: Diagnostic<'_>) {
        (**self).emit(event)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    // Throws everything away
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NullSink;

    impl DiagnosticSink for NullSink {
        fn emit(&self, _event: Diagnostic<'_>) {}
    }

    // Records (level, message) pairs so tests can assert on them
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub events: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingSink {
        pub fn messages(&self, level: Level) -> Vec<String> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn emit(&self, event: Diagnostic<'_>) {
            self.events
                .lock()
                .unwrap()
                .push((event.level, event.message));
        }
    }
}
