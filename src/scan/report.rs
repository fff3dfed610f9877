// src/scan/report.rs
// =============================================================================
// Turns a scan outcome into what we print and the exit code.
//
// Text output:
//   No broken links found
// or
//   ----------------------------------------------
//   ------------- Broken Link Report -------------
//   ----------------------------------------------
//   {reason}: File: {file}, Link: {link}
//   ...
//
// JSON output is the serialized ScanOutcome.
// =============================================================================

use super::ScanOutcome;
use anyhow::Result;

const BANNER: [&str; 3] = [
    "----------------------------------------------",
    "------------- Broken Link Report -------------",
    "----------------------------------------------",
];

impl ScanOutcome {
    // 0 = everything resolved, 1 = at least one broken link
    pub fn exit_code(&self) -> i32 {
        if self.broken.is_empty() {
            0
        } else {
            1
        }
    }

    pub fn render_text(&self) -> String {
        if self.broken.is_empty() {
            return "No broken links found".to_string();
        }

        let mut lines: Vec<String> = BANNER.iter().map(|l| l.to_string()).collect();
        lines.extend(self.broken.iter().map(|report| report.to_string()));
        lines.join("\n")
    }

    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
