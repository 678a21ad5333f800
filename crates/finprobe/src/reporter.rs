//! Suite run reporting.
//!
//! Collects one entry per test and writes the aggregate to
//! `test-results.json` so external tooling can consume the run outcome.

use crate::result::SuiteResult;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Outcome of one test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// One reported test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResultEntry {
    pub title: String,
    pub status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    pub duration_ms: u64,
}

impl TestResultEntry {
    pub fn passed(title: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            status: TestStatus::Passed,
            error: None,
            screenshots: Vec::new(),
            video: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(title: impl Into<String>, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            title: title.into(),
            status: TestStatus::Failed,
            error: Some(error.into()),
            screenshots: Vec::new(),
            video: None,
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn with_screenshot(mut self, path: impl Into<String>) -> Self {
        self.screenshots.push(path.into());
        self
    }
}

/// Accumulates entries over a run and serializes them at the end
#[derive(Debug, Default)]
pub struct RunReporter {
    entries: Vec<TestResultEntry>,
}

impl RunReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: TestResultEntry) {
        info!("RESULT: {} -> {:?}", entry.title, entry.status);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[TestResultEntry] {
        &self.entries
    }

    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == TestStatus::Failed)
            .count()
    }

    /// Write all entries as pretty JSON
    pub fn write_json(&self, path: &Path) -> SuiteResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, json)?;
        info!("REPORT: {} entries -> {}", self.entries.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_by_status() {
        let mut reporter = RunReporter::new();
        reporter.record(TestResultEntry::passed("login works", Duration::from_millis(120)));
        reporter.record(TestResultEntry::failed(
            "totals add up",
            "expected 10000.00 UAH",
            Duration::from_millis(340),
        ));
        assert_eq!(reporter.passed_count(), 1);
        assert_eq!(reporter.failed_count(), 1);
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/test-results.json");
        let mut reporter = RunReporter::new();
        reporter.record(
            TestResultEntry::passed("tags survive edit", Duration::from_millis(90))
                .with_screenshot("shots/tags.png"),
        );
        reporter.write_json(&path).unwrap();

        let parsed: Vec<TestResultEntry> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].screenshots, vec!["shots/tags.png"]);
    }
}
