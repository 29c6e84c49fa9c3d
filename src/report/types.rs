use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one test case. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    pub timestamp: String,
}

impl TestCaseResult {
    pub fn new(
        name: &str,
        passed: bool,
        message: impl Into<String>,
        details: Option<Value>,
    ) -> Self {
        Self {
            name: name.to_string(),
            passed,
            message: message.into(),
            details,
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Derived counters over a result sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub success_rate: f64,
}

/// Full run output for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub base_url: String,
    pub results: Vec<TestCaseResult>,
    pub summary: RunSummary,
    pub generated_at: String,
}
