pub mod json;
pub mod junit;
pub mod types;

use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use std::path::Path;

use types::{RunSummary, TestCaseResult, TestResults};

/// Ordered result log with running counters. `record` is the only place a
/// per-case console line is emitted.
#[derive(Default)]
pub struct Reporter {
    results: Vec<TestCaseResult>,
    passed: usize,
    failed: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: TestCaseResult) {
        if result.passed {
            self.passed += 1;
            println!("{} {}: {}", "✅".green(), result.name, result.message);
        } else {
            self.failed += 1;
            println!("{} {}: {}", "❌".red(), result.name, result.message);
        }
        if let Some(details) = &result.details {
            println!("   Details: {}", details);
        }
        self.results.push(result);
    }

    /// Derived counters; an empty run reports a 0.0 rate rather than
    /// dividing by zero.
    pub fn summary(&self) -> RunSummary {
        let total = self.results.len();
        let success_rate = self.passed as f64 / total.max(1) as f64 * 100.0;
        RunSummary {
            passed: self.passed,
            failed: self.failed,
            total,
            success_rate,
        }
    }

    /// Final multi-line report: counts, rate, and the failing cases in run
    /// order.
    pub fn render(&self) -> String {
        let summary = self.summary();
        let mut out = String::new();
        out.push_str("Test Results Summary\n");
        out.push_str(&format!("  Passed: {}\n", summary.passed));
        out.push_str(&format!("  Failed: {}\n", summary.failed));
        out.push_str(&format!(
            "  Result: {}/{} passed ({:.1}%)\n",
            summary.passed, summary.total, summary.success_rate
        ));

        if summary.failed > 0 {
            out.push_str("\nFailed cases:\n");
            for result in self.results.iter().filter(|r| !r.passed) {
                out.push_str(&format!("  - {}: {}\n", result.name, result.message));
            }
        }

        out
    }

    pub fn results(&self) -> &[TestCaseResult] {
        &self.results
    }

    pub fn into_results(self, base_url: &str) -> TestResults {
        let summary = self.summary();
        TestResults {
            base_url: base_url.to_string(),
            results: self.results,
            summary,
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Generate report from a saved results file
pub async fn generate_report(
    results_path: &Path,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(results_path)?;
    let results: TestResults = serde_json::from_str(&raw)?;

    match format {
        "json" => json::generate(&results, output).await,
        "junit" => junit::generate(&results, output).await,
        _ => anyhow::bail!("Unknown format: {}", format),
    }
}
