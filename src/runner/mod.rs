pub mod case;
pub mod session;
pub mod suites;

use anyhow::Result;
use colored::Colorize;
use std::time::Duration;

use crate::client::ApiClient;
use crate::config::Config;
use crate::report::types::{TestCaseResult, TestResults};
use crate::report::Reporter;

pub use case::{CaseSpec, Verdict};
pub use session::{SessionState, StateKey};

/// Run one case against the client. Every path through here produces exactly
/// one result; nothing escapes as an error, so a broken case can never take
/// the rest of the run down with it.
pub async fn run_case(
    client: &ApiClient,
    case: &CaseSpec,
    state: &mut SessionState,
) -> TestCaseResult {
    for key in case.requires {
        if !state.has(*key) {
            return TestCaseResult::new(
                case.name,
                false,
                format!("Missing precondition: {}", key.as_str()),
                None,
            );
        }
    }

    let endpoint = (case.endpoint)(state);
    let body = case.body.map(|build| build(state));
    let bearer = if case.auth { state.token.as_deref() } else { None };

    let reply = match client
        .request(case.method.clone(), &endpoint, body.as_ref(), bearer)
        .await
    {
        Ok(reply) => reply,
        Err(err) => {
            return TestCaseResult::new(case.name, false, format!("No response: {err}"), None)
        }
    };

    let verdict = (case.check)(&reply, state);
    if verdict.passed {
        if let (Some(extract), Some(json)) = (case.extract, reply.json()) {
            extract(&json, state);
        }
        if let Some(ms) = case.settle_ms {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    TestCaseResult::new(case.name, verdict.passed, verdict.message, verdict.details)
}

/// Drive a suite in order, threading session state between cases, and return
/// the accumulated results with their summary.
pub async fn run_suite(config: &Config, cases: &[CaseSpec]) -> Result<TestResults> {
    let client = ApiClient::new(config)?;
    let mut state = SessionState::new(config);
    let mut reporter = Reporter::new();

    println!("\n{} Starting API smoke tests", "🚀".yellow());
    println!("  Base URL:  {}", config.base_url.cyan());
    println!("  Test user: {}", state.user_email.cyan());
    println!("{}", "=".repeat(70));

    for case in cases {
        let result = run_case(&client, case, &mut state).await;
        reporter.record(result);
    }

    println!("\n{}", "=".repeat(70));
    println!("{}", reporter.render());

    Ok(reporter.into_results(&config.base_url))
}
