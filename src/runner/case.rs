use reqwest::Method;
use serde_json::Value;

use crate::client::HttpReply;
use crate::runner::session::{SessionState, StateKey};

pub type EndpointFn = fn(&SessionState) -> String;
pub type BodyFn = fn(&SessionState) -> Value;
pub type CheckFn = fn(&HttpReply, &SessionState) -> Verdict;
pub type ExtractFn = fn(&Value, &mut SessionState);

/// One declarative test case. The sequencer interprets these in order; a
/// suite is just a list of them.
pub struct CaseSpec {
    pub name: &'static str,
    pub method: Method,

    /// Endpoint path relative to the API base, built from session state
    /// (identifiers may appear in the path).
    pub endpoint: EndpointFn,

    /// JSON request body, when the endpoint takes one.
    pub body: Option<BodyFn>,

    /// State fields that must be populated before the call is attempted.
    pub requires: &'static [StateKey],

    /// Attach `Authorization: Bearer <token>` when the session has one.
    pub auth: bool,

    /// Per-case expected-success predicate over the received reply. This is
    /// where any special status policy lives (a payment gateway's simulated
    /// rejection counts as a pass only for the case that says so).
    pub check: CheckFn,

    /// On pass, pull resource identifiers out of the body for later cases.
    pub extract: Option<ExtractFn>,

    /// Fixed pause after a passing call, for server-side async effects
    /// (invoice email dispatch). A single wait, never a poll loop.
    pub settle_ms: Option<u64>,
}

/// Outcome of a case's check.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub passed: bool,
    pub message: String,
    pub details: Option<Value>,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            details: None,
        }
    }

    pub fn pass_with(message: impl Into<String>, details: Value) -> Self {
        Self {
            passed: true,
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: None,
        }
    }

    pub fn fail_with(message: impl Into<String>, details: Value) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: Some(details),
        }
    }
}
