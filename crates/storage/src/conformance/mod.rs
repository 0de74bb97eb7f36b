//! Conformance test suite for `DecisionStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `DecisionStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **Fetch**: declarations, decision markers, linked notifications
//! - **Write / OCC**: conditional writes on the stored decision's marker
//! - **Error handling**: correct error variants for unknown declarations
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory that builds
//! a fresh storage instance holding the given seed for each test:
//!
//! ```ignore
//! use clearance_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn postgres_conformance() {
//!     let report = run_conformance_suite(|seed| async move {
//!         create_test_postgres_storage(seed).await
//!     }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod fetch;
mod write;

use std::fmt;
use std::future::Future;

use clearance_model::{CertificateType, Decision, Declaration, Notification, NotificationStatus};

use crate::record::StoreSeed;
use crate::DecisionStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category ("fetch" or "write").
    pub category: String,
    /// Test name (e.g. "first_write_expects_no_version").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn pass(category: &str, name: &str) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: true,
            message: None,
        }
    }

    fn fail(category: &str, name: &str, msg: String) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed: false,
            message: Some(msg),
        }
    }

    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self::pass(category, name),
            Err(msg) => Self::fail(category, name, msg),
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh storage
/// instance holding exactly the seed it is given, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: DecisionStore,
    F: Fn(StoreSeed) -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(fetch::run_fetch_tests(&factory).await);
    results.extend(write::run_write_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: fixtures with sensible defaults ─────────────────────────────────

const MRN: &str = "25GB0000000000001";

fn make_declaration(mrn: &str, prior_version: Option<&str>) -> Declaration {
    Declaration {
        mrn: mrn.to_string(),
        version: Some(1),
        finalisation: None,
        commodities: vec![],
        decision: prior_version.map(|v| make_decision(Some(v))),
    }
}

fn make_decision(source_version: Option<&str>) -> Decision {
    Decision {
        source_version: source_version.map(str::to_string),
        ..Decision::default()
    }
}

fn make_notification(reference: &str) -> Notification {
    Notification {
        reference_number: reference.to_string(),
        certificate_type: CertificateType::ChedA,
        version: Some(1),
        status: NotificationStatus::Validated,
        part_two: None,
        commodities: vec![],
        updated: None,
    }
}

fn seed(declarations: Vec<Declaration>, notifications: Vec<Notification>) -> StoreSeed {
    StoreSeed {
        declarations,
        notifications,
    }
}
