//! Derivation conformance test suite.
//!
//! Each test case is a fixture pair under `conformance/derive/`:
//! - `<name>.context.json`  -- declarations and notifications
//! - `<name>.expected.json` -- expected decision code and internal codes
//!   per MRN, item number and check code
//!
//! The runner derives decisions from the context and compares a projection
//! of them (codes only; reasons and timestamps vary) against the expected
//! output.

use std::path::{Path, PathBuf};

use clearance_eval::{derive_decisions, RuleSets};
use clearance_model::{context_from_json, Decision};
use serde_json::{json, Map, Value};

fn project(decisions: &[(String, Decision)]) -> Value {
    Value::Array(
        decisions
            .iter()
            .map(|(mrn, decision)| {
                let items: Map<String, Value> = decision
                    .items
                    .iter()
                    .map(|item| {
                        let checks: Map<String, Value> = item
                            .checks
                            .iter()
                            .map(|check| {
                                (
                                    check.check_code.clone(),
                                    json!({
                                        "decision_code": check.decision_code,
                                        "internal_codes": check.internal_codes,
                                    }),
                                )
                            })
                            .collect();
                        (item.item_number.to_string(), Value::Object(checks))
                    })
                    .collect();
                json!({ "mrn": mrn, "items": items })
            })
            .collect(),
    )
}

/// Run a derivation conformance fixture.
///
/// 1. Load .context.json
/// 2. Derive decisions with the standard rule sets
/// 3. Compare the projection against .expected.json
fn run_derive_fixture(fixture_dir: &Path, name: &str) {
    let context_path = fixture_dir.join(format!("{}.context.json", name));
    let expected_path = fixture_dir.join(format!("{}.expected.json", name));

    // Step 1: Load context
    let context_str = std::fs::read_to_string(&context_path)
        .unwrap_or_else(|e| panic!("Failed to read context for {}: {}", name, e));
    let context_json: Value = serde_json::from_str(&context_str)
        .unwrap_or_else(|e| panic!("Invalid context JSON for {}: {}", name, e));
    let context = context_from_json(&context_json)
        .unwrap_or_else(|e| panic!("Invalid context for {}: {}", name, e));

    // Step 2: Derive
    let decisions = derive_decisions(&context, &RuleSets::default())
        .unwrap_or_else(|e| panic!("Derivation failed for {}: {:?}", name, e));

    // Step 3: Compare with expected decisions
    let expected_str = std::fs::read_to_string(&expected_path)
        .unwrap_or_else(|e| panic!("Failed to read expected decisions for {}: {}", name, e));
    let expected: Value = serde_json::from_str(&expected_str)
        .unwrap_or_else(|e| panic!("Invalid expected JSON for {}: {}", name, e));

    let actual = project(&decisions);

    assert_eq!(
        actual,
        expected,
        "Decision mismatch for {}\n\nActual:\n{}\n\nExpected:\n{}",
        name,
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

fn derive_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("conformance")
        .join("derive")
}

// ──────────────────────────────────────────────
// Releases and refusals
// ──────────────────────────────────────────────

#[test]
fn cheda_internal_market_release() {
    run_derive_fixture(&derive_dir(), "cheda_internal_market_release");
}

#[test]
fn chedp_refused_for_reexport() {
    run_derive_fixture(&derive_dir(), "chedp_refused_for_reexport");
}

#[test]
fn chedp_iuu_compliant() {
    run_derive_fixture(&derive_dir(), "chedp_iuu_compliant");
}

// ──────────────────────────────────────────────
// Holds and unresolved checks
// ──────────────────────────────────────────────

#[test]
fn unlinked_document() {
    run_derive_fixture(&derive_dir(), "unlinked_document");
}

#[test]
fn chedd_weight_outside_tolerance() {
    run_derive_fixture(&derive_dir(), "chedd_weight_outside_tolerance");
}

#[test]
fn chedpp_partial_rejection_and_goods_movement() {
    run_derive_fixture(&derive_dir(), "chedpp_partial_rejection_and_goods_movement");
}

#[test]
fn terminal_declaration() {
    run_derive_fixture(&derive_dir(), "terminal_declaration");
}

#[test]
fn cancelled_and_replacement_notifications() {
    run_derive_fixture(&derive_dir(), "cancelled_and_replacement_notifications");
}

// ──────────────────────────────────────────────
// Contexts with several declarations
// ──────────────────────────────────────────────

#[test]
fn several_declarations_in_order() {
    run_derive_fixture(&derive_dir(), "several_declarations_in_order");
}
