//! Equivalence relations used to keep decision writes idempotent.
//!
//! Two relations that must not be conflated:
//!
//! - *same decision* decides whether a derived decision needs writing. Equal
//!   source-version markers are trusted outright; otherwise the result
//!   entries are compared in full, reason text included.
//! - *exists* identifies a check by item, check code and decision code only,
//!   so a re-derived decision whose reason wording changed is not new.
//!
//! The wrapper types implement `PartialEq` for use with slice and `Option`
//! equality. None of them implement `Hash`.

use std::cmp::Ordering;

use clearance_model::{Decision, DecisionCheck, DecisionCode, DecisionItem, DecisionResult};

/// Whether `a` and `b` are the same decision for write purposes.
pub fn is_same_decision(a: &Decision, b: &Decision) -> bool {
    let versions_match = matches!(
        (&a.source_version, &b.source_version),
        (Some(x), Some(y)) if x == y
    );
    versions_match || results_match(a.results.as_deref(), b.results.as_deref())
}

fn results_match(a: Option<&[DecisionResult]>, b: Option<&[DecisionResult]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            if a.len() != b.len() {
                return false;
            }
            let (a, b) = (sorted_results(a), sorted_results(b));
            a.iter().zip(&b).all(|(x, y)| result_exists(x, y))
        }
        _ => false,
    }
}

fn sorted_results(results: &[DecisionResult]) -> Vec<&DecisionResult> {
    let mut sorted: Vec<_> = results.iter().collect();
    sorted.sort_by(|x, y| by_document(x, y));
    sorted
}

fn by_document(x: &DecisionResult, y: &DecisionResult) -> Ordering {
    (&x.document_reference, &x.document_code).cmp(&(&y.document_reference, &y.document_code))
}

/// Whether two result entries record the same fact, reason text included.
pub fn result_exists(a: &DecisionResult, b: &DecisionResult) -> bool {
    a.item_number == b.item_number
        && a.is_linked() == b.is_linked()
        && a.document_reference == b.document_reference
        && a.check_code == b.check_code
        && a.decision_code == b.decision_code
        && a.decision_reason == b.decision_reason
        && a.internal_code == b.internal_code
}

/// Whether two items carry the same checks, by check code and decision code.
pub fn item_exists(a: &DecisionItem, b: &DecisionItem) -> bool {
    if a.item_number != b.item_number || a.checks.len() != b.checks.len() {
        return false;
    }
    check_keys(&a.checks) == check_keys(&b.checks)
}

fn check_keys(checks: &[DecisionCheck]) -> Vec<(&str, DecisionCode)> {
    let mut keys: Vec<_> = checks
        .iter()
        .map(|c| (c.check_code.as_str(), c.decision_code))
        .collect();
    keys.sort_by(|x, y| x.0.cmp(y.0));
    keys
}

/// The exists relation over whole item collections, matched by item number.
pub fn items_exist(a: Option<&[DecisionItem]>, b: Option<&[DecisionItem]>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            if a.len() != b.len() {
                return false;
            }
            let mut a: Vec<_> = a.iter().collect();
            let mut b: Vec<_> = b.iter().collect();
            a.sort_by_key(|i| i.item_number);
            b.sort_by_key(|i| i.item_number);
            a.iter().zip(&b).all(|(x, y)| item_exists(x, y))
        }
        _ => false,
    }
}

// ── Wrappers ──────────────────────────────────

/// [`Decision`] compared under the same-decision relation.
#[derive(Debug, Clone, Copy)]
pub struct SameDecision<'a>(pub &'a Decision);

impl PartialEq for SameDecision<'_> {
    fn eq(&self, other: &Self) -> bool {
        is_same_decision(self.0, other.0)
    }
}

/// [`DecisionResult`] compared under the result-existence relation.
#[derive(Debug, Clone, Copy)]
pub struct ExistingResult<'a>(pub &'a DecisionResult);

impl PartialEq for ExistingResult<'_> {
    fn eq(&self, other: &Self) -> bool {
        result_exists(self.0, other.0)
    }
}

/// [`DecisionItem`] compared under the exists relation.
#[derive(Debug, Clone, Copy)]
pub struct ExistingItem<'a>(pub &'a DecisionItem);

impl PartialEq for ExistingItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        item_exists(self.0, other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearance_model::InternalCode;

    fn result(reference: &str, code: DecisionCode, reason: Option<&str>) -> DecisionResult {
        DecisionResult {
            item_number: 1,
            import_pre_notification: None,
            document_reference: Some(reference.to_string()),
            document_code: Some("C640".to_string()),
            check_code: "H221".to_string(),
            decision_code: code,
            decision_reason: reason.map(str::to_string),
            internal_code: Some(InternalCode::E70),
        }
    }

    fn decision(version: Option<&str>, results: Option<Vec<DecisionResult>>) -> Decision {
        Decision {
            source_version: version.map(str::to_string),
            created: None,
            items: vec![],
            results,
        }
    }

    fn item(checks: &[(&str, DecisionCode, &str)]) -> DecisionItem {
        DecisionItem {
            item_number: 1,
            checks: checks
                .iter()
                .map(|(check, code, reason)| DecisionCheck {
                    check_code: check.to_string(),
                    decision_code: *code,
                    decision_reasons: vec![reason.to_string()],
                    internal_codes: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn same_decision_is_reflexive() {
        let d = decision(
            None,
            Some(vec![
                result("GBCHD2025.0000002", DecisionCode::X00, Some("not linked")),
                result("GBCHD2025.0000001", DecisionCode::C03, None),
            ]),
        );
        assert!(is_same_decision(&d, &d));
        assert_eq!(SameDecision(&d), SameDecision(&d));
    }

    #[test]
    fn same_decision_ignores_result_order_and_is_symmetric() {
        let a = decision(
            None,
            Some(vec![
                result("GBCHD2025.0000001", DecisionCode::C03, None),
                result("GBCHD2025.0000002", DecisionCode::H01, None),
            ]),
        );
        let b = decision(
            None,
            Some(vec![
                result("GBCHD2025.0000002", DecisionCode::H01, None),
                result("GBCHD2025.0000001", DecisionCode::C03, None),
            ]),
        );
        assert!(is_same_decision(&a, &b));
        assert!(is_same_decision(&b, &a));
    }

    #[test]
    fn reason_text_changes_the_decision() {
        let old = result("GBCHD2025.0000001", DecisionCode::X00, Some("old"));
        let new = result("GBCHD2025.0000001", DecisionCode::X00, Some("new"));
        assert_ne!(ExistingResult(&old), ExistingResult(&new));

        let a = decision(None, Some(vec![old]));
        let b = decision(None, Some(vec![new]));
        assert!(!is_same_decision(&a, &b));
    }

    #[test]
    fn matching_source_versions_bypass_content() {
        let released = result("GBCHD2025.0000001", DecisionCode::C03, None);
        let refused = result("GBCHD2025.0000001", DecisionCode::N02, None);
        let a = decision(Some("v1"), Some(vec![released]));
        let b = decision(Some("v1"), Some(vec![refused]));
        assert!(is_same_decision(&a, &b));

        let c = decision(Some("v2"), b.results.clone());
        assert!(!is_same_decision(&a, &c));
    }

    #[test]
    fn absent_results() {
        let none = decision(None, None);
        let empty = decision(None, Some(vec![]));
        assert!(is_same_decision(&none, &decision(None, None)));
        assert!(!is_same_decision(&none, &empty));
        assert!(!is_same_decision(&empty, &none));
    }

    #[test]
    fn exists_ignores_reason_text() {
        let a = item(&[
            ("H221", DecisionCode::X00, "old wording"),
            ("H222", DecisionCode::C03, ""),
        ]);
        let b = item(&[
            ("H222", DecisionCode::C03, "x"),
            ("H221", DecisionCode::X00, "new wording"),
        ]);
        assert!(item_exists(&a, &b));
        assert_eq!(ExistingItem(&a), ExistingItem(&b));

        let c = item(&[
            ("H221", DecisionCode::H01, "old wording"),
            ("H222", DecisionCode::C03, ""),
        ]);
        assert!(!item_exists(&a, &c));
    }

    #[test]
    fn items_exist_over_collections() {
        let a = vec![item(&[("H221", DecisionCode::C03, "")])];
        assert!(items_exist(None, None));
        assert!(items_exist(Some(a.as_slice()), Some(a.as_slice())));
        assert!(!items_exist(Some(a.as_slice()), None));
    }
}
