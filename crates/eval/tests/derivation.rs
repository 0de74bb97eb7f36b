//! End-to-end behaviour of the public derivation API.

use clearance_eval::{
    derive_decisions, derive_reasons, is_same_decision, items_exist, match_documents,
    CheckProcessor, EvalError, RuleSets,
};
use clearance_model::{
    context_from_json, CheckOutcome, DecisionCode, DeclarationContext, InternalCode,
};
use serde_json::json;

const MRN: &str = "25GB0000000000001";

fn context(value: serde_json::Value) -> DeclarationContext {
    context_from_json(&value).unwrap()
}

fn beef_with(documents: serde_json::Value, checks: &[&str]) -> serde_json::Value {
    let checks: Vec<_> = checks.iter().map(|c| json!({ "check_code": c })).collect();
    json!({
        "mrn": MRN,
        "version": 1,
        "commodities": [{
            "item_number": 1,
            "commodity_code": "0201100000",
            "description": "Fresh beef carcasses",
            "documents": documents,
            "checks": checks,
        }]
    })
}

#[test]
fn unmatched_cheda_document_is_not_linked() {
    let ctx = context(beef_with(
        json!([{ "document_code": "C640", "document_reference": "GBCHD2025.1234567" }]),
        &["H221"],
    ));
    let declaration = &ctx.declarations[0];
    let commodity = &declaration.commodities[0];

    let sets = RuleSets::default();
    let outcomes = CheckProcessor::new(&sets)
        .process(declaration, &ctx.notifications, commodity, &commodity.checks[0])
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].decision_code, DecisionCode::X00);
    let reason = outcomes[0].reasons.join(" ");
    assert!(reason.contains("CHED-A"), "{reason}");
    assert!(reason.contains("GBCHD2025.1234567"), "{reason}");
}

#[test]
fn goods_movement_check_without_documents() {
    let ctx = context(beef_with(json!([]), &["H220"]));
    let decisions = derive_decisions(&ctx, &RuleSets::default()).unwrap();

    let (mrn, decision) = &decisions[0];
    assert_eq!(mrn, MRN);
    let check = decision.item(1).and_then(|i| i.check("H220")).unwrap();
    assert_eq!(check.decision_code, DecisionCode::X00);
    let reason = check.decision_reasons.join(" ");
    assert!(reason.contains("Item 1"), "{reason}");
    assert!(reason.contains("0201100000"), "{reason}");
    assert!(reason.contains("Fresh beef carcasses"), "{reason}");
}

#[test]
fn unmapped_check_code_is_out_of_range_for_reasons() {
    let ctx = context(beef_with(json!([]), &["Z999"]));
    let declaration = &ctx.declarations[0];
    let commodity = &declaration.commodities[0];
    let outcome = CheckOutcome {
        mrn: MRN.to_string(),
        item_number: 1,
        document_reference: None,
        document_code: None,
        check_code: "Z999".to_string(),
        notification_reference: None,
        decision_code: DecisionCode::X00,
        internal_code: Some(InternalCode::E75),
        reasons: vec![],
    };

    let err = derive_reasons(declaration, commodity, &outcome, &[outcome.clone()]).unwrap_err();
    assert!(matches!(err, EvalError::CheckCodeOutOfRange { .. }));
}

#[test]
fn unmapped_check_code_still_yields_a_decision() {
    let ctx = context(beef_with(json!([]), &["Z999"]));
    let decisions = derive_decisions(&ctx, &RuleSets::default()).unwrap();
    let check = decisions[0].1.item(1).and_then(|i| i.check("Z999")).unwrap();
    assert_eq!(check.decision_code, DecisionCode::X00);
    assert_eq!(check.internal_codes, vec![InternalCode::E75]);
    assert!(check.decision_reasons.is_empty());
}

#[test]
fn every_check_yields_at_least_one_result() {
    let ctx = context(json!({
        "declarations": [beef_with(
            json!([
                { "document_code": "C640", "document_reference": "GBCHD2025.1234567" },
                { "document_code": "C640", "document_reference": "not-a-reference" },
                { "document_code": "N853", "document_reference": "GBCHD2025.7654321" }
            ]),
            &["H221", "H222", "H224", "H218", "H999"],
        )],
        "notifications": [{
            "reference_number": "CHEDA.GB.2025.1234567",
            "certificate_type": "CVEDA",
            "status": "validated",
            "part_two": { "decision": "acceptable_for_internal_market" }
        }]
    }));
    let decisions = derive_decisions(&ctx, &RuleSets::default()).unwrap();
    let decision = &decisions[0].1;
    let results = decision.results.as_ref().unwrap();

    for check in ["H221", "H222", "H224", "H218", "H999"] {
        assert!(
            results.iter().any(|r| r.check_code == check),
            "no result for {check}"
        );
    }
    let cheda = decision.item(1).and_then(|i| i.check("H221")).unwrap();
    assert_eq!(cheda.decision_code, DecisionCode::C03);
}

#[test]
fn rederiving_unchanged_inputs_is_the_same_decision() {
    let ctx = context(beef_with(
        json!([{ "document_code": "C640", "document_reference": "GBCHD2025.1234567" }]),
        &["H221"],
    ));
    let sets = RuleSets::default();
    let first = derive_decisions(&ctx, &sets).unwrap();
    let second = derive_decisions(&ctx, &sets).unwrap();

    assert!(is_same_decision(&first[0].1, &second[0].1));
    assert!(items_exist(
        Some(first[0].1.items.as_slice()),
        Some(second[0].1.items.as_slice())
    ));
}

#[test]
fn matching_reports_matches_and_no_matches() {
    let ctx = context(json!({
        "declarations": [beef_with(
            json!([
                { "document_code": "C640", "document_reference": "GBCHD2025.1234567" },
                { "document_code": "C640", "document_reference": "GBCHD2025.7654321" },
                { "document_code": "C640", "document_reference": "garbage" }
            ]),
            &["H221"],
        )],
        "notifications": [{
            "reference_number": "CHEDA.GB.2025.1234567",
            "certificate_type": "CVEDA",
            "status": "validated"
        }]
    }));

    let result = match_documents(&ctx.notifications, &ctx.declarations);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].notification_reference, "CHEDA.GB.2025.1234567");
    assert_eq!(result.no_matches.len(), 1);
    assert_eq!(result.no_matches[0].document_reference, "GBCHD2025.7654321");
}

#[test]
fn oversized_declared_mass_is_held_not_fatal() {
    let ctx = context(json!({
        "declarations": [{
            "mrn": MRN,
            "version": 1,
            "commodities": [{
                "item_number": 1,
                "commodity_code": "0102291000",
                "net_mass": "79228162514264337593543950335",
                "documents": [
                    { "document_code": "C640", "document_reference": "GBCHD2025.1234567" }
                ],
                "checks": [{ "check_code": "H221" }]
            }]
        }],
        "notifications": [{
            "reference_number": "CHEDA.GB.2025.1234567",
            "certificate_type": "CVEDA",
            "status": "validated",
            "part_two": { "decision": "acceptable_for_internal_market" },
            "commodities": [{ "commodity_code": "0102", "net_weight": "1" }]
        }]
    }));

    let decisions = derive_decisions(&ctx, &RuleSets::default()).unwrap();
    let check = decisions[0].1.item(1).and_then(|i| i.check("H221")).unwrap();
    assert_eq!(check.decision_code, DecisionCode::H01);
    assert_eq!(check.internal_codes, vec![InternalCode::E86]);
}
