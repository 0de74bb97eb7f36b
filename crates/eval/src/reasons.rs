//! Human-readable reasons for unresolved outcomes.
//!
//! Only `X00` outcomes get a reason, and only when the cause is visible
//! from the declaration itself: documents of the check's family that link to
//! no notification, or a goods movement check with no usable document.

use clearance_model::{CertificateType, CheckOutcome, Commodity, Declaration, DecisionCode};

use crate::error::EvalError;
use crate::identifiers::{
    certificate_type_for_check, certificate_type_for_document, is_reference_well_formed,
    qualifies_for_check,
    GOODS_MOVEMENT_CHECK_CODE, IUU_CHECK_CODE,
};

/// Who the trader is sent to when a certificate is not linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReasonFamily {
    AnimalAndPlantHealth,
    PortHealth,
    IllegalFishing,
}

impl ReasonFamily {
    fn for_check(check_code: &str, certificate_type: CertificateType) -> Self {
        if check_code.trim().eq_ignore_ascii_case(IUU_CHECK_CODE) {
            return ReasonFamily::IllegalFishing;
        }
        match certificate_type {
            CertificateType::ChedA | CertificateType::ChedPP => ReasonFamily::AnimalAndPlantHealth,
            CertificateType::ChedP | CertificateType::ChedD => ReasonFamily::PortHealth,
        }
    }

    fn not_linked(self, certificate_type: CertificateType, reference: &str) -> String {
        let name = certificate_type.display_name();
        match self {
            ReasonFamily::AnimalAndPlantHealth => format!(
                "This {name} reference {reference} is not linked to a pre-notification. \
                 Check the reference is correct and contact the Animal and Plant Health Agency \
                 if the problem continues."
            ),
            ReasonFamily::PortHealth => format!(
                "This {name} reference {reference} is not linked to a pre-notification. \
                 Check the reference is correct and contact the port health authority \
                 if the problem continues."
            ),
            ReasonFamily::IllegalFishing => format!(
                "This {name} reference {reference} is not linked to a pre-notification, \
                 so the illegal, unreported and unregulated fishing check cannot be completed. \
                 Contact the port health authority."
            ),
        }
    }
}

fn goods_movement(commodity: &Commodity) -> String {
    format!(
        "Item {item}, commodity code {code} ({description}), needs a plant health goods \
         movement check but no valid CHED-PP document was declared.",
        item = commodity.item_number,
        code = commodity.commodity_code.as_deref().unwrap_or("unknown"),
        description = commodity.description.as_deref().unwrap_or("no description"),
    )
}

/// Reasons for `outcome`, given every outcome produced for the same
/// commodity. Fails when the check code belongs to no certificate family.
pub fn derive_reasons(
    declaration: &Declaration,
    commodity: &Commodity,
    outcome: &CheckOutcome,
    all_outcomes: &[CheckOutcome],
) -> Result<Vec<String>, EvalError> {
    if outcome.decision_code != DecisionCode::X00 {
        return Ok(Vec::new());
    }

    let check_code = outcome.check_code.as_str();
    let Some(certificate_type) = certificate_type_for_check(check_code) else {
        tracing::warn!(
            mrn = %declaration.mrn,
            check_code,
            "reason requested for check code outside every certificate family"
        );
        return Err(EvalError::CheckCodeOutOfRange {
            check_code: check_code.to_string(),
        });
    };

    if check_code.trim().eq_ignore_ascii_case(GOODS_MOVEMENT_CHECK_CODE)
        && !commodity
            .documents
            .iter()
            .any(|d| qualifies_for_check(d, check_code))
    {
        return Ok(vec![goods_movement(commodity)]);
    }

    let family_documents: Vec<_> = commodity
        .documents
        .iter()
        .filter(|d| certificate_type_for_document(&d.document_code) == Some(certificate_type))
        .collect();
    if family_documents.is_empty() {
        return Ok(Vec::new());
    }

    let linked = all_outcomes.iter().any(|o| {
        o.item_number == outcome.item_number
            && o.check_code == outcome.check_code
            && o.notification_reference.is_some()
    });
    if linked {
        return Ok(Vec::new());
    }

    let fallback = family_documents
        .iter()
        .find(|d| is_reference_well_formed(&d.document_reference, &d.document_code))
        .unwrap_or(&family_documents[0]);
    let reference = outcome
        .document_reference
        .as_deref()
        .unwrap_or(fallback.document_reference.as_str());
    let family = ReasonFamily::for_check(check_code, certificate_type);
    Ok(vec![family.not_linked(certificate_type, reference)])
}
