//! Check-code classification and document reference normalisation.
//!
//! A document reference is only usable as evidence when its document code
//! is accepted for the check and the reference itself is well-formed for
//! the code's certificate family. Well-formed references reduce to a
//! canonical `YEAR.SEQUENCE` identifier so that `GBCHD2025.1234567` on a
//! declaration and `CHEDA.GB.2025.1234567` on a notification compare equal.
//!
//! Nothing here returns an error: a malformed reference is simply absent
//! evidence.

use clearance_model::{CertificateType, Document, Notification};

/// Check code for the plant-health goods movement (GMS) inspection.
pub const GOODS_MOVEMENT_CHECK_CODE: &str = "H220";

/// Check code for the illegal, unreported and unregulated fishing check.
pub const IUU_CHECK_CODE: &str = "H224";

/// Prefix shared by every certificate family on customs declarations.
const DECLARATION_PREFIX: &str = "GBCHD";

struct CheckCodeFamily {
    check_code: &'static str,
    certificate_type: CertificateType,
    document_codes: &'static [&'static str],
}

const CHECK_CODES: &[CheckCodeFamily] = &[
    CheckCodeFamily {
        check_code: "H221",
        certificate_type: CertificateType::ChedA,
        document_codes: &["C640"],
    },
    CheckCodeFamily {
        check_code: "H222",
        certificate_type: CertificateType::ChedP,
        document_codes: &["N853"],
    },
    CheckCodeFamily {
        check_code: IUU_CHECK_CODE,
        certificate_type: CertificateType::ChedP,
        document_codes: &["C673", "N853"],
    },
    CheckCodeFamily {
        check_code: "H223",
        certificate_type: CertificateType::ChedD,
        document_codes: &["C678", "N852"],
    },
    CheckCodeFamily {
        check_code: "H218",
        certificate_type: CertificateType::ChedPP,
        document_codes: &["N002", "C085"],
    },
    CheckCodeFamily {
        check_code: "H219",
        certificate_type: CertificateType::ChedPP,
        document_codes: &["N851", "9115", "C085"],
    },
    CheckCodeFamily {
        check_code: GOODS_MOVEMENT_CHECK_CODE,
        certificate_type: CertificateType::ChedPP,
        document_codes: &["N002", "C085"],
    },
];

fn check_family(check_code: &str) -> Option<&'static CheckCodeFamily> {
    let code = check_code.trim();
    CHECK_CODES
        .iter()
        .find(|family| family.check_code.eq_ignore_ascii_case(code))
}

/// Certificate type a check code belongs to, or `None` for codes outside
/// every family.
pub fn certificate_type_for_check(check_code: &str) -> Option<CertificateType> {
    check_family(check_code).map(|family| family.certificate_type)
}

/// Certificate family a document code evidences.
pub fn certificate_type_for_document(document_code: &str) -> Option<CertificateType> {
    let code = document_code.trim();
    CHECK_CODES
        .iter()
        .find(|family| {
            family.document_codes
                .iter()
                .any(|d| d.eq_ignore_ascii_case(code))
        })
        .map(|family| family.certificate_type)
}

/// Whether `document_code` is accepted as evidence for `check_code`.
pub fn is_document_code_valid_for_check(document_code: &str, check_code: &str) -> bool {
    let code = document_code.trim();
    check_family(check_code)
        .map(|family| {
            family.document_codes
                .iter()
                .any(|d| d.eq_ignore_ascii_case(code))
        })
        .unwrap_or(false)
}

/// Whether `reference` is well-formed for `document_code`.
pub fn is_reference_well_formed(reference: &str, document_code: &str) -> bool {
    document_identifier(reference, document_code).is_some()
}

/// Whether a declared document is both accepted for the check and carries
/// a well-formed reference.
pub fn qualifies_for_check(document: &Document, check_code: &str) -> bool {
    is_document_code_valid_for_check(&document.document_code, check_code)
        && is_reference_well_formed(&document.document_reference, &document.document_code)
}

/// Canonical identifier of a declared document, or `None` when the code is
/// unknown or the reference malformed.
pub fn document_identifier(reference: &str, document_code: &str) -> Option<String> {
    let certificate_type = certificate_type_for_document(document_code)?;
    parse_reference(reference, certificate_type).map(|r| r.identifier())
}

/// Canonical identifier of a notification, computed from its reference
/// number with its own certificate type's prefixes.
pub fn notification_identifier(notification: &Notification) -> Option<String> {
    parse_reference(
        &notification.reference_number,
        notification.certificate_type,
    )
    .map(|r| r.identifier())
}

/// A reference split into its significant parts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedReference {
    year: String,
    sequence: String,
}

impl ParsedReference {
    fn identifier(&self) -> String {
        format!("{}.{}", self.year, self.sequence)
    }
}

/// Parse `PREFIX [.] YEAR [.] SEQUENCE [R|V]`.
fn parse_reference(reference: &str, certificate_type: CertificateType) -> Option<ParsedReference> {
    let upper = reference.trim().to_ascii_uppercase();
    let rest = [certificate_type.notification_prefix(), DECLARATION_PREFIX]
        .iter()
        .find_map(|prefix| upper.strip_prefix(prefix))?;
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let (year, rest) = take_digits(rest, 4)?;
    if !year.starts_with("20") {
        return None;
    }
    let rest = rest.strip_prefix('.').unwrap_or(rest);
    let (sequence, rest) = take_digits(rest, 7)?;

    // Split consignments carry an R or V suffix on the parent's number.
    if !matches!(rest, "" | "R" | "V") {
        return None;
    }

    Some(ParsedReference {
        year: year.to_string(),
        sequence: sequence.to_string(),
    })
}

fn take_digits(s: &str, n: usize) -> Option<(&str, &str)> {
    if s.len() < n || !s.is_char_boundary(n) {
        return None;
    }
    let (digits, rest) = s.split_at(n);
    if digits.bytes().all(|b| b.is_ascii_digit()) {
        Some((digits, rest))
    } else {
        None
    }
}
