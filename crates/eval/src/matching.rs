//! Document-to-notification matching.
//!
//! For every commodity, declared documents are grouped by their
//! (reference, code) pair. Each group with a well-formed reference is
//! either linked to the first notification with an equal identifier or
//! recorded as a no-match. Groups with malformed references are skipped
//! without a record.

use std::collections::BTreeSet;

use clearance_model::{Declaration, Notification};
use serde::Serialize;

use crate::identifiers::{document_identifier, notification_identifier};

/// A document group linked to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentMatch {
    pub notification_reference: String,
    pub mrn: String,
    pub item_number: u32,
    pub document_reference: String,
    pub document_code: String,
}

/// A document group with a well-formed reference but no notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentNoMatch {
    pub mrn: String,
    pub item_number: u32,
    pub document_reference: String,
    pub document_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matches: Vec<DocumentMatch>,
    pub no_matches: Vec<DocumentNoMatch>,
}

/// Match every declared document group against `notifications`.
///
/// Ties go to the first notification in input order.
pub fn match_documents(notifications: &[Notification], declarations: &[Declaration]) -> MatchResult {
    // Identifiers are computed once; notifications with malformed numbers
    // can never match.
    let indexed: Vec<(String, &Notification)> = notifications
        .iter()
        .filter_map(|n| notification_identifier(n).map(|id| (id, n)))
        .collect();

    let mut result = MatchResult::default();

    for declaration in declarations {
        for commodity in &declaration.commodities {
            let groups: BTreeSet<(&str, &str)> = commodity
                .documents
                .iter()
                .map(|d| (d.document_reference.as_str(), d.document_code.as_str()))
                .collect();

            for (reference, code) in groups {
                let Some(identifier) = document_identifier(reference, code) else {
                    continue;
                };

                match indexed.iter().find(|(id, _)| *id == identifier) {
                    Some((_, notification)) => result.matches.push(DocumentMatch {
                        notification_reference: notification.reference_number.clone(),
                        mrn: declaration.mrn.clone(),
                        item_number: commodity.item_number,
                        document_reference: reference.to_string(),
                        document_code: code.to_string(),
                    }),
                    None => result.no_matches.push(DocumentNoMatch {
                        mrn: declaration.mrn.clone(),
                        item_number: commodity.item_number,
                        document_reference: reference.to_string(),
                        document_code: code.to_string(),
                    }),
                }
            }
        }
    }

    tracing::debug!(
        matches = result.matches.len(),
        no_matches = result.no_matches.len(),
        "matched declaration documents"
    );
    result
}
