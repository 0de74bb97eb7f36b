//! Loading declaration contexts and decisions from JSON.
//!
//! The entry point is [`context_from_json`], which accepts either a full
//! context object (`{"declarations": [...], "notifications": [...]}`) or a
//! single declaration object, and checks the structural invariants serde
//! cannot express.

use std::collections::BTreeSet;

use crate::declaration::{Declaration, DeclarationContext};
use crate::decision::Decision;

/// Errors while reading input JSON.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The JSON does not have the expected shape.
    #[error("invalid {kind}: {source}")]
    Shape {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Two commodities of one declaration share an item number.
    #[error("declaration {mrn}: duplicate item number {item_number}")]
    DuplicateItem { mrn: String, item_number: u32 },

    /// A declaration has an empty MRN.
    #[error("declaration with empty mrn")]
    MissingMrn,
}

/// Deserialize a declaration context.
pub fn context_from_json(value: &serde_json::Value) -> Result<DeclarationContext, ModelError> {
    let context = if value.get("declarations").is_some() || value.get("notifications").is_some()
    {
        serde_json::from_value::<DeclarationContext>(value.clone()).map_err(|source| {
            ModelError::Shape {
                kind: "declaration context",
                source,
            }
        })?
    } else {
        let declaration =
            serde_json::from_value::<Declaration>(value.clone()).map_err(|source| {
                ModelError::Shape {
                    kind: "declaration",
                    source,
                }
            })?;
        DeclarationContext {
            declarations: vec![declaration],
            notifications: Vec::new(),
        }
    };

    for declaration in &context.declarations {
        validate_declaration(declaration)?;
    }
    Ok(context)
}

/// Deserialize a single decision.
pub fn decision_from_json(value: &serde_json::Value) -> Result<Decision, ModelError> {
    serde_json::from_value(value.clone()).map_err(|source| ModelError::Shape {
        kind: "decision",
        source,
    })
}

fn validate_declaration(declaration: &Declaration) -> Result<(), ModelError> {
    if declaration.mrn.trim().is_empty() {
        return Err(ModelError::MissingMrn);
    }
    let mut seen = BTreeSet::new();
    for commodity in &declaration.commodities {
        if !seen.insert(commodity.item_number) {
            return Err(ModelError::DuplicateItem {
                mrn: declaration.mrn.clone(),
                item_number: commodity.item_number,
            });
        }
    }
    Ok(())
}
