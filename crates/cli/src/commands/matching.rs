use std::path::Path;

use clearance_eval::match_documents;

use super::{print_json, read_context};
use crate::OutputFormat;

pub(crate) fn cmd_match(context_path: &Path, output: OutputFormat, quiet: bool) {
    let context = read_context(context_path, output, quiet);
    let result = match_documents(&context.notifications, &context.declarations);

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => print_json(&serde_json::json!(result)),
        OutputFormat::Text => {
            for m in &result.matches {
                println!(
                    "match    {} item {} {} {} -> {}",
                    m.mrn, m.item_number, m.document_code, m.document_reference,
                    m.notification_reference
                );
            }
            for n in &result.no_matches {
                println!(
                    "no match {} item {} {} {}",
                    n.mrn, n.item_number, n.document_code, n.document_reference
                );
            }
            println!(
                "{} matched, {} unmatched",
                result.matches.len(),
                result.no_matches.len()
            );
        }
    }
}
