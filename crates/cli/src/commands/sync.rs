use std::path::Path;
use std::process;

use clearance_eval::{DecisionService, RuleSets, SyncOutcome};
use clearance_storage::InMemoryStore;

use super::derive::print_decision;
use super::{print_json, read_context};
use crate::config::ClearanceConfig;
use crate::{report_error, OutputFormat};

pub(crate) async fn cmd_sync(
    store_path: &Path,
    mrn: &str,
    write: bool,
    config: &ClearanceConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let context = read_context(store_path, output, quiet);
    let service = DecisionService::new(
        InMemoryStore::from_context(context),
        RuleSets::standard(&config.rules),
    );

    let outcome = match service.derive_and_persist(mrn).await {
        Ok(o) => o,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if write && outcome.was_written() {
        let updated = service.store().to_context().await;
        let saved = serde_json::to_string_pretty(&updated)
            .map_err(|e| e.to_string())
            .and_then(|s| std::fs::write(store_path, s + "\n").map_err(|e| e.to_string()));
        if let Err(e) = saved {
            let msg = format!("error: could not save {}: {}", store_path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let sequence = match &outcome {
                SyncOutcome::Written { record, .. } => Some(record.sequence),
                SyncOutcome::Unchanged { .. } => None,
            };
            print_json(&serde_json::json!({
                "mrn": mrn,
                "written": outcome.was_written(),
                "sequence": sequence,
                "decision": outcome.decision(),
            }));
        }
        OutputFormat::Text => {
            let status = if outcome.was_written() {
                "written"
            } else {
                "unchanged"
            };
            println!("decision {}", status);
            print_decision(mrn, outcome.decision());
        }
    }
}
