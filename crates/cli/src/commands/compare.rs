use std::path::Path;
use std::process;

use clearance_eval::{is_same_decision, items_exist};
use clearance_model::{decision_from_json, Decision};

use super::{print_json, read_json};
use crate::{report_error, OutputFormat};

fn read_decision(path: &Path, output: OutputFormat, quiet: bool) -> Decision {
    let value = read_json(path, output, quiet);
    match decision_from_json(&value) {
        Ok(d) => d,
        Err(e) => {
            let msg = format!("error: {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Exits 0 when the two decisions are the same decision, 1 otherwise.
pub(crate) fn cmd_compare(a_path: &Path, b_path: &Path, output: OutputFormat, quiet: bool) {
    let a = read_decision(a_path, output, quiet);
    let b = read_decision(b_path, output, quiet);

    let same = is_same_decision(&a, &b);
    let exists = items_exist(Some(a.items.as_slice()), Some(b.items.as_slice()));

    if !quiet {
        match output {
            OutputFormat::Json => print_json(&serde_json::json!({
                "same_decision": same,
                "items_exist": exists,
            })),
            OutputFormat::Text => {
                println!("same decision: {}", if same { "yes" } else { "no" });
                println!("items exist:   {}", if exists { "yes" } else { "no" });
            }
        }
    }

    if !same {
        process::exit(1);
    }
}
