pub(crate) mod compare;
pub(crate) mod derive;
pub(crate) mod matching;
pub(crate) mod sync;

use std::path::Path;
use std::process;

use clearance_model::{context_from_json, DeclarationContext};

use crate::{report_error, OutputFormat};

/// Read and parse a JSON file, exiting with a reported error on failure.
pub(crate) fn read_json(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => {
            let msg = format!("error: file not found: {}", path.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error: invalid JSON in {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Read a declaration context file.
pub(crate) fn read_context(path: &Path, output: OutputFormat, quiet: bool) -> DeclarationContext {
    let value = read_json(path, output, quiet);
    match context_from_json(&value) {
        Ok(context) => context,
        Err(e) => {
            let msg = format!("error: {}: {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("serialization error: {}", e))
    );
}
