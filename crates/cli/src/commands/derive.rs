use std::path::Path;
use std::process;

use clearance_eval::{derive_decisions, RuleSets};
use clearance_model::Decision;

use super::{print_json, read_context};
use crate::config::ClearanceConfig;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_derive(
    context_path: &Path,
    config: &ClearanceConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let context = read_context(context_path, output, quiet);
    let rule_sets = RuleSets::standard(&config.rules);

    let decisions = match derive_decisions(&context, &rule_sets) {
        Ok(d) => d,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    if quiet {
        return;
    }
    match output {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = decisions
                .iter()
                .map(|(mrn, decision)| serde_json::json!({ "mrn": mrn, "decision": decision }))
                .collect();
            print_json(&serde_json::Value::Array(entries));
        }
        OutputFormat::Text => {
            for (mrn, decision) in &decisions {
                print_decision(mrn, decision);
            }
        }
    }
}

pub(crate) fn print_decision(mrn: &str, decision: &Decision) {
    println!("{}", mrn);
    for item in &decision.items {
        println!("  item {}", item.item_number);
        for check in &item.checks {
            let internal: Vec<&str> = check.internal_codes.iter().map(|c| c.as_str()).collect();
            if internal.is_empty() {
                println!("    {} {}", check.check_code, check.decision_code);
            } else {
                println!(
                    "    {} {} [{}]",
                    check.check_code,
                    check.decision_code,
                    internal.join(", ")
                );
            }
            for reason in &check.decision_reasons {
                println!("      {}", reason);
            }
        }
    }
}
