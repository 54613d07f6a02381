//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::SinkRequestContract;
use observability::DecodeStatsAggregator;
use serde::Serialize;
use sink_decoder::{DecoderConfig, SinkConfigLoader};
use std::path::Path;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    payload_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sink_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sink_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ValidationError>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ValidationError {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    message: String,
}

#[derive(Serialize)]
struct ValidationReport {
    results: Vec<ValidationResult>,
    accepted: u64,
    rejected: u64,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs, config: &DecoderConfig) -> Result<()> {
    let loader = super::loader(config, args.lenient);
    let mut stats = DecodeStatsAggregator::new();

    let results: Vec<_> = args
        .payloads
        .iter()
        .map(|path| {
            info!(payload = %path.display(), "Validating payload");
            let result = validate_payload(&loader, path);
            match (&result.sink_type, &result.error) {
                (Some(sink_type), None) => stats.record_accepted(sink_type),
                (_, Some(error)) => stats.record_rejected(error.kind),
                (None, None) => {}
            }
            result
        })
        .collect();

    if args.json {
        let report = ValidationReport {
            results,
            accepted: stats.accepted,
            rejected: stats.rejected,
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize validation report")?;
        println!("{}", json);
    } else {
        for result in &results {
            print_validation_result(result);
        }
        if results.len() > 1 {
            println!("\n{}", stats);
        }
    }

    if stats.rejected == 0 {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} payloads failed validation",
            stats.rejected,
            stats.total()
        )
    }
}

fn validate_payload(loader: &SinkConfigLoader<'_>, path: &Path) -> ValidationResult {
    let payload_path = path.display().to_string();

    match loader.load_from_path(path) {
        Ok(request) => ValidationResult {
            valid: true,
            payload_path,
            sink_type: Some(request.discriminator().to_string()),
            sink_name: Some(request.identity().to_string()),
            error: None,
            warnings: collect_warnings(&request),
        },
        Err(e) => ValidationResult {
            valid: false,
            payload_path,
            sink_type: None,
            sink_name: None,
            error: Some(ValidationError {
                kind: e.kind(),
                field: e.field().map(str::to_string),
                message: e.to_string(),
            }),
            warnings: Vec::new(),
        },
    }
}

/// Collect non-fatal observations about a valid request
fn collect_warnings(request: &contracts::SinkRequest) -> Vec<String> {
    let mut warnings = Vec::new();
    let base = request.base();

    if base.sink_field_list.is_empty() {
        warnings.push("sinkFieldList is empty - columns will be inferred by the consumer".to_string());
    }

    if !base.enable_create_resource && base.data_node_name.is_none() {
        warnings.push(
            "enableCreateResource is false and no dataNodeName is set - the target must already exist"
                .to_string(),
        );
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Payload is valid: {}", result.payload_path);
        if let (Some(sink_type), Some(sink_name)) = (&result.sink_type, &result.sink_name) {
            println!("  Sink: {} ({})", sink_name, sink_type);
        }

        if !result.warnings.is_empty() {
            println!("  ⚠ Warnings:");
            for warning in &result.warnings {
                println!("    - {}", warning);
            }
        }
    } else {
        println!("✗ Payload is invalid: {}", result.payload_path);
        if let Some(ref error) = result.error {
            println!("  Error: {}", error.message);
        }
    }
}
