//! `types` command implementation.

use anyhow::{Context, Result};
use contracts::FieldSpec;
use serde::Serialize;
use sink_registry::{SinkTypeRegistry, VariantDescriptor};

use crate::cli::TypesArgs;

#[derive(Serialize)]
struct SinkTypeInfo {
    sink_type: &'static str,
    label: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<&'static FieldSpec>,
}

/// Execute the `types` command
pub fn run_types(args: &TypesArgs) -> Result<()> {
    let registry = sink_registry::global();

    if args.json {
        let types = build_type_infos(registry, args.fields);
        let json =
            serde_json::to_string_pretty(&types).context("Failed to serialize sink types")?;
        println!("{}", json);
    } else {
        println!("Registered sink types ({}):", registry.len());
        for descriptor in registry.descriptors() {
            print_descriptor(descriptor, args.fields);
        }
    }

    Ok(())
}

fn build_type_infos(registry: &SinkTypeRegistry, with_fields: bool) -> Vec<SinkTypeInfo> {
    registry
        .descriptors()
        .map(|descriptor| SinkTypeInfo {
            sink_type: descriptor.tag(),
            label: descriptor.label(),
            fields: if with_fields {
                descriptor.fields().collect()
            } else {
                Vec::new()
            },
        })
        .collect()
}

fn print_descriptor(descriptor: &VariantDescriptor, with_fields: bool) {
    println!("  {:<15} {}", descriptor.tag(), descriptor.label());
    if !with_fields {
        return;
    }

    for field in descriptor.fields() {
        let marker = if field.required { "*" } else { " " };
        println!(
            "    {} {:<22} {}",
            marker,
            field.name,
            field.kind.describe()
        );
    }
}
