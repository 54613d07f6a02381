//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{SinkRequest, SinkRequestContract};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::info;

use crate::cli::InfoArgs;
use sink_decoder::DecoderConfig;

/// Request summary for JSON output
#[derive(Serialize)]
struct SinkInfo {
    sink_type: &'static str,
    sink_name: String,
    display_name: String,
    inlong_group_id: String,
    inlong_stream_id: String,
    target: String,
    enable_create_resource: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_node_name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldInfo>,
}

#[derive(Serialize)]
struct FieldInfo {
    name: String,
    field_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs, config: &DecoderConfig) -> Result<()> {
    info!(payload = %args.payload.display(), "Loading sink payload");

    if !args.payload.exists() {
        anyhow::bail!("Payload file not found: {}", args.payload.display());
    }

    let request = super::loader(config, args.lenient)
        .load_from_path(&args.payload)
        .with_context(|| format!("Failed to load payload from {}", args.payload.display()))?;

    if args.json {
        let info = build_sink_info(&request);
        let json = serde_json::to_string_pretty(&info).context("Failed to serialize sink info")?;
        println!("{}", json);
    } else {
        print_sink_info(&request);
    }

    Ok(())
}

fn build_sink_info(request: &SinkRequest) -> SinkInfo {
    let base = request.base();

    SinkInfo {
        sink_type: request.discriminator().as_str(),
        sink_name: base.sink_name.clone(),
        display_name: base.display_name().to_string(),
        inlong_group_id: base.inlong_group_id.clone(),
        inlong_stream_id: base.inlong_stream_id.clone(),
        target: request.target(),
        enable_create_resource: base.enable_create_resource,
        data_node_name: base.data_node_name.clone(),
        properties: base.properties.clone(),
        fields: base
            .sink_field_list
            .iter()
            .map(|f| FieldInfo {
                name: f.field_name.clone(),
                field_type: f.field_type.clone(),
                source: f.source_field_name.clone(),
            })
            .collect(),
    }
}

fn print_sink_info(request: &SinkRequest) {
    let base = request.base();

    println!("Sink {} ({})", base.display_name(), request.discriminator());
    println!("   ├─ Name: {}", base.sink_name);
    println!(
        "   ├─ Stream: {} / {}",
        base.inlong_group_id, base.inlong_stream_id
    );
    println!("   ├─ Target: {}", request.target());
    if let Some(ref node) = base.data_node_name {
        println!("   ├─ Data node: {}", node);
    }
    println!(
        "   ├─ Create resource: {}",
        if base.enable_create_resource { "yes" } else { "no" }
    );

    if !base.properties.is_empty() {
        println!("   ├─ Properties ({}):", base.properties.len());
        for (key, value) in &base.properties {
            println!("   │     {} = {}", key, value);
        }
    }

    println!("   └─ Fields ({})", base.sink_field_list.len());
    for (i, field) in base.sink_field_list.iter().enumerate() {
        let prefix = if i == base.sink_field_list.len() - 1 {
            "└─"
        } else {
            "├─"
        };
        match field.source_field_name {
            Some(ref source) => println!(
                "         {} {} {} <- {}",
                prefix, field.field_name, field.field_type, source
            ),
            None => println!("         {} {} {}", prefix, field.field_name, field.field_type),
        }
    }
}
