//! Concrete sink-request variants, one per technology

mod clickhouse;
mod dlc_iceberg;
mod elasticsearch;
mod hive;
mod iceberg;
mod kafka;

pub use clickhouse::{ClickHouseSinkRequest, PartitionStrategy};
pub use dlc_iceberg::DlcIcebergSinkRequest;
pub use elasticsearch::ElasticsearchSinkRequest;
pub use hive::{HiveFileFormat, HiveSinkRequest};
pub use iceberg::{CatalogType, IcebergFileFormat, IcebergSinkRequest};
pub use kafka::{AutoOffsetReset, KafkaSinkRequest, SerializationType};

/// Non-blank optional text
fn is_set(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

/// Split a comma-separated list, dropping blank entries
fn split_columns(value: Option<&str>) -> Vec<&str> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
