//! ClickHouse table

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const JDBC_URL: FieldSpec = FieldSpec::required("jdbcUrl", FieldKind::Text, FieldFormat::Uri);
const DB_NAME: FieldSpec = FieldSpec::required("dbName", FieldKind::Text, FieldFormat::Identifier);
const TABLE_NAME: FieldSpec =
    FieldSpec::required("tableName", FieldKind::Text, FieldFormat::Identifier);
const FLUSH_INTERVAL: FieldSpec =
    FieldSpec::optional("flushInterval", FieldKind::Integer, FieldFormat::Positive);
const IS_DISTRIBUTED: FieldSpec =
    FieldSpec::optional("isDistributed", FieldKind::Boolean, FieldFormat::Any);
const PARTITION_STRATEGY: FieldSpec = FieldSpec::optional(
    "partitionStrategy",
    FieldKind::Text,
    FieldFormat::OneOf(&["BALANCE", "RANDOM", "HASH"]),
);
const PARTITION_FIELDS: FieldSpec =
    FieldSpec::optional("partitionFields", FieldKind::Text, FieldFormat::ColumnList);

const FIELDS: &[FieldSpec] = &[
    JDBC_URL,
    DB_NAME,
    TABLE_NAME,
    FLUSH_INTERVAL,
    IS_DISTRIBUTED,
    PARTITION_STRATEGY,
    PARTITION_FIELDS,
];

/// How rows are spread over the shards of a distributed table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartitionStrategy {
    Balance,
    Random,
    Hash,
}

/// Request of a ClickHouse sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickHouseSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    pub jdbc_url: String,

    pub db_name: String,

    pub table_name: String,

    /// Flush interval in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flush_interval: Option<i64>,

    #[serde(default)]
    pub is_distributed: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_strategy: Option<PartitionStrategy>,

    /// Hash key columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_fields: Option<String>,
}

impl ClickHouseSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        JDBC_URL.check_text(Some(&self.jdbc_url))?;
        DB_NAME.check_text(Some(&self.db_name))?;
        TABLE_NAME.check_text(Some(&self.table_name))?;
        FLUSH_INTERVAL.check_integer(self.flush_interval)?;
        PARTITION_FIELDS.check_text(self.partition_fields.as_deref())?;

        if self.is_distributed && self.partition_strategy.is_none() {
            return Err(SinkError::missing_field(PARTITION_STRATEGY.name));
        }
        if self.partition_strategy == Some(PartitionStrategy::Hash)
            && !super::is_set(self.partition_fields.as_deref())
        {
            return Err(SinkError::missing_field(PARTITION_FIELDS.name));
        }
        Ok(())
    }
}

impl SinkVariant for ClickHouseSinkRequest {
    const SINK_TYPE: SinkType = SinkType::Clickhouse;
    const LABEL: &'static str = "ClickHouse";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<ClickHouseSinkRequest> for SinkRequest {
    fn from(request: ClickHouseSinkRequest) -> Self {
        SinkRequest::Clickhouse(request)
    }
}

impl_sink_contract!(ClickHouseSinkRequest);
