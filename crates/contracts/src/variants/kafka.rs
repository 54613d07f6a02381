//! Kafka topic

use serde::{Deserialize, Serialize};

use crate::base::impl_sink_contract;
use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkRequestBase, SinkType, SinkVariant};

const BOOTSTRAP_SERVERS: FieldSpec =
    FieldSpec::required("bootstrapServers", FieldKind::Text, FieldFormat::HostPortList);
const TOPIC_NAME: FieldSpec =
    FieldSpec::required("topicName", FieldKind::Text, FieldFormat::TopicName);
const SERIALIZATION_TYPE: FieldSpec = FieldSpec::optional(
    "serializationType",
    FieldKind::Text,
    FieldFormat::OneOf(&["JSON", "CANAL", "AVRO", "DEBEZIUM_JSON"]),
);
const PARTITION_NUM: FieldSpec =
    FieldSpec::optional("partitionNum", FieldKind::Integer, FieldFormat::Positive);
const AUTO_OFFSET_RESET: FieldSpec = FieldSpec::optional(
    "autoOffsetReset",
    FieldKind::Text,
    FieldFormat::OneOf(&["EARLIEST", "LATEST", "NONE"]),
);

const FIELDS: &[FieldSpec] = &[
    BOOTSTRAP_SERVERS,
    TOPIC_NAME,
    SERIALIZATION_TYPE,
    PARTITION_NUM,
    AUTO_OFFSET_RESET,
];

/// Record serialization written to the topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SerializationType {
    #[default]
    Json,
    Canal,
    Avro,
    DebeziumJson,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoOffsetReset {
    Earliest,
    Latest,
    None,
}

/// Request of a Kafka sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KafkaSinkRequest {
    #[serde(flatten)]
    pub base: SinkRequestBase,

    /// Comma-separated `host:port` brokers
    pub bootstrap_servers: String,

    pub topic_name: String,

    #[serde(default)]
    pub serialization_type: SerializationType,

    /// Partition count used when the topic is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_num: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_offset_reset: Option<AutoOffsetReset>,
}

impl KafkaSinkRequest {
    fn validate_fields(&self) -> Result<(), SinkError> {
        BOOTSTRAP_SERVERS.check_text(Some(&self.bootstrap_servers))?;
        TOPIC_NAME.check_text(Some(&self.topic_name))?;
        PARTITION_NUM.check_integer(self.partition_num)?;
        Ok(())
    }

    /// Broker addresses, trimmed
    pub fn brokers(&self) -> Vec<&str> {
        super::split_columns(Some(&self.bootstrap_servers))
    }
}

impl SinkVariant for KafkaSinkRequest {
    const SINK_TYPE: SinkType = SinkType::Kafka;
    const LABEL: &'static str = "Kafka";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }
}

impl From<KafkaSinkRequest> for SinkRequest {
    fn from(request: KafkaSinkRequest) -> Self {
        SinkRequest::Kafka(request)
    }
}

impl_sink_contract!(KafkaSinkRequest);
