//! SinkRequest - the validated configuration handed to provisioning
//!
//! A closed sum type over all variants. Serializes as the variant's fields
//! plus `sinkType`, which is also the persisted form.

use serde::{Deserialize, Serialize};

use crate::variants::{
    ClickHouseSinkRequest, DlcIcebergSinkRequest, ElasticsearchSinkRequest, HiveSinkRequest,
    IcebergSinkRequest, KafkaSinkRequest,
};
use crate::{SinkError, SinkRequestBase, SinkRequestContract, SinkType};

/// Any sink request, discriminated by `sinkType`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "sinkType")]
pub enum SinkRequest {
    #[serde(rename = "ICEBERG")]
    Iceberg(IcebergSinkRequest),
    #[serde(rename = "DLC_ICEBERG")]
    DlcIceberg(DlcIcebergSinkRequest),
    #[serde(rename = "KAFKA")]
    Kafka(KafkaSinkRequest),
    #[serde(rename = "HIVE")]
    Hive(HiveSinkRequest),
    #[serde(rename = "CLICKHOUSE")]
    Clickhouse(ClickHouseSinkRequest),
    #[serde(rename = "ELASTICSEARCH")]
    Elasticsearch(ElasticsearchSinkRequest),
}

/// Forward to the inner variant
macro_rules! dispatch {
    ($self:expr, $inner:ident => $body:expr) => {
        match $self {
            SinkRequest::Iceberg($inner) => $body,
            SinkRequest::DlcIceberg($inner) => $body,
            SinkRequest::Kafka($inner) => $body,
            SinkRequest::Hive($inner) => $body,
            SinkRequest::Clickhouse($inner) => $body,
            SinkRequest::Elasticsearch($inner) => $body,
        }
    };
}

impl SinkRequest {
    /// Human-readable destination, e.g. `db1.t1` or `kafka topic orders`
    pub fn target(&self) -> String {
        match self {
            SinkRequest::Iceberg(r) => format!("{}.{}", r.db_name, r.table_name),
            SinkRequest::DlcIceberg(r) => format!("{}.{}", r.db_name, r.table_name),
            SinkRequest::Kafka(r) => format!("topic {}", r.topic_name),
            SinkRequest::Hive(r) => format!("{}.{}", r.db_name, r.table_name),
            SinkRequest::Clickhouse(r) => format!("{}.{}", r.db_name, r.table_name),
            SinkRequest::Elasticsearch(r) => format!("index {}", r.index_name),
        }
    }
}

impl SinkRequestContract for SinkRequest {
    fn discriminator(&self) -> SinkType {
        dispatch!(self, inner => inner.discriminator())
    }

    fn base(&self) -> &SinkRequestBase {
        dispatch!(self, inner => inner.base())
    }

    fn validate(&self) -> Result<(), SinkError> {
        dispatch!(self, inner => inner.validate())
    }
}
