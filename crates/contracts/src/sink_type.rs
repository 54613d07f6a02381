//! SinkType - 每个 sink 请求携带的判别标签

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SinkError;

/// Sink 技术类型标签
///
/// 序列化为大写 wire tag (e.g. `"DLC_ICEBERG"`)。变体按 tag 字典序声明，
/// 因此 `Ord` 与 [`SinkType::ALL`]、registry 遍历顺序一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SinkType {
    /// ClickHouse 表
    Clickhouse,
    /// 托管数据湖 catalog 上的 Iceberg 表
    DlcIceberg,
    /// Elasticsearch 索引
    Elasticsearch,
    /// Hive 表
    Hive,
    /// Hive / Hadoop catalog 上的 Iceberg 表
    Iceberg,
    /// Kafka topic
    Kafka,
}

impl SinkType {
    /// 全部内置 sink 类型，按 tag 排序
    pub const ALL: [SinkType; 6] = [
        SinkType::Clickhouse,
        SinkType::DlcIceberg,
        SinkType::Elasticsearch,
        SinkType::Hive,
        SinkType::Iceberg,
        SinkType::Kafka,
    ];

    /// Wire tag
    pub const fn as_str(self) -> &'static str {
        match self {
            SinkType::Clickhouse => "CLICKHOUSE",
            SinkType::DlcIceberg => "DLC_ICEBERG",
            SinkType::Elasticsearch => "ELASTICSEARCH",
            SinkType::Hive => "HIVE",
            SinkType::Iceberg => "ICEBERG",
            SinkType::Kafka => "KAFKA",
        }
    }
}

impl fmt::Display for SinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SinkType {
    type Err = SinkError;

    /// Tag 区分大小写。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sink_type| sink_type.as_str() == s)
            .ok_or_else(|| SinkError::unknown_sink_type(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matches_serde_name() {
        for sink_type in SinkType::ALL {
            let json = serde_json::to_value(sink_type).unwrap();
            assert_eq!(json, serde_json::Value::from(sink_type.as_str()));
        }
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        assert_eq!("DLC_ICEBERG".parse::<SinkType>().unwrap(), SinkType::DlcIceberg);
        let err = "kafka".parse::<SinkType>().unwrap_err();
        assert!(matches!(err, SinkError::UnknownSinkType { ref tag } if tag == "kafka"));
    }

    #[test]
    fn test_all_is_sorted_by_tag() {
        let tags: Vec<_> = SinkType::ALL.iter().map(|t| t.as_str()).collect();
        let mut sorted = tags.clone();
        sorted.sort_unstable();
        assert_eq!(tags, sorted);
    }

    #[test]
    fn test_ord_follows_tag_order() {
        let mut sorted = SinkType::ALL;
        sorted.sort();
        assert_eq!(sorted, SinkType::ALL);
        assert!(SinkType::Clickhouse < SinkType::Kafka);
        assert!(SinkType::DlcIceberg < SinkType::Iceberg);
    }
}
