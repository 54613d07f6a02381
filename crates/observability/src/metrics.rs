//! 解码指标收集模块
//!
//! 解码器产生的计数器，以及用于批量校验汇总的内存聚合器。
//! 未安装 recorder 时 `metrics` 宏不做任何事。

use std::collections::BTreeMap;
use std::fmt;

use metrics::{counter, gauge};

/// 记录一次通过校验的 payload
pub fn record_decode_accepted(sink_type: &str) {
    counter!(
        "sinkconf_decode_total",
        "sink_type" => sink_type.to_string(),
        "outcome" => "accepted"
    )
    .increment(1);
}

/// 记录一次被拒绝的 payload
///
/// 在读取判别字段阶段被拒绝时 `sink_type` 未知。
pub fn record_decode_rejected(sink_type: Option<&str>, stage: &str, reason: &str) {
    counter!(
        "sinkconf_decode_total",
        "sink_type" => sink_type.unwrap_or("unknown").to_string(),
        "outcome" => "rejected"
    )
    .increment(1);

    counter!(
        "sinkconf_decode_rejected_total",
        "stage" => stage.to_string(),
        "reason" => reason.to_string()
    )
    .increment(1);
}

/// 记录已发布 registry 的 sink 类型数量
pub fn record_registered_sink_types(count: usize) {
    gauge!("sinkconf_registered_sink_types").set(count as f64);
}

/// 解码结果聚合器
///
/// 累计一批 payload 的结果，用于生成汇总报告。
#[derive(Debug, Clone, Default)]
pub struct DecodeStatsAggregator {
    pub accepted: u64,
    pub rejected: u64,
    /// 按 sink 类型统计的通过数
    pub accepted_by_type: BTreeMap<String, u64>,
    /// 按错误类型统计的拒绝数
    pub rejected_by_reason: BTreeMap<String, u64>,
}

impl DecodeStatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&mut self, sink_type: &str) {
        self.accepted += 1;
        *self
            .accepted_by_type
            .entry(sink_type.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_rejected(&mut self, reason: &str) {
        self.rejected += 1;
        *self
            .rejected_by_reason
            .entry(reason.to_string())
            .or_insert(0) += 1;
    }

    pub fn total(&self) -> u64 {
        self.accepted + self.rejected
    }

    /// 拒绝率 (百分比)
    pub fn rejection_rate(&self) -> f64 {
        if self.total() > 0 {
            self.rejected as f64 / self.total() as f64 * 100.0
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for DecodeStatsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Decode Summary ===")?;
        writeln!(f, "Payloads: {}", self.total())?;
        writeln!(f, "Accepted: {}", self.accepted)?;
        writeln!(
            f,
            "Rejected: {} ({:.2}%)",
            self.rejected,
            self.rejection_rate()
        )?;

        if !self.accepted_by_type.is_empty() {
            writeln!(f, "Accepted by sink type:")?;
            for (sink_type, count) in &self.accepted_by_type {
                writeln!(f, "  {}: {}", sink_type, count)?;
            }
        }

        if !self.rejected_by_reason.is_empty() {
            writeln!(f, "Rejected by reason:")?;
            for (reason, count) in &self.rejected_by_reason {
                writeln!(f, "  {}: {}", reason, count)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregator_counts() {
        let mut stats = DecodeStatsAggregator::new();
        stats.record_accepted("KAFKA");
        stats.record_accepted("KAFKA");
        stats.record_accepted("HIVE");
        stats.record_rejected("missing_required_field");

        assert_eq!(stats.total(), 4);
        assert_eq!(stats.accepted_by_type.get("KAFKA"), Some(&2));
        assert_eq!(stats.rejection_rate(), 25.0);

        let report = stats.to_string();
        assert!(report.contains("Rejected: 1 (25.00%)"), "got: {report}");
        assert!(report.contains("missing_required_field: 1"), "got: {report}");

        stats.reset();
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.rejection_rate(), 0.0);
    }

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_decode_accepted("KAFKA");
        record_decode_rejected(None, "reading", "missing_discriminator");
        record_registered_sink_types(6);
    }
}
