//! 解码器配置
//!
//! 启动时从 TOML 加载，例如：
//!
//! ```toml
//! unknown_fields = "reject"
//! enabled_sink_types = ["DLC_ICEBERG", "KAFKA"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use contracts::{SinkError, SinkType};
use sink_registry::SinkTypeRegistry;

/// 对变体未声明字段的处理策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// 以 `UnrecognizedField` 拒绝
    #[default]
    Reject,
    /// 丢弃该字段并继续
    Ignore,
}

/// Decoder settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    /// 未知字段策略
    #[serde(default)]
    pub unknown_fields: Strictness,

    /// 需要注册的 sink 类型；为空表示全部内置类型
    #[serde(default)]
    pub enabled_sink_types: Vec<SinkType>,
}

impl DecoderConfig {
    /// 从 TOML 文件加载
    pub fn load_from_path(path: &Path) -> Result<Self, SinkError> {
        let content = std::fs::read_to_string(path)?;
        Self::load_from_str(&content)
    }

    /// 从 TOML 文本加载
    pub fn load_from_str(content: &str) -> Result<Self, SinkError> {
        toml::from_str(content).map_err(|e| SinkError::PayloadParse {
            message: format!("decoder config parse error: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// 构建启动时的 registry
    ///
    /// # Errors
    /// `enabled_sink_types` 重复列出某类型时返回 `DuplicateDiscriminator`
    pub fn build_registry(&self) -> Result<SinkTypeRegistry, SinkError> {
        if self.enabled_sink_types.is_empty() {
            Ok(SinkTypeRegistry::builtin())
        } else {
            SinkTypeRegistry::with_sink_types(self.enabled_sink_types.iter().copied())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::load_from_str("").unwrap();
        assert_eq!(config.unknown_fields, Strictness::Reject);
        assert!(config.enabled_sink_types.is_empty());
        assert_eq!(config.build_registry().unwrap().len(), SinkType::ALL.len());
    }

    #[test]
    fn test_enabled_sink_types() {
        let config = DecoderConfig::load_from_str(
            r#"
unknown_fields = "ignore"
enabled_sink_types = ["DLC_ICEBERG", "KAFKA"]
"#,
        )
        .unwrap();
        assert_eq!(config.unknown_fields, Strictness::Ignore);
        let registry = config.build_registry().unwrap();
        assert_eq!(registry.tags().collect::<Vec<_>>(), vec!["DLC_ICEBERG", "KAFKA"]);
    }

    #[test]
    fn test_duplicate_enabled_type_aborts() {
        let config = DecoderConfig::load_from_str(r#"enabled_sink_types = ["KAFKA", "KAFKA"]"#)
            .unwrap();
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, SinkError::DuplicateDiscriminator { .. }));
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let err = DecoderConfig::load_from_str("strict = true").unwrap_err();
        assert!(matches!(err, SinkError::PayloadParse { .. }));
    }

    #[test]
    fn test_unknown_sink_type_rejected() {
        let err = DecoderConfig::load_from_str(r#"enabled_sink_types = ["REDIS"]"#).unwrap_err();
        assert!(err.to_string().contains("decoder config parse error"), "got: {err}");
    }
}
