//! Payload 解析模块
//!
//! 支持 JSON (主要，wire 格式) 和 TOML (手写配置)。两者都解析为
//! `serde_json::Value`，解码器只面对一种结构。

use contracts::SinkError;
use serde_json::Value;

/// Payload 文本格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    /// JSON 格式 (wire 格式)
    Json,
    /// TOML 格式
    Toml,
}

impl PayloadFormat {
    /// 从文件扩展名推断格式
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// 解析 JSON 格式 payload
pub fn parse_json(content: &str) -> Result<Value, SinkError> {
    serde_json::from_str(content).map_err(|e| SinkError::PayloadParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 解析 TOML 格式 payload
pub fn parse_toml(content: &str) -> Result<Value, SinkError> {
    toml::from_str(content).map_err(|e| SinkError::PayloadParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// 按格式解析 payload
pub fn parse(content: &str, format: PayloadFormat) -> Result<Value, SinkError> {
    match format {
        PayloadFormat::Json => parse_json(content),
        PayloadFormat::Toml => parse_toml(content),
    }
}
