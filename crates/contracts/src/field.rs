//! 字段校验规则表
//!
//! 每个变体以静态 [`FieldSpec`] 表声明其字段。
//!
//! 校验规则：
//! - 结构阶段 (decoder)：必填存在、JSON 类型、枚举取值
//! - 格式阶段 (`validate()`)：identifier / URI / host:port / topic / index 等格式
//! - 空白字符串视为未提供

use serde::Serialize;
use serde_json::Value;
use validator::ValidateUrl;

use crate::SinkError;

/// Kafka 允许的最长 topic 名
const MAX_TOPIC_LEN: usize = 249;

/// Elasticsearch 允许的最长索引名 (字节)
const MAX_INDEX_LEN: usize = 255;

/// 字段的 JSON 结构类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
    /// 值均为字符串的对象
    TextMap,
    /// 字段映射对象数组
    FieldList,
}

impl FieldKind {
    /// (非 null) JSON 值是否符合该结构
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Integer => value.as_i64().is_some(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::TextMap => value
                .as_object()
                .is_some_and(|map| map.values().all(Value::is_string)),
            FieldKind::FieldList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_object)),
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::TextMap => "object of strings",
            FieldKind::FieldList => "array of objects",
        }
    }
}

/// 对已提供值施加的格式约束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "format", content = "values")]
pub enum FieldFormat {
    Any,
    /// `[A-Za-z_][A-Za-z0-9_]*`
    Identifier,
    /// 逗号分隔的 identifier
    ColumnList,
    /// 带显式 scheme 的 URI
    Uri,
    /// 逗号分隔的 URI
    UriList,
    /// 逗号分隔的 `host:port`
    HostPortList,
    TopicName,
    IndexName,
    /// 固定取值之一 (区分大小写)
    OneOf(&'static [&'static str]),
    /// 大于 0 的整数
    Positive,
}

impl FieldFormat {
    /// 校验文本值；`field` 用于错误定位
    pub fn check_text(self, field: &str, value: &str) -> Result<(), SinkError> {
        let verdict = match self {
            FieldFormat::Any | FieldFormat::Positive => Ok(()),
            FieldFormat::Identifier => check_identifier(value),
            FieldFormat::ColumnList => check_list(value, check_identifier),
            FieldFormat::Uri => check_uri(value),
            FieldFormat::UriList => check_list(value, check_uri),
            FieldFormat::HostPortList => check_list(value, check_host_port),
            FieldFormat::TopicName => check_topic_name(value),
            FieldFormat::IndexName => check_index_name(value),
            FieldFormat::OneOf(allowed) => {
                if allowed.contains(&value) {
                    Ok(())
                } else {
                    Err(format!("expected one of {}", allowed.join(", ")))
                }
            }
        };
        verdict.map_err(|reason| SinkError::invalid_format(field, reason))
    }

    /// 校验整数值；`field` 用于错误定位
    pub fn check_integer(self, field: &str, value: i64) -> Result<(), SinkError> {
        match self {
            FieldFormat::Positive if value <= 0 => Err(SinkError::invalid_format(
                field,
                format!("must be a positive integer, got {value}"),
            )),
            _ => Ok(()),
        }
    }
}

/// 变体字段表中的一项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(flatten)]
    pub format: FieldFormat,
}

impl FieldSpec {
    /// 必填字段
    pub const fn required(name: &'static str, kind: FieldKind, format: FieldFormat) -> Self {
        Self {
            name,
            kind,
            required: true,
            format,
        }
    }

    /// 可选字段
    pub const fn optional(name: &'static str, kind: FieldKind, format: FieldFormat) -> Self {
        Self {
            name,
            kind,
            required: false,
            format,
        }
    }

    /// 校验文本字段，空白视为未提供
    pub fn check_text(&self, value: Option<&str>) -> Result<(), SinkError> {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(v) => self.format.check_text(self.name, v),
            None if self.required => Err(SinkError::missing_field(self.name)),
            None => Ok(()),
        }
    }

    /// 校验整数字段
    pub fn check_integer(&self, value: Option<i64>) -> Result<(), SinkError> {
        match value {
            Some(v) => self.format.check_integer(self.name, v),
            None if self.required => Err(SinkError::missing_field(self.name)),
            None => Ok(()),
        }
    }

    /// 原始值是否等同于未提供：`null`，或可选文本字段的空白字符串
    pub fn is_absent(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(text) => !self.required && text.trim().is_empty(),
            _ => false,
        }
    }

    /// 类型化解码前对原始值做结构校验
    ///
    /// 缺失与 [`is_absent`](Self::is_absent) 的值视为未提供。枚举值在此校验，
    /// 否则类型化解码的报错无法定位到字段。
    pub fn check_shape(&self, value: Option<&Value>) -> Result<(), SinkError> {
        let Some(value) = value.filter(|v| !self.is_absent(v)) else {
            return if self.required {
                Err(SinkError::missing_field(self.name))
            } else {
                Ok(())
            };
        };

        if !self.kind.matches(value) {
            return Err(SinkError::invalid_format(
                self.name,
                format!("expected {}", self.kind.describe()),
            ));
        }

        match (self.format, value.as_str()) {
            (FieldFormat::OneOf(_), Some(text)) => self.format.check_text(self.name, text),
            _ => Ok(()),
        }
    }
}

/// `value` 是否为安全的库/表/列 identifier
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn check_identifier(value: &str) -> Result<(), String> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(format!(
            "'{value}' is not an identifier (letters, digits and '_', not starting with a digit)"
        ))
    }
}

fn check_list(value: &str, item: fn(&str) -> Result<(), String>) -> Result<(), String> {
    value.split(',').map(str::trim).try_for_each(|part| {
        if part.is_empty() {
            Err("list contains an empty entry".to_string())
        } else {
            item(part)
        }
    })
}

fn check_uri(value: &str) -> Result<(), String> {
    // `host:port` 会被解析成 scheme 为 `host` 的 URL，因此要求包含 `://`
    if value.contains("://") && value.validate_url() {
        Ok(())
    } else {
        Err(format!("'{value}' is not a URI with a scheme"))
    }
}

fn check_host_port(value: &str) -> Result<(), String> {
    let Some((host, port)) = value.rsplit_once(':') else {
        return Err(format!("'{value}' is not host:port"));
    };
    if host.is_empty() || host.contains(char::is_whitespace) || host.contains('/') {
        return Err(format!("'{value}' has an invalid host"));
    }
    match port.parse::<u16>() {
        Ok(p) if p > 0 => Ok(()),
        _ => Err(format!("'{value}' has an invalid port")),
    }
}

fn check_topic_name(value: &str) -> Result<(), String> {
    if value == "." || value == ".." {
        return Err(format!("'{value}' is a reserved topic name"));
    }
    if value.len() > MAX_TOPIC_LEN {
        return Err(format!("topic name longer than {MAX_TOPIC_LEN} characters"));
    }
    if value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        Ok(())
    } else {
        Err(format!(
            "'{value}' may only contain letters, digits, '.', '_' and '-'"
        ))
    }
}

fn check_index_name(value: &str) -> Result<(), String> {
    if value.len() > MAX_INDEX_LEN {
        return Err(format!("index name longer than {MAX_INDEX_LEN} bytes"));
    }
    if value.starts_with(['-', '_', '+']) {
        return Err(format!("'{value}' must not start with '-', '_' or '+'"));
    }
    if value.chars().any(|c| c.is_uppercase()) {
        return Err(format!("'{value}' must be lowercase"));
    }
    if value.contains([
        '\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':',
    ]) {
        return Err(format!("'{value}' contains a forbidden character"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DB: FieldSpec = FieldSpec::required("dbName", FieldKind::Text, FieldFormat::Identifier);
    const PK: FieldSpec =
        FieldSpec::optional("primaryKey", FieldKind::Text, FieldFormat::ColumnList);

    #[test]
    fn test_required_blank_is_missing() {
        let err = DB.check_text(Some("   ")).unwrap_err();
        assert!(matches!(err, SinkError::MissingRequiredField { ref field } if field == "dbName"));
        let err = DB.check_text(None).unwrap_err();
        assert!(matches!(err, SinkError::MissingRequiredField { .. }));
    }

    #[test]
    fn test_optional_absent_is_ok() {
        assert!(PK.check_text(None).is_ok());
        assert!(PK.check_text(Some("")).is_ok());
        assert!(PK.check_text(Some("id, tenant_id")).is_ok());
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("db_1"));
        assert!(is_identifier("_staging"));
        assert!(!is_identifier("1db"));
        assert!(!is_identifier("db-1"));
        assert!(!is_identifier("db.t"));
        assert!(!is_identifier(""));

        let err = DB.check_text(Some("my-db")).unwrap_err();
        assert!(matches!(err, SinkError::InvalidFieldFormat { ref field, .. } if field == "dbName"));
    }

    #[test]
    fn test_column_list_rejects_empty_entry() {
        let err = PK.check_text(Some("id,,name")).unwrap_err();
        assert!(err.to_string().contains("empty entry"), "got: {err}");
    }

    #[test]
    fn test_uri_requires_scheme() {
        assert!(FieldFormat::Uri.check_text("u", "thrift://host:9083").is_ok());
        assert!(FieldFormat::Uri.check_text("u", "s3://bucket/wh").is_ok());
        assert!(FieldFormat::Uri
            .check_text("u", "jdbc:hive2://host:10000/default")
            .is_ok());
        assert!(FieldFormat::Uri.check_text("u", "localhost:9083").is_err());
        assert!(FieldFormat::Uri.check_text("u", "/tmp/warehouse").is_err());
    }

    #[test]
    fn test_host_port_list() {
        let format = FieldFormat::HostPortList;
        assert!(format.check_text("b", "k1:9092,k2:9092").is_ok());
        assert!(format.check_text("b", "k1").is_err());
        assert!(format.check_text("b", "k1:0").is_err());
        assert!(format.check_text("b", ":9092").is_err());
    }

    #[test]
    fn test_topic_and_index_names() {
        assert!(FieldFormat::TopicName.check_text("t", "orders.v1-raw_x").is_ok());
        assert!(FieldFormat::TopicName.check_text("t", "..").is_err());
        assert!(FieldFormat::TopicName.check_text("t", "a b").is_err());
        assert!(FieldFormat::IndexName.check_text("i", "logs-2024").is_ok());
        assert!(FieldFormat::IndexName.check_text("i", "Logs").is_err());
        assert!(FieldFormat::IndexName.check_text("i", "_logs").is_err());
    }

    #[test]
    fn test_positive_integer() {
        let spec = FieldSpec::optional("partitionNum", FieldKind::Integer, FieldFormat::Positive);
        assert!(spec.check_integer(Some(3)).is_ok());
        assert!(spec.check_integer(None).is_ok());
        assert!(spec.check_integer(Some(0)).is_err());
    }

    #[test]
    fn test_check_shape() {
        assert!(DB.check_shape(Some(&json!("db1"))).is_ok());
        let err = DB.check_shape(Some(&json!(null))).unwrap_err();
        assert!(matches!(err, SinkError::MissingRequiredField { .. }));
        let err = DB.check_shape(Some(&json!(42))).unwrap_err();
        assert!(err.to_string().contains("expected string"), "got: {err}");

        let mode = FieldSpec::optional(
            "catalogType",
            FieldKind::Text,
            FieldFormat::OneOf(&["HIVE", "HADOOP"]),
        );
        assert!(mode.check_shape(Some(&json!("HIVE"))).is_ok());
        assert!(mode.check_shape(Some(&json!("hive"))).is_err());
        assert!(mode.check_shape(None).is_ok());
    }

    #[test]
    fn test_blank_optional_enum_is_absent() {
        let format = FieldSpec::optional(
            "fileFormat",
            FieldKind::Text,
            FieldFormat::OneOf(&["PARQUET", "ORC"]),
        );
        assert!(format.is_absent(&json!("  ")));
        assert!(format.check_shape(Some(&json!(""))).is_ok());
        assert!(format.check_shape(Some(&json!("orc"))).is_err());

        assert!(!DB.is_absent(&json!("")));
        assert!(DB.is_absent(&json!(null)));
    }
}
