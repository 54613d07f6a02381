//! Sink 请求基础契约
//!
//! 所有 sink 请求共享的字段，以及每个变体实现的能力 trait。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Deref;

use crate::field::{FieldFormat, FieldKind, FieldSpec};
use crate::{SinkError, SinkRequest, SinkType};

const GROUP_ID: FieldSpec = FieldSpec::required("inlongGroupId", FieldKind::Text, FieldFormat::Any);
const STREAM_ID: FieldSpec =
    FieldSpec::required("inlongStreamId", FieldKind::Text, FieldFormat::Any);
const SINK_NAME: FieldSpec =
    FieldSpec::required("sinkName", FieldKind::Text, FieldFormat::Identifier);
const DISPLAY_NAME: FieldSpec =
    FieldSpec::optional("displayName", FieldKind::Text, FieldFormat::Any);
const DESCRIPTION: FieldSpec =
    FieldSpec::optional("description", FieldKind::Text, FieldFormat::Any);
const ENABLE_CREATE_RESOURCE: FieldSpec =
    FieldSpec::optional("enableCreateResource", FieldKind::Boolean, FieldFormat::Any);
const DATA_NODE_NAME: FieldSpec =
    FieldSpec::optional("dataNodeName", FieldKind::Text, FieldFormat::Any);
const PROPERTIES: FieldSpec =
    FieldSpec::optional("properties", FieldKind::TextMap, FieldFormat::Any);
const SINK_FIELD_LIST: FieldSpec =
    FieldSpec::optional("sinkFieldList", FieldKind::FieldList, FieldFormat::Any);

/// 除 `sinkType` 外每个 sink 请求都携带的字段
pub const BASE_FIELDS: &[FieldSpec] = &[
    GROUP_ID,
    STREAM_ID,
    SINK_NAME,
    DISPLAY_NAME,
    DESCRIPTION,
    ENABLE_CREATE_RESOURCE,
    DATA_NODE_NAME,
    PROPERTIES,
    SINK_FIELD_LIST,
];

const FIELD_NAME: FieldSpec =
    FieldSpec::required("fieldName", FieldKind::Text, FieldFormat::Identifier);
const FIELD_TYPE: FieldSpec = FieldSpec::required("fieldType", FieldKind::Text, FieldFormat::Any);
const FIELD_COMMENT: FieldSpec =
    FieldSpec::optional("fieldComment", FieldKind::Text, FieldFormat::Any);
const SOURCE_FIELD_NAME: FieldSpec =
    FieldSpec::optional("sourceFieldName", FieldKind::Text, FieldFormat::Any);
const SOURCE_FIELD_TYPE: FieldSpec =
    FieldSpec::optional("sourceFieldType", FieldKind::Text, FieldFormat::Any);

/// 所有 sink 请求共享的身份与归属信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkRequestBase {
    /// 所属数据集成 group
    pub inlong_group_id: String,

    /// 所属数据流
    pub inlong_stream_id: String,

    /// Sink 标识，在 stream 内唯一
    pub sink_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// 是否允许自动创建目标表/topic/索引
    #[serde(default = "default_enable_create_resource")]
    pub enable_create_resource: bool,

    /// 预先注册、保存连接信息的数据节点
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_node_name: Option<String>,

    /// 额外的技术相关属性
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    /// 源数据流到 sink 的字段映射
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sink_field_list: Vec<SinkField>,
}

fn default_enable_create_resource() -> bool {
    true
}

impl SinkRequestBase {
    /// 可选字段全部取默认值的最小 base
    pub fn new(
        inlong_group_id: impl Into<String>,
        inlong_stream_id: impl Into<String>,
        sink_name: impl Into<String>,
    ) -> Self {
        Self {
            inlong_group_id: inlong_group_id.into(),
            inlong_stream_id: inlong_stream_id.into(),
            sink_name: sink_name.into(),
            display_name: None,
            description: None,
            enable_create_resource: default_enable_create_resource(),
            data_node_name: None,
            properties: BTreeMap::new(),
            sink_field_list: Vec::new(),
        }
    }

    /// 展示名，缺省时回退到 sink 名
    pub fn display_name(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.sink_name)
    }

    /// 校验共享字段
    pub fn validate(&self) -> Result<(), SinkError> {
        GROUP_ID.check_text(Some(&self.inlong_group_id))?;
        STREAM_ID.check_text(Some(&self.inlong_stream_id))?;
        SINK_NAME.check_text(Some(&self.sink_name))?;

        if self.properties.keys().any(|key| key.trim().is_empty()) {
            return Err(SinkError::invalid_format(
                PROPERTIES.name,
                "property keys must not be blank",
            ));
        }

        for (idx, field) in self.sink_field_list.iter().enumerate() {
            field.validate(idx)?;
        }
        Ok(())
    }
}

/// 单个源字段到 sink 列的映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SinkField {
    pub field_name: String,
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_field_type: Option<String>,
}

impl SinkField {
    /// 承载条目列表的 payload 字段名
    pub const LIST: &'static str = SINK_FIELD_LIST.name;

    /// 单个 `sinkFieldList` 条目的字段表
    pub const FIELDS: &'static [FieldSpec] = &[
        FIELD_NAME,
        FIELD_TYPE,
        FIELD_COMMENT,
        SOURCE_FIELD_NAME,
        SOURCE_FIELD_TYPE,
    ];

    /// 按 wire 名查找条目字段
    pub fn field(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|spec| spec.name == name)
    }

    /// 条目字段的完整路径，e.g. `sinkFieldList[2].fieldName`
    pub fn path(idx: usize, field: &str) -> String {
        format!("{}[{idx}].{field}", Self::LIST)
    }

    /// 对第 `idx` 个原始条目做结构校验
    ///
    /// 未知 key 由调用方按 strictness 处理。
    pub fn check_shape(idx: usize, entry: &Map<String, Value>) -> Result<(), SinkError> {
        for spec in Self::FIELDS {
            spec.check_shape(entry.get(spec.name))
                .map_err(|err| locate(idx, err))?;
        }
        Ok(())
    }

    fn validate(&self, idx: usize) -> Result<(), SinkError> {
        FIELD_NAME
            .check_text(Some(&self.field_name))
            .map_err(|err| locate(idx, err))?;
        FIELD_TYPE
            .check_text(Some(&self.field_type))
            .map_err(|err| locate(idx, err))?;
        Ok(())
    }
}

/// 把条目内字段的错误改写为带列表位置的路径
fn locate(idx: usize, err: SinkError) -> SinkError {
    match err {
        SinkError::MissingRequiredField { field } => {
            SinkError::missing_field(SinkField::path(idx, &field))
        }
        SinkError::InvalidFieldFormat { field, reason } => {
            SinkError::invalid_format(SinkField::path(idx, &field), reason)
        }
        SinkError::UnrecognizedField { field } => {
            SinkError::unrecognized_field(SinkField::path(idx, &field))
        }
        other => other,
    }
}

/// Capability set every sink request exposes
pub trait SinkRequestContract {
    /// Sink-type tag; fixed by the variant
    fn discriminator(&self) -> SinkType;

    /// Shared identity and ownership fields
    fn base(&self) -> &SinkRequestBase;

    /// Sink identifier
    fn identity(&self) -> &str {
        &self.base().sink_name
    }

    /// Whole-object validation: shared fields, variant fields, then
    /// cross-field rules
    ///
    /// # Errors
    /// The first violation in field-table order
    fn validate(&self) -> Result<(), SinkError>;
}

/// A concrete, registrable sink-request shape
pub trait SinkVariant:
    SinkRequestContract + Serialize + DeserializeOwned + Into<SinkRequest> + Sized + 'static
{
    /// Tag this variant is bound to
    const SINK_TYPE: SinkType;

    /// Human-readable technology name
    const LABEL: &'static str;

    /// Variant-specific fields, excluding [`BASE_FIELDS`]
    fn fields() -> &'static [FieldSpec];
}

/// A sink request that passed validation
///
/// Only obtainable through [`Validated::new`], so holding one guarantees
/// `validate()` succeeded. Edits go through `into_inner` and a fresh
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Validated<T>(T);

impl<T: SinkRequestContract> Validated<T> {
    /// Validate and wrap
    pub fn new(request: T) -> Result<Self, SinkError> {
        request.validate()?;
        Ok(Self(request))
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

/// Implement [`SinkRequestContract`] for a variant struct with a `base`
/// field and an inherent `validate_fields` method
macro_rules! impl_sink_contract {
    ($variant:ty) => {
        impl $crate::SinkRequestContract for $variant {
            fn discriminator(&self) -> $crate::SinkType {
                <$variant as $crate::SinkVariant>::SINK_TYPE
            }

            fn base(&self) -> &$crate::SinkRequestBase {
                &self.base
            }

            fn validate(&self) -> Result<(), $crate::SinkError> {
                self.base.validate()?;
                self.validate_fields()
            }
        }
    };
}

pub(crate) use impl_sink_contract;
