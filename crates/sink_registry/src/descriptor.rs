//! VariantDescriptor - what the registry stores per tag

use serde_json::{Map, Value};
use std::fmt;

use contracts::{FieldSpec, SinkError, SinkRequest, SinkType, SinkVariant, BASE_FIELDS};

type DecodeFn = fn(Map<String, Value>) -> Result<SinkRequest, SinkError>;

/// Shape descriptor of one sink-request variant
///
/// Carries the field table and the typed decode entry point. Built from a
/// [`SinkVariant`] so tag, fields and decode target always agree.
#[derive(Clone, Copy)]
pub struct VariantDescriptor {
    sink_type: SinkType,
    label: &'static str,
    fields: &'static [FieldSpec],
    decode: DecodeFn,
}

impl VariantDescriptor {
    /// Descriptor of variant `T`
    pub fn of<T: SinkVariant>() -> Self {
        Self {
            sink_type: T::SINK_TYPE,
            label: T::LABEL,
            fields: T::fields(),
            decode: decode_variant::<T>,
        }
    }

    pub fn sink_type(&self) -> SinkType {
        self.sink_type
    }

    /// Wire tag
    pub fn tag(&self) -> &'static str {
        self.sink_type.as_str()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Variant-specific fields only
    pub fn variant_fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Base fields followed by variant fields
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        BASE_FIELDS.iter().chain(self.fields.iter())
    }

    /// Look up a field by wire name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().find(|spec| spec.name == name)
    }

    /// Typed decode of an already shape-checked field map
    ///
    /// Performs no validation; the decoder runs `validate()` afterwards.
    pub fn decode(&self, fields: Map<String, Value>) -> Result<SinkRequest, SinkError> {
        (self.decode)(fields)
    }
}

fn decode_variant<T: SinkVariant>(fields: Map<String, Value>) -> Result<SinkRequest, SinkError> {
    serde_json::from_value::<T>(Value::Object(fields))
        .map(Into::into)
        .map_err(|e| SinkError::PayloadParse {
            message: format!("{} payload decode error: {e}", T::SINK_TYPE),
            source: Some(Box::new(e)),
        })
}

impl PartialEq for VariantDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.sink_type == other.sink_type
            && self.label == other.label
            && self.fields == other.fields
    }
}

impl Eq for VariantDescriptor {}

impl fmt::Debug for VariantDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantDescriptor")
            .field("sink_type", &self.sink_type)
            .field("label", &self.label)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Descriptors of every built-in variant
pub fn builtin_descriptors() -> [VariantDescriptor; 6] {
    use contracts::variants::*;

    [
        VariantDescriptor::of::<ClickHouseSinkRequest>(),
        VariantDescriptor::of::<DlcIcebergSinkRequest>(),
        VariantDescriptor::of::<ElasticsearchSinkRequest>(),
        VariantDescriptor::of::<HiveSinkRequest>(),
        VariantDescriptor::of::<IcebergSinkRequest>(),
        VariantDescriptor::of::<KafkaSinkRequest>(),
    ]
}

/// Built-in descriptor for a sink type
pub fn builtin_descriptor(sink_type: SinkType) -> VariantDescriptor {
    use contracts::variants::*;

    match sink_type {
        SinkType::Iceberg => VariantDescriptor::of::<IcebergSinkRequest>(),
        SinkType::DlcIceberg => VariantDescriptor::of::<DlcIcebergSinkRequest>(),
        SinkType::Kafka => VariantDescriptor::of::<KafkaSinkRequest>(),
        SinkType::Hive => VariantDescriptor::of::<HiveSinkRequest>(),
        SinkType::Clickhouse => VariantDescriptor::of::<ClickHouseSinkRequest>(),
        SinkType::Elasticsearch => VariantDescriptor::of::<ElasticsearchSinkRequest>(),
    }
}
