//! Polymorphic decoder
//!
//! Discriminator-first, two-phase decoding:
//!
//! 1. `Reading`: take `sinkType` off the payload, nothing else
//! 2. `Resolved`: resolve the tag, shape-check the remaining fields against
//!    the variant's field table, decode into the variant struct
//! 3. `Validated`: run the variant's whole-object validation
//!
//! Any failure rejects the payload; nothing partially built escapes.

use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, instrument, warn};

use contracts::{SinkError, SinkField, SinkRequest, SinkRequestContract, Validated};
use sink_registry::{SinkTypeRegistry, VariantDescriptor};

use crate::config::Strictness;

/// Payload key carrying the sink-type tag
pub const DISCRIMINATOR: &str = "sinkType";

/// Decoder state a payload was in when it was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    Reading,
    Resolved,
    Validated,
}

impl DecodeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeStage::Reading => "reading",
            DecodeStage::Resolved => "resolved",
            DecodeStage::Validated => "validated",
        }
    }
}

impl fmt::Display for DecodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why and where a payload was rejected
struct Rejection {
    stage: DecodeStage,
    sink_type: Option<String>,
    error: SinkError,
}

/// Decodes raw payloads into validated sink requests
///
/// Holds only a shared registry reference and a policy, so one decoder can
/// serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct SinkDecoder<'r> {
    registry: &'r SinkTypeRegistry,
    strictness: Strictness,
}

impl<'r> SinkDecoder<'r> {
    /// Decoder rejecting unknown fields
    pub fn new(registry: &'r SinkTypeRegistry) -> Self {
        Self {
            registry,
            strictness: Strictness::default(),
        }
    }

    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    pub fn registry(&self) -> &'r SinkTypeRegistry {
        self.registry
    }

    /// Decode and validate one payload
    ///
    /// # Errors
    /// - `PayloadParse`: payload is not an object
    /// - `MissingDiscriminator` / `UnknownSinkType`
    /// - `UnrecognizedField` (strict mode)
    /// - `MissingRequiredField` / `InvalidFieldFormat`
    #[instrument(name = "sink_decode", skip_all, fields(strictness = ?self.strictness))]
    pub fn decode(&self, payload: Value) -> Result<Validated<SinkRequest>, SinkError> {
        match self.run(payload) {
            Ok(request) => {
                let sink_type = request.discriminator();
                debug!(
                    sink_type = %sink_type,
                    sink_name = %request.identity(),
                    "sink request validated"
                );
                observability::record_decode_accepted(sink_type.as_str());
                Ok(request)
            }
            Err(rejection) => {
                warn!(
                    stage = %rejection.stage,
                    sink_type = rejection.sink_type.as_deref().unwrap_or("-"),
                    field = rejection.error.field().unwrap_or("-"),
                    error = %rejection.error,
                    "sink request rejected"
                );
                observability::record_decode_rejected(
                    rejection.sink_type.as_deref(),
                    rejection.stage.as_str(),
                    rejection.error.kind(),
                );
                Err(rejection.error)
            }
        }
    }

    fn run(&self, payload: Value) -> Result<Validated<SinkRequest>, Rejection> {
        let (tag, fields) = read_discriminator(payload).map_err(|error| Rejection {
            stage: DecodeStage::Reading,
            sink_type: None,
            error,
        })?;

        let resolved = |error| Rejection {
            stage: DecodeStage::Resolved,
            sink_type: Some(tag.clone()),
            error,
        };
        let descriptor = self.registry.resolve(&tag).map_err(resolved)?;
        let fields = self.shape(descriptor, fields).map_err(resolved)?;
        let request = descriptor.decode(fields).map_err(resolved)?;
        debug_assert_eq!(request.discriminator(), descriptor.sink_type());

        Validated::new(request).map_err(|error| Rejection {
            stage: DecodeStage::Validated,
            sink_type: Some(tag.clone()),
            error,
        })
    }

    /// Structural pass over the field table
    fn shape(
        &self,
        descriptor: &VariantDescriptor,
        mut fields: Map<String, Value>,
    ) -> Result<Map<String, Value>, SinkError> {
        self.strip_unknown(
            &mut fields,
            |key| descriptor.field(key).is_some(),
            |key| key.to_string(),
        )?;

        for spec in descriptor.fields() {
            spec.check_shape(fields.get(spec.name))?;
        }
        self.shape_field_list(&mut fields)?;

        // null and blank optional text mean absent; let serde defaults apply
        fields.retain(|name, value| {
            descriptor
                .field(name)
                .is_some_and(|spec| !spec.is_absent(value))
        });
        Ok(fields)
    }

    /// Entry-by-entry pass over `sinkFieldList`; errors name
    /// `sinkFieldList[i].<field>`
    fn shape_field_list(&self, fields: &mut Map<String, Value>) -> Result<(), SinkError> {
        let Some(Value::Array(entries)) = fields.get_mut(SinkField::LIST) else {
            return Ok(());
        };

        for (idx, entry) in entries.iter_mut().enumerate() {
            // kind already checked, every entry is an object
            let Value::Object(entry) = entry else {
                continue;
            };
            self.strip_unknown(
                entry,
                |key| SinkField::field(key).is_some(),
                |key| SinkField::path(idx, key),
            )?;
            SinkField::check_shape(idx, entry)?;
            entry.retain(|name, value| {
                SinkField::field(name).is_some_and(|spec| !spec.is_absent(value))
            });
        }
        Ok(())
    }

    /// Apply the unknown-field policy to one object
    fn strip_unknown(
        &self,
        fields: &mut Map<String, Value>,
        known: impl Fn(&str) -> bool,
        path: impl Fn(&str) -> String,
    ) -> Result<(), SinkError> {
        let unknown: Vec<String> = fields
            .keys()
            .filter(|key| !known(key.as_str()))
            .cloned()
            .collect();

        let Some(first) = unknown.first() else {
            return Ok(());
        };

        match self.strictness {
            Strictness::Reject => Err(SinkError::unrecognized_field(path(first))),
            Strictness::Ignore => {
                for key in &unknown {
                    debug!(field = %path(key), "ignoring unknown field");
                    fields.remove(key);
                }
                Ok(())
            }
        }
    }
}

/// Take the tag off the payload without touching the rest
fn read_discriminator(payload: Value) -> Result<(String, Map<String, Value>), SinkError> {
    let Value::Object(mut fields) = payload else {
        return Err(SinkError::payload_parse("payload must be an object"));
    };

    match fields.remove(DISCRIMINATOR) {
        Some(Value::String(tag)) if !tag.trim().is_empty() => Ok((tag, fields)),
        _ => Err(SinkError::MissingDiscriminator),
    }
}
