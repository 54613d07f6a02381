//! # Sink Decoder
//!
//! Turns raw sink-configuration payloads into validated, strongly-typed
//! [`SinkRequest`]s.
//!
//! Responsibilities:
//! - Parse JSON/TOML payloads
//! - Resolve the `sinkType` discriminator through the registry
//! - Shape-check, decode and validate against the resolved variant
//!
//! # Example
//!
//! ```
//! use sink_decoder::{PayloadFormat, SinkConfigLoader};
//!
//! let payload = r#"{
//!     "sinkType": "DLC_ICEBERG",
//!     "inlongGroupId": "g1",
//!     "inlongStreamId": "s1",
//!     "sinkName": "dlc_sink",
//!     "catalogUri": "thrift://host:9083",
//!     "warehouse": "s3://bucket/wh",
//!     "dbName": "db1",
//!     "tableName": "t1"
//! }"#;
//!
//! let request = SinkConfigLoader::new().load_from_str(payload, PayloadFormat::Json).unwrap();
//! assert_eq!(request.target(), "db1.t1");
//! ```

mod config;
mod decoder;
mod parser;

pub use config::{DecoderConfig, Strictness};
pub use decoder::{DecodeStage, SinkDecoder, DISCRIMINATOR};
pub use parser::PayloadFormat;

use contracts::{SinkError, SinkRequest, Validated};
use sink_registry::SinkTypeRegistry;
use std::path::Path;

/// Loads sink-configuration payloads from files or strings
#[derive(Debug, Clone, Copy)]
pub struct SinkConfigLoader<'r> {
    decoder: SinkDecoder<'r>,
}

impl SinkConfigLoader<'static> {
    /// Loader over the process-wide registry, rejecting unknown fields
    pub fn new() -> Self {
        Self {
            decoder: SinkDecoder::new(sink_registry::global()),
        }
    }
}

impl Default for SinkConfigLoader<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> SinkConfigLoader<'r> {
    /// Loader over a given registry and policy
    pub fn with_registry(registry: &'r SinkTypeRegistry, strictness: Strictness) -> Self {
        Self {
            decoder: SinkDecoder::new(registry).with_strictness(strictness),
        }
    }

    pub fn decoder(&self) -> &SinkDecoder<'r> {
        &self.decoder
    }

    /// Load a payload file
    ///
    /// Format is detected from the extension (.json / .toml).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse, decode or validation failure
    pub fn load_from_path(&self, path: &Path) -> Result<Validated<SinkRequest>, SinkError> {
        let format = Self::detect_format(path)?;
        let content = std::fs::read_to_string(path)?;
        self.load_from_str(&content, format)
    }

    /// Load a payload string
    ///
    /// # Errors
    /// - Parse failure
    /// - Decode or validation failure
    pub fn load_from_str(
        &self,
        content: &str,
        format: PayloadFormat,
    ) -> Result<Validated<SinkRequest>, SinkError> {
        let payload = parser::parse(content, format)?;
        self.decoder.decode(payload)
    }

    /// Serialize a request to its JSON wire form
    pub fn to_json(request: &SinkRequest) -> Result<String, SinkError> {
        serde_json::to_string_pretty(request).map_err(|e| SinkError::PayloadParse {
            message: format!("JSON serialize error: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Serialize a request to TOML
    pub fn to_toml(request: &SinkRequest) -> Result<String, SinkError> {
        toml::to_string_pretty(request).map_err(|e| SinkError::PayloadParse {
            message: format!("TOML serialize error: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn detect_format(path: &Path) -> Result<PayloadFormat, SinkError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            SinkError::payload_parse("cannot determine payload format from extension")
        })?;

        PayloadFormat::from_extension(ext)
            .ok_or_else(|| SinkError::payload_parse(format!("unsupported payload format: .{ext}")))
    }
}
