//! Layered error definitions
//!
//! Categorized by phase: payload / registry / decode / validation

use thiserror::Error;

/// Unified error type for sink configuration requests
#[derive(Debug, Error)]
pub enum SinkError {
    // ===== Payload Errors =====
    /// Payload is not syntactically valid or not an object
    #[error("payload parse error: {message}")]
    PayloadParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Decode Errors =====
    /// Payload carries no usable `sinkType`
    #[error("missing discriminator: payload has no 'sinkType'")]
    MissingDiscriminator,

    /// No variant is registered under the tag
    #[error("unknown sink type '{tag}'")]
    UnknownSinkType { tag: String },

    /// Field not declared by the resolved variant (strict mode)
    #[error("unrecognized field '{field}'")]
    UnrecognizedField { field: String },

    // ===== Validation Errors =====
    /// Required field absent or blank
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: String },

    /// Present field violates its format constraint
    #[error("invalid format for field '{field}': {reason}")]
    InvalidFieldFormat { field: String, reason: String },

    // ===== Registry Errors =====
    /// Two variants bound to the same tag
    #[error("duplicate discriminator '{tag}'")]
    DuplicateDiscriminator { tag: String },

    /// Process-wide registry already published
    #[error("sink type registry already published")]
    RegistryPublished,

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SinkError {
    /// Create payload parse error
    pub fn payload_parse(message: impl Into<String>) -> Self {
        Self::PayloadParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create unknown sink type error
    pub fn unknown_sink_type(tag: impl Into<String>) -> Self {
        Self::UnknownSinkType { tag: tag.into() }
    }

    /// Create unrecognized field error
    pub fn unrecognized_field(field: impl Into<String>) -> Self {
        Self::UnrecognizedField {
            field: field.into(),
        }
    }

    /// Create missing required field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingRequiredField {
            field: field.into(),
        }
    }

    /// Create invalid field format error
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFieldFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create duplicate discriminator error
    pub fn duplicate_discriminator(tag: impl Into<String>) -> Self {
        Self::DuplicateDiscriminator { tag: tag.into() }
    }

    /// Offending field, if the error is field-addressable
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnrecognizedField { field }
            | Self::MissingRequiredField { field }
            | Self::InvalidFieldFormat { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Stable snake_case name, used as a metric label
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PayloadParse { .. } => "payload_parse",
            Self::MissingDiscriminator => "missing_discriminator",
            Self::UnknownSinkType { .. } => "unknown_sink_type",
            Self::UnrecognizedField { .. } => "unrecognized_field",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidFieldFormat { .. } => "invalid_field_format",
            Self::DuplicateDiscriminator { .. } => "duplicate_discriminator",
            Self::RegistryPublished => "registry_published",
            Self::Io(_) => "io",
        }
    }
}
