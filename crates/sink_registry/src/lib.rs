//! # Sink Registry
//!
//! Process-wide mapping from sink-type tag to variant descriptor.
//!
//! Responsibilities:
//! - Register variant descriptors at startup, rejecting duplicate tags
//! - Freeze the mapping for lock-free reads
//! - Resolve tags during decoding
//!
//! # Example
//!
//! ```
//! use contracts::{KafkaSinkRequest, SinkType};
//! use sink_registry::{SinkTypeRegistry, VariantDescriptor};
//!
//! let mut builder = SinkTypeRegistry::builder();
//! builder.register(VariantDescriptor::of::<KafkaSinkRequest>()).unwrap();
//! let registry = builder.build();
//!
//! assert_eq!(registry.resolve("KAFKA").unwrap().sink_type(), SinkType::Kafka);
//! ```

mod descriptor;
mod registry;

pub use descriptor::{builtin_descriptor, builtin_descriptors, VariantDescriptor};
pub use registry::{global, install, RegistryBuilder, SinkTypeRegistry};
