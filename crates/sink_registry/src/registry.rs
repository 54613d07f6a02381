//! Sink-type registry
//!
//! Populated through [`RegistryBuilder`] during startup, then frozen into a
//! [`SinkTypeRegistry`] that has no mutating operations.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use contracts::{SinkError, SinkType};
use tracing::{debug, info};

use crate::descriptor::{builtin_descriptor, builtin_descriptors, VariantDescriptor};

static GLOBAL: OnceLock<SinkTypeRegistry> = OnceLock::new();

/// Mutable registration phase
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: BTreeMap<&'static str, VariantDescriptor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a descriptor to its tag
    ///
    /// # Errors
    /// `DuplicateDiscriminator` if the tag is already bound; the builder is
    /// left unchanged.
    pub fn register(&mut self, descriptor: VariantDescriptor) -> Result<&mut Self, SinkError> {
        match self.entries.entry(descriptor.tag()) {
            Entry::Occupied(_) => Err(SinkError::duplicate_discriminator(descriptor.tag())),
            Entry::Vacant(slot) => {
                debug!(sink_type = %descriptor.tag(), fields = descriptor.variant_fields().len(), "sink type registered");
                slot.insert(descriptor);
                Ok(self)
            }
        }
    }

    /// Register several descriptors, all or nothing
    ///
    /// # Errors
    /// `DuplicateDiscriminator` on the first clash, against either the
    /// existing entries or an earlier item of `descriptors`; nothing from
    /// the batch is kept.
    pub fn register_all(
        &mut self,
        descriptors: impl IntoIterator<Item = VariantDescriptor>,
    ) -> Result<&mut Self, SinkError> {
        let mut staged = self.entries.clone();
        for descriptor in descriptors {
            match staged.entry(descriptor.tag()) {
                Entry::Occupied(_) => {
                    return Err(SinkError::duplicate_discriminator(descriptor.tag()))
                }
                Entry::Vacant(slot) => {
                    slot.insert(descriptor);
                }
            }
        }
        self.entries = staged;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the registry for reads
    pub fn build(self) -> SinkTypeRegistry {
        SinkTypeRegistry {
            entries: self.entries,
        }
    }
}

/// Frozen tag → descriptor mapping
///
/// Read-only, so shared references can be handed to any number of threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkTypeRegistry {
    entries: BTreeMap<&'static str, VariantDescriptor>,
}

impl SinkTypeRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with every built-in variant
    pub fn builtin() -> Self {
        let entries = builtin_descriptors()
            .into_iter()
            .map(|descriptor| (descriptor.tag(), descriptor))
            .collect();
        Self { entries }
    }

    /// Registry with only the given built-in sink types
    ///
    /// # Errors
    /// `DuplicateDiscriminator` if a sink type is listed twice
    pub fn with_sink_types(
        sink_types: impl IntoIterator<Item = SinkType>,
    ) -> Result<Self, SinkError> {
        let mut builder = RegistryBuilder::new();
        builder.register_all(sink_types.into_iter().map(builtin_descriptor))?;
        Ok(builder.build())
    }

    /// Resolve a tag
    ///
    /// # Errors
    /// `UnknownSinkType` naming `tag`
    pub fn resolve(&self, tag: &str) -> Result<&VariantDescriptor, SinkError> {
        self.entries
            .get(tag)
            .ok_or_else(|| SinkError::unknown_sink_type(tag))
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Descriptors in tag order
    pub fn descriptors(&self) -> impl Iterator<Item = &VariantDescriptor> {
        self.entries.values()
    }

    /// Registered tags, sorted
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Publish the process-wide registry
///
/// # Errors
/// `RegistryPublished` if a registry was already installed, including the
/// built-in one installed lazily by [`global`].
pub fn install(registry: SinkTypeRegistry) -> Result<&'static SinkTypeRegistry, SinkError> {
    let count = registry.len();
    GLOBAL
        .set(registry)
        .map_err(|_| SinkError::RegistryPublished)?;
    info!(sink_types = count, "sink type registry published");
    Ok(global())
}

/// The process-wide registry; installs the built-in one if none was
/// published yet
pub fn global() -> &'static SinkTypeRegistry {
    GLOBAL.get_or_init(SinkTypeRegistry::builtin)
}
