//! Command implementations.

mod info;
mod types;
mod validate;

pub use info::run_info;
pub use types::run_types;
pub use validate::run_validate;

use sink_decoder::{DecoderConfig, SinkConfigLoader, Strictness};

/// Loader over the published registry; `--lenient` overrides the config
fn loader(config: &DecoderConfig, lenient: bool) -> SinkConfigLoader<'static> {
    let strictness = if lenient {
        Strictness::Ignore
    } else {
        config.unknown_fields
    };
    SinkConfigLoader::with_registry(sink_registry::global(), strictness)
}
