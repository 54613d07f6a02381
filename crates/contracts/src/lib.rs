//! # Contracts
//!
//! Sink configuration contracts shared by the registry, the decoder and
//! provisioning code. Downstream crates depend on this crate only; reverse
//! dependencies are prohibited.
//!
//! ## Shape
//! - [`SinkType`]: the discriminator tag
//! - [`SinkRequestBase`] + [`SinkRequestContract`]: what every variant exposes
//! - [`variants`]: one request struct per sink technology
//! - [`SinkRequest`]: the closed sum over all variants
//! - [`FieldSpec`]: per-field rule tables driving decoding and validation

mod base;
mod error;
mod field;
mod request;
mod sink_type;
pub mod variants;

pub use base::*;
pub use error::*;
pub use field::*;
pub use request::SinkRequest;
pub use sink_type::SinkType;
pub use variants::*;
