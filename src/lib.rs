#[macro_use]
mod macros;

pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod registry;
pub mod sender;
pub mod serializable;

pub use config::DecodeConfig;
pub use error::{ModelError, Result, UnregisteredError};
pub use event::{parse_event, parse_event_str, Event};
pub use message::{join_text, parse_element, Element};
pub use registry::ModelRegistry;
pub use serializable::Serializable;

/// Tracing target for every log line this crate emits.
pub const NAPCAT: &str = "NapCat";
