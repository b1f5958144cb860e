//! logplate - JSON template compiler and emission engine for structured logs
//!
//! A JSON layout is compiled once into a replayable plan of literal runs
//! and dynamic field references; each log event then renders as one JSON
//! line without re-parsing placeholder syntax. Placeholders (`#{SOURCE}` /
//! `#{SOURCE:KEY}`) resolve against the event itself, the diagnostic
//! context, a shared context store, environment variables, and system
//! properties.

pub mod ambient;
pub mod compiler;
pub mod config;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod event;
pub mod placeholder;
pub mod plan;
pub mod writer;

// Re-exports for convenience
pub use ambient::Ambient;
pub use compiler::{compile, Template};
pub use config::EncoderConfig;
pub use encoder::JsonEncoder;
pub use engine::{render, RenderOptions};
pub use error::{LogplateError, LogplateResult};
pub use event::{CallerFrame, Level, LogEvent};
pub use placeholder::{EventField, Resolution, Source};
pub use plan::{Binding, ObjectSource, Plan, PlanNode};
