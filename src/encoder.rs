//! Encoder facade
//!
//! `JsonEncoder` owns a compiled plan plus the configuration surface
//! (default field value, immediate flush) and turns one event into one
//! output line. The template is compiled exactly once, when the encoder is
//! built; `encode` only replays.

use std::io::Write;

use crate::ambient::Ambient;
use crate::compiler;
use crate::config::EncoderConfig;
use crate::engine::{render, RenderOptions};
use crate::error::LogplateResult;
use crate::event::LogEvent;
use crate::plan::Plan;

/// One-JSON-object-per-line encoder for log events
///
/// Immutable after construction; concurrent `encode` calls against
/// distinct writers need no synchronization.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    plan: Plan,
    options: RenderOptions,
    immediate_flush: bool,
}

impl JsonEncoder {
    /// Compile `template` with default settings.
    pub fn new(template: &str) -> LogplateResult<Self> {
        Ok(Self {
            plan: compiler::compile(template)?,
            options: RenderOptions::default(),
            immediate_flush: true,
        })
    }

    /// Build an encoder from a loaded configuration. A missing layout
    /// yields the empty plan: the encoder emits nothing.
    pub fn from_config(config: &EncoderConfig) -> LogplateResult<Self> {
        Ok(Self {
            plan: compiler::compile(config.layout.as_deref().unwrap_or_default())?,
            options: RenderOptions {
                default_field_value: config.default_field_value.clone(),
            },
            immediate_flush: config.immediate_flush,
        })
    }

    pub fn with_default_field_value(mut self, value: impl Into<String>) -> Self {
        self.options.default_field_value = value.into();
        self
    }

    pub fn with_immediate_flush(mut self, immediate_flush: bool) -> Self {
        self.immediate_flush = immediate_flush;
        self
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Render one record followed by its newline separator.
    ///
    /// An empty plan writes nothing at all — no empty line. I/O faults
    /// propagate; the encoder stays usable for the next record.
    pub fn encode<W: Write>(
        &self,
        event: &LogEvent,
        ambient: &Ambient,
        out: &mut W,
    ) -> LogplateResult<()> {
        if self.plan.is_empty() {
            return Ok(());
        }
        render(&self.plan, event, ambient, &self.options, out)?;
        out.write_all(b"\n")?;
        if self.immediate_flush {
            out.flush()?;
        }
        Ok(())
    }

    /// Convenience for tests and the CLI: encode into a `String`.
    pub fn encode_to_string(&self, event: &LogEvent, ambient: &Ambient) -> LogplateResult<String> {
        let mut out = Vec::new();
        self.encode(event, ambient, &mut out)?;
        Ok(String::from_utf8(out).unwrap_or_default())
    }
}
