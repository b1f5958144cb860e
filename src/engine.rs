//! Emission engine
//!
//! Replays a compiled `Plan` against one event and its ambient state,
//! writing exactly one complete JSON value. Rendering is a single
//! synchronous pass; an I/O fault aborts the current record with a
//! propagated error and invalidates nothing — the same plan renders the
//! next record normally.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::ambient::Ambient;
use crate::error::LogplateResult;
use crate::event::LogEvent;
use crate::placeholder::EventField;
use crate::plan::{Binding, ObjectSource, Plan, PlanNode};
use crate::writer::JsonWriter;

/// Per-encoder rendering settings
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Substituted when a string-typed source resolves to nothing.
    /// Empty by default; an empty substitution for MDC/CONTEXT omits the
    /// field instead of writing `""`.
    pub default_field_value: String,
}

/// Replay `plan` against one event, writing one JSON value to `out`.
///
/// The caller owns the record separator (see `JsonEncoder::encode`).
pub fn render<W: Write>(
    plan: &Plan,
    event: &LogEvent,
    ambient: &Ambient,
    options: &RenderOptions,
    out: &mut W,
) -> LogplateResult<()> {
    let mut w = JsonWriter::new(out);
    for node in plan.nodes() {
        match node {
            PlanNode::Literal(text) => w.raw_item(text)?,
            PlanNode::BeginObject { name } => w.begin_object(name.as_deref())?,
            PlanNode::EndObject => w.end_object()?,
            PlanNode::BeginArray { name } => w.begin_array(name.as_deref())?,
            PlanNode::EndArray => w.end_array()?,
            PlanNode::DynamicField { name, binding } => {
                write_field(&mut w, name, binding, event, ambient, options)?
            }
            PlanNode::DynamicObject { name, source } => match source {
                ObjectSource::Event => write_event_object(&mut w, name, event, options)?,
                ObjectSource::Mdc => write_mdc_object(&mut w, name, ambient)?,
            },
        }
    }
    Ok(())
}

fn write_field<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    binding: &Binding,
    event: &LogEvent,
    ambient: &Ambient,
    options: &RenderOptions,
) -> io::Result<()> {
    match binding {
        Binding::Event(field) => write_event_field(w, name, *field, event, options),
        Binding::Mdc(key) => {
            write_mdc_field(w, name, ambient.mdc.get(key).map(String::as_str), options)
        }
        Binding::Context(key) => write_context_field(w, name, ambient.context.get(key)),
        Binding::Environment(var) => {
            let value = ambient
                .environment
                .get(var)
                .map(String::as_str)
                .unwrap_or(&options.default_field_value);
            w.string_field(name, value)
        }
        Binding::System(prop) => {
            let value = ambient
                .system
                .get(prop)
                .map(String::as_str)
                .unwrap_or(&options.default_field_value);
            w.string_field(name, value)
        }
    }
}

fn write_event_field<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    field: EventField,
    event: &LogEvent,
    options: &RenderOptions,
) -> io::Result<()> {
    match field {
        EventField::Level => w.string_field(name, event.level.as_str()),
        EventField::Timestamp => match event.timestamp() {
            Some(ms) => w.i64_field(name, ms),
            None => Ok(()),
        },
        EventField::Date => match event.timestamp().and_then(format_date) {
            Some(date) => w.string_field(name, &date),
            None => Ok(()),
        },
        EventField::Logger => w.string_field(name, &event.logger),
        EventField::Thread => w.string_field(name, &event.thread),
        EventField::Message => w.string_field(name, &event.message),
        EventField::Marker => {
            let value = event
                .marker
                .as_deref()
                .unwrap_or(&options.default_field_value);
            w.string_field(name, value)
        }
        EventField::Caller => {
            if event.caller.is_empty() {
                Ok(())
            } else {
                w.string_field(name, &event.caller_display())
            }
        }
    }
}

/// ISO-8601 with millisecond precision, UTC
fn format_date(ms: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Missing keys substitute the default field value; an empty result omits
/// the field entirely rather than writing `""`.
fn write_mdc_field<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    value: Option<&str>,
    options: &RenderOptions,
) -> io::Result<()> {
    let value = value.unwrap_or(&options.default_field_value);
    if value.is_empty() {
        return Ok(());
    }
    w.string_field(name, value)
}

/// Context values keep their native JSON type: numbers stay numbers (and
/// keep their lexical form), booleans stay booleans, strings follow the
/// empty-string-omission rule, null/missing omit the field, anything else
/// is stringified.
fn write_context_field<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    value: Option<&Value>,
) -> io::Result<()> {
    match value {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Number(n)) => w.raw_number_field(name, &n.to_string()),
        Some(Value::Bool(b)) => w.bool_field(name, *b),
        Some(Value::String(s)) => {
            if s.is_empty() {
                Ok(())
            } else {
                w.string_field(name, s)
            }
        }
        Some(other) => w.string_field(name, &other.to_string()),
    }
}

/// `#{EVENT}` expansion: fixed sub-field order, each under its own
/// omission rule. The object itself is always emitted.
fn write_event_object<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    event: &LogEvent,
    options: &RenderOptions,
) -> io::Result<()> {
    w.begin_object(Some(name))?;
    write_event_field(w, "level", EventField::Level, event, options)?;
    write_event_field(w, "date", EventField::Date, event, options)?;
    write_event_field(w, "logger", EventField::Logger, event, options)?;
    write_event_field(w, "thread", EventField::Thread, event, options)?;
    write_event_field(w, "message", EventField::Message, event, options)?;
    write_event_field(w, "marker", EventField::Marker, event, options)?;
    write_event_field(w, "caller", EventField::Caller, event, options)?;
    w.end_object()
}

/// `#{MDC}` expansion: one string member per non-empty entry, in the
/// map's iteration order. An empty MDC still renders `{}`.
fn write_mdc_object<W: Write>(
    w: &mut JsonWriter<W>,
    name: &str,
    ambient: &Ambient,
) -> io::Result<()> {
    w.begin_object(Some(name))?;
    for (key, value) in &ambient.mdc {
        if !value.is_empty() {
            w.string_field(key, value)?;
        }
    }
    w.end_object()
}
