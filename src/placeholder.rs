//! Placeholder-expression grammar
//!
//! Template string values may embed `#{SOURCE}` / `#{SOURCE:KEY}`
//! expressions, where SOURCE matches `[0-9a-zA-Z_-]*` and KEY matches
//! `[0-9a-zA-Z_.-]*`. This module scans a string value and decides what a
//! template field containing it compiles to.
//!
//! The scan honors only the first match that decides anything: a string
//! with a recognized placeholder is replaced wholesale by that single
//! dynamic value. Matches with an unrecognized SOURCE keyword (or an
//! unrecognized EVENT key) do not decide — scanning continues, and if
//! nothing decides the string survives verbatim as a literal.

use std::sync::OnceLock;

use regex::Regex;

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"#\{([0-9a-zA-Z_-]*)(?::([0-9a-zA-Z_.-]*))?\}").expect("valid pattern")
    })
}

/// The fixed vocabulary of variable sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Event,
    Mdc,
    Context,
    Environment,
    System,
}

impl Source {
    /// Map a SOURCE keyword to its variant; `None` for anything outside
    /// the vocabulary.
    pub fn from_keyword(keyword: &str) -> Option<Source> {
        match keyword {
            "EVENT" => Some(Source::Event),
            "MDC" => Some(Source::Mdc),
            "CONTEXT" => Some(Source::Context),
            "ENVIRONMENT" => Some(Source::Environment),
            "SYSTEM" => Some(Source::System),
            _ => None,
        }
    }
}

/// Keyed sub-fields of `#{EVENT:...}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Level,
    Timestamp,
    Date,
    Logger,
    Thread,
    Message,
    Marker,
    Caller,
}

impl EventField {
    pub fn from_key(key: &str) -> Option<EventField> {
        match key {
            "level" => Some(EventField::Level),
            "timestamp" => Some(EventField::Timestamp),
            "date" => Some(EventField::Date),
            "logger" => Some(EventField::Logger),
            "thread" => Some(EventField::Thread),
            "message" => Some(EventField::Message),
            "marker" => Some(EventField::Marker),
            "caller" => Some(EventField::Caller),
            _ => None,
        }
    }
}

/// What a template string value compiles to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No deciding placeholder; the string is emitted as a literal
    Verbatim,
    /// Unsupported no-key form (CONTEXT/ENVIRONMENT/SYSTEM); the template
    /// member is dropped without producing a node
    Drop,
    /// `#{EVENT:key}`
    Event(EventField),
    /// `#{EVENT}` — whole-event object expansion
    EventObject,
    /// `#{MDC:key}`
    Mdc(String),
    /// `#{MDC}` — one member per non-empty diagnostic-context entry
    MdcObject,
    /// `#{CONTEXT:key}`
    Context(String),
    /// `#{ENVIRONMENT:name}`
    Environment(String),
    /// `#{SYSTEM:name}`
    System(String),
}

/// Scan a template string value and classify it.
///
/// The first match whose SOURCE (and, for EVENT, key) is recognized decides
/// the outcome; unrecognized matches are skipped. A recognized no-key
/// CONTEXT/ENVIRONMENT/SYSTEM match decides too — it drops the member.
pub fn resolve(value: &str) -> Resolution {
    if !value.contains("#{") {
        return Resolution::Verbatim;
    }

    for caps in variable_pattern().captures_iter(value) {
        let keyword = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        let key = caps.get(2).map(|m| m.as_str());

        let source = match Source::from_keyword(keyword) {
            Some(source) => source,
            None => continue,
        };

        match source {
            Source::Event => match key {
                None => return Resolution::EventObject,
                Some(k) => match EventField::from_key(k) {
                    Some(field) => return Resolution::Event(field),
                    // Unrecognized event key: the next match may still decide.
                    None => continue,
                },
            },
            Source::Mdc => {
                return match key {
                    None => Resolution::MdcObject,
                    Some(k) => Resolution::Mdc(k.to_string()),
                }
            }
            Source::Context => {
                return match key {
                    Some(k) => Resolution::Context(k.to_string()),
                    None => Resolution::Drop,
                }
            }
            Source::Environment => {
                return match key {
                    Some(k) => Resolution::Environment(k.to_string()),
                    None => Resolution::Drop,
                }
            }
            Source::System => {
                return match key {
                    Some(k) => Resolution::System(k.to_string()),
                    None => Resolution::Drop,
                }
            }
        }
    }

    Resolution::Verbatim
}
