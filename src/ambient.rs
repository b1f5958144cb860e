//! Ambient lookups for the emission engine
//!
//! Everything the render step may consult besides the event itself: the
//! per-execution-unit MDC map, the longer-lived shared context store, and
//! snapshots of process environment variables and system properties.
//!
//! The engine never reads process globals directly — callers thread an
//! `Ambient` through every render call, which keeps rendering deterministic
//! and testable without mutating real process state.

use std::collections::BTreeMap;

use serde_json::Value;

/// Read-only ambient state for one render call
///
/// Maps are ordered (`BTreeMap`), so `#{MDC}` expansion iterates entries in
/// key order.
#[derive(Debug, Clone, Default)]
pub struct Ambient {
    /// Diagnostic context: string tags scoped to one logical execution unit
    pub mdc: BTreeMap<String, String>,

    /// Shared context store: longer-lived, dynamically typed values
    pub context: BTreeMap<String, Value>,

    /// Environment variables
    pub environment: BTreeMap<String, String>,

    /// System properties
    pub system: BTreeMap<String, String>,
}

impl Ambient {
    /// Empty ambient state — nothing resolves, every lookup misses
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the real process environment. MDC, context and system
    /// properties start empty; callers fill them in as needed.
    pub fn from_process() -> Self {
        Self {
            environment: std::env::vars().collect(),
            ..Self::default()
        }
    }
}
