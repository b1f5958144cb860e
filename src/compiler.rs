//! Template compiler
//!
//! Parses a JSON template once, at configuration time, and produces the
//! `Plan` replayed per event. Placeholder-free subtrees are pre-serialized
//! into literal runs so the steady-state cost of a render is proportional
//! to the number of dynamic fields, not the size of the template.
//!
//! Containers that hold a dynamic member are broken into structural nodes:
//! separators around dynamic members depend on per-event omission, so they
//! belong to the writer at replay time, not to compiled bytes.
//!
//! Placeholders are resolved at object-field-value positions only. Array
//! elements pass through as literals even when they contain
//! placeholder-like text; objects nested inside arrays still compile
//! normally.

use serde_json::Value;

use crate::error::{LogplateError, LogplateResult};
use crate::placeholder::{self, Resolution};
use crate::plan::{Binding, ObjectSource, Plan, PlanNode};
use crate::writer::escape_json;

/// A raw JSON template, immutable once constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Compile the template into a replayable plan.
    pub fn compile(&self) -> LogplateResult<Plan> {
        compile(&self.text)
    }
}

/// Compile template text into a `Plan`.
///
/// Fails with `TemplateSyntax` when the text is not well-formed JSON. An
/// empty or blank template yields the empty plan, which emits nothing.
pub fn compile(template: &str) -> LogplateResult<Plan> {
    let text = template.trim();
    if text.is_empty() {
        return Ok(Plan::empty());
    }

    let root: Value =
        serde_json::from_str(text).map_err(|e| LogplateError::template_syntax(&e))?;

    let mut builder = PlanBuilder::default();
    builder.element(&root);
    Ok(Plan::from_nodes(builder.nodes))
}

/// Whether the string sits at an object-field-value position (where
/// placeholders resolve) or an array-element position (where they don't)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Member,
    Element,
}

/// Does this subtree contain anything that cannot be pre-serialized?
fn has_dynamic(value: &Value, position: Position) -> bool {
    match value {
        Value::String(s) => {
            position == Position::Member && placeholder::resolve(s) != Resolution::Verbatim
        }
        Value::Object(map) => map.values().any(|v| has_dynamic(v, Position::Member)),
        Value::Array(items) => items.iter().any(|v| has_dynamic(v, Position::Element)),
        _ => false,
    }
}

#[derive(Debug, Default)]
struct PlanBuilder {
    nodes: Vec<PlanNode>,
}

impl PlanBuilder {
    /// Append pre-serialized text, coalescing with a directly preceding
    /// literal run. Consecutive literal nodes are always siblings in the
    /// same container (structural boundaries insert their own nodes), so
    /// the joining comma is static.
    fn push_literal(&mut self, text: String) {
        if let Some(PlanNode::Literal(prev)) = self.nodes.last_mut() {
            prev.push(',');
            prev.push_str(&text);
        } else {
            self.nodes.push(PlanNode::Literal(text));
        }
    }

    fn element(&mut self, value: &Value) {
        if !has_dynamic(value, Position::Element) {
            self.push_literal(value.to_string());
            return;
        }
        match value {
            Value::Object(map) => {
                self.nodes.push(PlanNode::BeginObject { name: None });
                for (name, v) in map {
                    self.member(name, v);
                }
                self.nodes.push(PlanNode::EndObject);
            }
            Value::Array(items) => {
                self.nodes.push(PlanNode::BeginArray { name: None });
                for item in items {
                    self.element(item);
                }
                self.nodes.push(PlanNode::EndArray);
            }
            // Scalars never report dynamic at element position.
            _ => self.push_literal(value.to_string()),
        }
    }

    fn member(&mut self, name: &str, value: &Value) {
        if let Value::String(s) = value {
            match placeholder::resolve(s) {
                Resolution::Verbatim => self.literal_member(name, value),
                Resolution::Drop => {}
                Resolution::Event(field) => self.dynamic_field(name, Binding::Event(field)),
                Resolution::EventObject => self.dynamic_object(name, ObjectSource::Event),
                Resolution::Mdc(key) => self.dynamic_field(name, Binding::Mdc(key)),
                Resolution::MdcObject => self.dynamic_object(name, ObjectSource::Mdc),
                Resolution::Context(key) => self.dynamic_field(name, Binding::Context(key)),
                Resolution::Environment(var) => {
                    self.dynamic_field(name, Binding::Environment(var))
                }
                Resolution::System(prop) => self.dynamic_field(name, Binding::System(prop)),
            }
            return;
        }

        if !has_dynamic(value, Position::Member) {
            self.literal_member(name, value);
            return;
        }

        match value {
            Value::Object(map) => {
                self.nodes.push(PlanNode::BeginObject {
                    name: Some(name.to_string()),
                });
                for (child_name, v) in map {
                    self.member(child_name, v);
                }
                self.nodes.push(PlanNode::EndObject);
            }
            Value::Array(items) => {
                self.nodes.push(PlanNode::BeginArray {
                    name: Some(name.to_string()),
                });
                for item in items {
                    self.element(item);
                }
                self.nodes.push(PlanNode::EndArray);
            }
            _ => self.literal_member(name, value),
        }
    }

    /// `"name":value` with the value's own serialization — numbers keep
    /// the lexical form of the source token.
    fn literal_member(&mut self, name: &str, value: &Value) {
        self.push_literal(format!("\"{}\":{}", escape_json(name), value));
    }

    fn dynamic_field(&mut self, name: &str, binding: Binding) {
        self.nodes.push(PlanNode::DynamicField {
            name: name.to_string(),
            binding,
        });
    }

    fn dynamic_object(&mut self, name: &str, source: ObjectSource) {
        self.nodes.push(PlanNode::DynamicObject {
            name: name.to_string(),
            source,
        });
    }
}
