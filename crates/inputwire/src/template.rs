//! JSON templates for input trees.
//!
//! Lets a parameter tree be written as plain JSON, where a single-key object
//! `{"$var": "name"}` stands for a variable reference. This is the one place
//! an input tree comes from untyped data, so it is also the one place a node
//! can be malformed. What happens to a malformed node inside a list or object
//! is decided by [`ElementPolicy`].

use serde::{Deserialize, Serialize};

use crate::error::EvaluationError;
use crate::model::{InputMap, InputValue, Variable, WireObject, WireValue};

pub const DEFAULT_VARIABLE_MARKER: &str = "$var";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementPolicy {
    /// Drop malformed list elements and object entries, with a warning.
    #[default]
    Skip,
    /// Fail with [`EvaluationError::ShapeMismatch`].
    Reject,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateOptions {
    pub element_policy: ElementPolicy,
    pub variable_marker: String,
}

impl Default for TemplateOptions {
    fn default() -> Self {
        Self {
            element_policy: ElementPolicy::Skip,
            variable_marker: DEFAULT_VARIABLE_MARKER.to_string(),
        }
    }
}

impl TemplateOptions {
    pub fn strict() -> Self {
        Self {
            element_policy: ElementPolicy::Reject,
            ..Self::default()
        }
    }
}

/// Parse a JSON template into an input tree.
///
/// A malformed root is always an error; there is nothing to drop it from.
pub fn parse_template(template: &WireValue, options: &TemplateOptions) -> Result<InputValue, EvaluationError> {
    parse_node(template, options)
}

pub fn parse_template_str(template: &str, options: &TemplateOptions) -> Result<InputValue, EvaluationError> {
    let value: WireValue = serde_json::from_str(template)
        .map_err(|err| EvaluationError::shape_mismatch(format!("template is not valid JSON: {err}")))?;
    parse_template(&value, options)
}

/// Parse a template whose root must be an object, e.g. an operation's
/// argument map.
pub fn parse_parameters(template: &WireValue, options: &TemplateOptions) -> Result<InputMap, EvaluationError> {
    match template {
        WireValue::Object(entries) if !is_marker(entries, options) => parse_entries(entries, options),
        _ => Err(EvaluationError::shape_mismatch("parameters template must be a JSON object")),
    }
}

fn parse_node(value: &WireValue, options: &TemplateOptions) -> Result<InputValue, EvaluationError> {
    match value {
        WireValue::Array(items) => parse_items(items, options).map(InputValue::List),
        WireValue::Object(entries) if is_marker(entries, options) => parse_marker(entries, options),
        WireValue::Object(entries) => parse_entries(entries, options).map(InputValue::Object),
        literal => Ok(InputValue::from(literal.clone())),
    }
}

fn parse_items(items: &[WireValue], options: &TemplateOptions) -> Result<Vec<InputValue>, EvaluationError> {
    let mut nodes = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match parse_node(item, options) {
            Ok(node) => nodes.push(node),
            Err(err) => match options.element_policy {
                ElementPolicy::Skip => {
                    tracing::warn!(index, error = %err, "skipping malformed list element");
                }
                ElementPolicy::Reject => return Err(err.with_index(index)),
            },
        }
    }
    Ok(nodes)
}

fn parse_entries(entries: &WireObject, options: &TemplateOptions) -> Result<InputMap, EvaluationError> {
    let mut map = InputMap::with_capacity(entries.len());
    for (key, value) in entries {
        match parse_node(value, options) {
            Ok(node) => {
                map.insert(key.as_str(), node);
            }
            Err(err) => match options.element_policy {
                ElementPolicy::Skip => {
                    tracing::warn!(key = %key, error = %err, "skipping malformed object entry");
                }
                ElementPolicy::Reject => return Err(err.with_segment(key)),
            },
        }
    }
    Ok(map)
}

fn is_marker(entries: &WireObject, options: &TemplateOptions) -> bool {
    entries.contains_key(&options.variable_marker)
}

fn parse_marker(entries: &WireObject, options: &TemplateOptions) -> Result<InputValue, EvaluationError> {
    let marker = &options.variable_marker;
    if entries.len() != 1 {
        return Err(EvaluationError::shape_mismatch(format!(
            "`{marker}` must be the only key of a variable reference"
        )));
    }
    match entries.get(marker) {
        Some(WireValue::String(name)) if !name.is_empty() => Ok(InputValue::Variable(Variable::new(name.as_str()))),
        _ => Err(EvaluationError::shape_mismatch(format!(
            "`{marker}` must name a variable with a non-empty string"
        ))),
    }
}
