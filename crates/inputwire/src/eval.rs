//! Input value evaluation.
//!
//! Walks an [`InputValue`] tree, substitutes every `$variable` from the
//! [`Bindings`], and assembles the wire value. Object entries that evaluate to
//! null are dropped: an absent argument and an explicit `null` argument are
//! different requests, and a nullable slot left unset means absent.

use crate::bindings::Bindings;
use crate::error::EvaluationError;
use crate::model::{InputMap, InputValue, Variable, WireObject, WireValue};

impl InputValue {
    pub fn evaluate(&self, bindings: &Bindings) -> Result<WireValue, EvaluationError> {
        eval_input_value(self, bindings)
    }
}

impl InputMap {
    pub fn evaluate(&self, bindings: &Bindings) -> Result<WireObject, EvaluationError> {
        eval_input_map(self, bindings)
    }
}

/// Evaluate the argument map of an operation into its `variables` object.
pub fn evaluate_parameters(parameters: &InputMap, bindings: &Bindings) -> Result<WireObject, EvaluationError> {
    let object = eval_input_map(parameters, bindings)?;
    tracing::debug!(
        declared = parameters.len(),
        emitted = object.len(),
        bindings = bindings.len(),
        "evaluated parameters"
    );
    Ok(object)
}

pub fn eval_input_value(value: &InputValue, bindings: &Bindings) -> Result<WireValue, EvaluationError> {
    match value {
        InputValue::Scalar(scalar) => Ok(scalar.to_wire()),
        InputValue::Nullable(None) => Ok(WireValue::Null),
        InputValue::Nullable(Some(inner)) => eval_input_value(inner, bindings),
        InputValue::List(items) => eval_list(items, bindings).map(WireValue::Array),
        InputValue::Object(map) => eval_input_map(map, bindings).map(WireValue::Object),
        InputValue::Variable(variable) => resolve_variable(variable, bindings),
        InputValue::Composite(composite) => {
            tracing::trace!(type_name = composite.type_name, "evaluating input object");
            eval_input_map(&composite.fields, bindings).map(WireValue::Object)
        }
    }
}

pub fn eval_input_map(map: &InputMap, bindings: &Bindings) -> Result<WireObject, EvaluationError> {
    let mut object = WireObject::with_capacity(map.len());
    for (key, value) in map {
        let evaluated = eval_input_value(value, bindings).map_err(|err| err.with_segment(key))?;
        if evaluated.is_null() {
            tracing::trace!(key = %key, "omitting null entry");
            continue;
        }
        object.insert(key.clone(), evaluated);
    }
    Ok(object)
}

fn eval_list(items: &[InputValue], bindings: &Bindings) -> Result<Vec<WireValue>, EvaluationError> {
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        values.push(eval_input_value(item, bindings).map_err(|err| err.with_index(index))?);
    }
    Ok(values)
}

fn resolve_variable(variable: &Variable, bindings: &Bindings) -> Result<WireValue, EvaluationError> {
    bindings
        .get(variable.name())
        .cloned()
        .ok_or_else(|| EvaluationError::missing_variable(variable.name()))
}

// =============================================================================
// Evaluation Tests
// =============================================================================
