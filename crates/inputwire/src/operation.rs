use serde::Serialize;

use crate::bindings::Bindings;
use crate::error::EvaluationError;
use crate::eval::evaluate_parameters;
use crate::model::{InputMap, WireObject};

/// A query or mutation together with the arguments it was built with.
pub trait Operation {
    const OPERATION_NAME: &'static str;
    const OPERATION_DEFINITION: &'static str;

    /// Definitions of the fragments the operation spreads.
    const FRAGMENTS: &'static [&'static str] = &[];

    /// Operation text followed by every fragment it depends on.
    fn query_document() -> String {
        let mut document = String::from(Self::OPERATION_DEFINITION);
        for fragment in Self::FRAGMENTS {
            document.push_str(fragment);
        }
        document
    }

    fn variables(&self) -> Option<InputMap> {
        None
    }
}

/// Body of an outbound request, ready for `serde_json::to_vec`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<WireObject>,
}

impl OperationRequest {
    /// Evaluate the operation's arguments against `bindings`.
    ///
    /// Fails when the variables cannot be evaluated; such a request must not
    /// be sent.
    pub fn new<O: Operation>(operation: &O, bindings: &Bindings) -> Result<Self, EvaluationError> {
        Self::from_parts(
            O::query_document(),
            Some(O::OPERATION_NAME.to_string()),
            operation.variables().as_ref(),
            bindings,
        )
    }

    pub fn from_parts(
        query: String,
        operation_name: Option<String>,
        parameters: Option<&InputMap>,
        bindings: &Bindings,
    ) -> Result<Self, EvaluationError> {
        let variables = parameters
            .map(|parameters| evaluate_parameters(parameters, bindings))
            .transpose()?;
        tracing::debug!(
            operation_name = operation_name.as_deref().unwrap_or("<anonymous>"),
            has_variables = variables.is_some(),
            "built operation request"
        );
        Ok(Self {
            query,
            operation_name,
            variables,
        })
    }
}
