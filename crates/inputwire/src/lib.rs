//! Marshalling boundary of a typed GraphQL client.
//!
//! Outbound, an operation's argument tree ([`InputMap`] of [`InputValue`]s) is
//! evaluated against the request's [`Bindings`] into the JSON `variables`
//! object. Inbound, response objects are decoded into typed results with
//! [`ResponseObject`].
//!
//! ```
//! use inputwire::{evaluate_parameters, input_map, Bindings, Variable};
//! use serde_json::json;
//!
//! let args = input_map! {
//!     "episode" => Variable::new("episode"),
//!     "after" => None::<String>,
//! };
//! let bindings = Bindings::new().with("episode", "JEDI");
//! let variables = evaluate_parameters(&args, &bindings).unwrap();
//! assert_eq!(serde_json::Value::Object(variables), json!({"episode": "JEDI"}));
//! ```

mod bindings;
mod decode;
mod error;
mod eval;
mod model;
mod operation;
pub mod template;

/// Library version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use bindings::Bindings;
pub use decode::{Constructor, FromResponse, PossibleTypes, ResponseObject, TYPENAME_FIELD, decode_response};
pub use error::{DecodeError, EvaluationError, EvaluationErrorKind};
pub use eval::{eval_input_map, eval_input_value, evaluate_parameters};
pub use model::{Composite, InputMap, InputObject, InputValue, Scalar, Variable, WireObject, WireValue};
pub use operation::{Operation, OperationRequest};
pub use template::{ElementPolicy, TemplateOptions, parse_parameters, parse_template, parse_template_str};
