//! Typed decoding of response objects.
//!
//! Reads fields of a [`WireObject`] into Rust values by name. Polymorphic
//! fields pick their concrete decoder from the `__typename` discriminator.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::model::{WireObject, WireValue};

pub const TYPENAME_FIELD: &str = "__typename";

/// A result type that can be read out of a response object.
pub trait FromResponse: Sized {
    fn from_response(object: ResponseObject<'_>) -> Result<Self, DecodeError>;
}

/// Decode a typed result from the `data` object of a response.
pub fn decode_response<T: FromResponse>(data: &WireValue) -> Result<T, DecodeError> {
    T::from_response(ResponseObject::from_value(data)?)
}

pub type Constructor<T> = fn(ResponseObject<'_>) -> Result<T, DecodeError>;

/// Concrete decoders keyed by `__typename`.
pub struct PossibleTypes<T> {
    constructors: Vec<(&'static str, Constructor<T>)>,
}

impl<T> PossibleTypes<T> {
    pub fn new() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    pub fn with(mut self, typename: &'static str, constructor: Constructor<T>) -> Self {
        self.constructors.push((typename, constructor));
        self
    }

    fn get(&self, typename: &str) -> Option<Constructor<T>> {
        self.constructors
            .iter()
            .find(|(name, _)| *name == typename)
            .map(|(_, constructor)| *constructor)
    }
}

impl<T> Default for PossibleTypes<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowed view over one response object.
#[derive(Debug, Clone)]
pub struct ResponseObject<'a> {
    object: &'a WireObject,
    path: String,
}

impl<'a> ResponseObject<'a> {
    pub fn new(object: &'a WireObject) -> Self {
        Self {
            object,
            path: String::new(),
        }
    }

    pub fn from_value(value: &'a WireValue) -> Result<Self, DecodeError> {
        match value {
            WireValue::Object(object) => Ok(Self::new(object)),
            _ => Err(DecodeError::WrongShape {
                path: String::new(),
                message: "expected an object".to_string(),
            }),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn typename(&self) -> Result<String, DecodeError> {
        self.value(TYPENAME_FIELD)
    }

    pub fn value<T: DeserializeOwned>(&self, key: &str) -> Result<T, DecodeError> {
        match self.optional_value(key)? {
            Some(value) => Ok(value),
            None => Err(DecodeError::MissingField {
                path: self.field_path(key),
            }),
        }
    }

    /// Missing and `null` both read as `None`.
    pub fn optional_value<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        match self.object.get(key) {
            None | Some(WireValue::Null) => Ok(None),
            Some(value) => deserialize_at(value, self.field_path(key)).map(Some),
        }
    }

    pub fn optional_list<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, DecodeError> {
        let items = match self.object.get(key) {
            None | Some(WireValue::Null) => return Ok(None),
            Some(WireValue::Array(items)) => items,
            Some(_) => {
                return Err(DecodeError::WrongShape {
                    path: self.field_path(key),
                    message: "expected a list".to_string(),
                });
            }
        };
        let path = self.field_path(key);
        items
            .iter()
            .enumerate()
            .map(|(index, item)| deserialize_at(item, format!("{path}[{index}]")))
            .collect::<Result<Vec<T>, _>>()
            .map(Some)
    }

    pub fn object<T: FromResponse>(&self, key: &str) -> Result<T, DecodeError> {
        T::from_response(self.nested(key)?)
    }

    pub fn optional_object<T: FromResponse>(&self, key: &str) -> Result<Option<T>, DecodeError> {
        self.optional_nested(key)?.map(T::from_response).transpose()
    }

    /// Decode a polymorphic field with the constructor registered for its
    /// `__typename`.
    pub fn value_with_possible_types<T>(&self, key: &str, possible_types: &PossibleTypes<T>) -> Result<T, DecodeError> {
        dispatch(self.nested(key)?, possible_types)
    }

    pub fn optional_value_with_possible_types<T>(
        &self,
        key: &str,
        possible_types: &PossibleTypes<T>,
    ) -> Result<Option<T>, DecodeError> {
        self.optional_nested(key)?
            .map(|nested| dispatch(nested, possible_types))
            .transpose()
    }

    fn nested(&self, key: &str) -> Result<ResponseObject<'a>, DecodeError> {
        self.optional_nested(key)?.ok_or_else(|| DecodeError::MissingField {
            path: self.field_path(key),
        })
    }

    fn optional_nested(&self, key: &str) -> Result<Option<ResponseObject<'a>>, DecodeError> {
        match self.object.get(key) {
            None | Some(WireValue::Null) => Ok(None),
            Some(WireValue::Object(object)) => Ok(Some(ResponseObject {
                object,
                path: self.field_path(key),
            })),
            Some(_) => Err(DecodeError::WrongShape {
                path: self.field_path(key),
                message: "expected an object".to_string(),
            }),
        }
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }
}

fn dispatch<T>(object: ResponseObject<'_>, possible_types: &PossibleTypes<T>) -> Result<T, DecodeError> {
    let typename = object.typename()?;
    match possible_types.get(&typename) {
        Some(constructor) => constructor(object),
        None => Err(DecodeError::UnknownTypename {
            typename,
            path: object.path,
        }),
    }
}

fn deserialize_at<T: DeserializeOwned>(value: &WireValue, path: String) -> Result<T, DecodeError> {
    T::deserialize(value).map_err(|err| DecodeError::WrongShape {
        path,
        message: err.to_string(),
    })
}
