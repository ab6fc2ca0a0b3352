//! Normalization of raw parameters into positional argument tuples.
//!
//! A parameter that is already a JSON array is used as the tuple unchanged;
//! any other value becomes a one-element tuple.

use std::{any::type_name, fmt, slice};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{EachError, Result};

/// Ordered collection of raw parameters, one per test case.
///
/// ```
/// use each_case::Parameters;
/// use serde_json::json;
///
/// let params = Parameters::from_json(json!([[1, 1, 2], "solo"])).expect("a list");
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Parameters(Vec<Value>);

impl Parameters {
    /// Build a parameter list from anything convertible into JSON values.
    pub fn new<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self(values.into_iter().map(Into::into).collect())
    }

    /// Accept a JSON array as the parameter list.
    ///
    /// # Errors
    ///
    /// Returns [`EachError::InvalidParameters`] when `value` is not an array.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self(items)),
            other => Err(EachError::InvalidParameters {
                found: json_kind(&other),
            }),
        }
    }

    /// Serialize typed parameters, one entry per item.
    ///
    /// Items serializing to arrays (tuples, `Vec`s) become multi-argument
    /// cases; everything else becomes a single-argument case.
    ///
    /// # Errors
    ///
    /// Returns [`EachError::Serialize`] if an item fails to serialize.
    pub fn from_serialize<T: Serialize>(items: &[T]) -> Result<Self> {
        items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(EachError::from)
    }

    /// Number of parameters, and therefore of cases.
    #[must_use]
    pub fn len(&self) -> usize { self.0.len() }

    /// Whether the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Iterate over the raw parameters.
    pub fn iter(&self) -> slice::Iter<'_, Value> { self.0.iter() }
}

impl From<Vec<Value>> for Parameters {
    fn from(values: Vec<Value>) -> Self { Self(values) }
}

impl<T: Into<Value>> FromIterator<T> for Parameters {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self { Self::new(iter) }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

/// Positional arguments handed to one test case.
#[derive(Clone, Debug, PartialEq)]
pub struct Arguments {
    values: Vec<Value>,
    wrapped: bool,
}

impl Arguments {
    /// Normalize a single raw parameter.
    #[must_use]
    pub fn from_parameter(parameter: Value) -> Self {
        match parameter {
            Value::Array(values) => Self {
                values,
                wrapped: false,
            },
            other => Self {
                values: vec![other],
                wrapped: true,
            },
        }
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize { self.values.len() }

    /// Whether the tuple has no arguments (only possible for `[]` parameters).
    #[must_use]
    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Borrow the positional values.
    #[must_use]
    pub fn values(&self) -> &[Value] { &self.values }

    /// Borrow the value at `position`, if present.
    #[must_use]
    pub fn value(&self, position: usize) -> Option<&Value> { self.values.get(position) }

    /// Whether this tuple was produced by wrapping a bare value.
    #[must_use]
    pub fn is_wrapped(&self) -> bool { self.wrapped }

    /// Reconstruct the raw parameter this tuple came from.
    #[must_use]
    pub fn to_parameter(&self) -> Value {
        match (self.wrapped, self.values.first()) {
            (true, Some(value)) => value.clone(),
            _ => Value::Array(self.values.clone()),
        }
    }

    /// Deserialize the argument at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`EachError::MissingArgument`] past the end of the tuple and
    /// [`EachError::ArgumentType`] when the value does not fit `T`.
    pub fn get<T: DeserializeOwned>(&self, position: usize) -> Result<T> {
        let value = self.value(position).ok_or(EachError::MissingArgument {
            position,
            len: self.len(),
        })?;
        T::deserialize(value).map_err(|source| EachError::ArgumentType {
            position: Some(position),
            expected: type_name::<T>(),
            source,
        })
    }

    /// Deserialize the whole tuple, typically into a Rust tuple or struct.
    ///
    /// ```
    /// use each_case::Arguments;
    /// use serde_json::json;
    ///
    /// let args = Arguments::from_parameter(json!([1, -2, "x"]));
    /// let (a, b, c): (i64, i64, String) = args.parse().expect("typed tuple");
    /// assert_eq!((a, b, c.as_str()), (1, -2, "x"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EachError::ArgumentType`] when the tuple does not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        let tuple = Value::Array(self.values.clone());
        T::deserialize(tuple).map_err(|source| EachError::ArgumentType {
            position: None,
            expected: type_name::<T>(),
            source,
        })
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Array(self.values.clone()))
    }
}

/// Normalize every parameter, preserving order.
#[must_use]
pub fn normalize(parameters: &Parameters) -> Vec<Arguments> {
    parameters
        .iter()
        .cloned()
        .map(Arguments::from_parameter)
        .collect()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
