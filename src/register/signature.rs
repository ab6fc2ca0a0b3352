//! Resolution of the overloaded factory call shapes.
//!
//! The factory accepts `([title,] parameters, body[, host])`. Arguments are
//! tagged [`FactoryArg`] values and are resolved in one step into a
//! [`Request`].

use std::sync::Arc;

use serde_json::Value;

use super::Request;
use crate::{
    body::TestBody,
    error::{EachError, Result},
    host::Host,
    params::{Parameters, json_kind},
    title::Title,
};

/// One argument of the dynamic factory surface.
#[derive(Clone)]
pub enum FactoryArg {
    /// A title template or naming function.
    Title(Title),
    /// The parameter list.
    Parameters(Parameters),
    /// The test body.
    Body(TestBody),
    /// An injected host.
    Host(Arc<dyn Host>),
    /// A value fitting no slot; it always fails resolution.
    Unsupported(&'static str),
}

impl FactoryArg {
    fn kind(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Parameters(_) => "parameters",
            Self::Body(_) => "body",
            Self::Host(_) => "host",
            Self::Unsupported(kind) => kind,
        }
    }
}

impl From<Title> for FactoryArg {
    fn from(title: Title) -> Self { Self::Title(title) }
}

impl From<&str> for FactoryArg {
    fn from(template: &str) -> Self { Self::Title(template.into()) }
}

impl From<String> for FactoryArg {
    fn from(template: String) -> Self { Self::Title(template.into()) }
}

impl From<Parameters> for FactoryArg {
    fn from(parameters: Parameters) -> Self { Self::Parameters(parameters) }
}

impl From<Vec<Value>> for FactoryArg {
    fn from(parameters: Vec<Value>) -> Self { Self::Parameters(parameters.into()) }
}

impl From<TestBody> for FactoryArg {
    fn from(body: TestBody) -> Self { Self::Body(body) }
}

impl<H: Host + 'static> From<Arc<H>> for FactoryArg {
    fn from(host: Arc<H>) -> Self { Self::Host(host) }
}

/// JSON arrays are parameter lists and JSON strings are templates; any other
/// value cannot fill a slot.
impl From<Value> for FactoryArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Parameters(items.into()),
            Value::String(template) => Self::Title(template.into()),
            other => Self::Unsupported(json_kind(&other)),
        }
    }
}

fn bad_signature(kinds: &[&'static str]) -> EachError {
    EachError::BadSignature {
        arity: kinds.len(),
        shape: format!("({})", kinds.join(", ")),
    }
}

/// Resolve a factory argument list into a request.
///
/// # Errors
///
/// Returns [`EachError::BadSignature`] for anything other than two to four
/// arguments shaped `([title,] parameters, body[, host])`.
pub fn resolve(args: Vec<FactoryArg>) -> Result<Request> {
    let kinds: Vec<_> = args.iter().map(FactoryArg::kind).collect();
    if !(2..=4).contains(&kinds.len()) {
        return Err(bad_signature(&kinds));
    }
    let mut iter = args.into_iter();
    let (first, second, third, fourth) = (iter.next(), iter.next(), iter.next(), iter.next());
    let (title, parameters, body, host) = match (first, second, third, fourth) {
        (
            Some(FactoryArg::Parameters(parameters)),
            Some(FactoryArg::Body(body)),
            host,
            None,
        ) => (Title::Default, parameters, body, host),
        (
            Some(FactoryArg::Title(title)),
            Some(FactoryArg::Parameters(parameters)),
            Some(FactoryArg::Body(body)),
            host,
        ) => (title, parameters, body, host),
        _ => return Err(bad_signature(&kinds)),
    };
    let host = match host {
        None => None,
        Some(FactoryArg::Host(host)) => Some(host),
        Some(_) => return Err(bad_signature(&kinds)),
    };
    Ok(Request::new(title, parameters, body).with_host_opt(host))
}
