//! Synchronous/asynchronous classification of a batch of cases.
//!
//! A body either states its mode outright or declares how many positional
//! parameters it takes. A declared count larger than the longest tuple means
//! the trailing parameter is a completion handle, and the whole batch runs
//! asynchronously.

use derive_more::Display;
use serde_json::Value;

use crate::params::Arguments;

/// Execution mode of a test body.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Mode {
    /// The body returns when it is done.
    #[display("sync")]
    Sync,
    /// The body always receives a completion handle.
    #[display("async")]
    Async,
    /// The body declares this many positional parameters; see [`is_asynchronous`].
    #[display("declared({_0})")]
    Declared(usize),
}

/// Length of the longest tuple, or zero for an empty batch.
#[must_use]
pub fn longest(tuples: &[Arguments]) -> usize {
    tuples.iter().map(Arguments::len).max().unwrap_or(0)
}

/// Classify a batch.
///
/// With [`Mode::Declared`], the batch is asynchronous when no tuple supplies
/// as many values as the body declares.
///
/// ```
/// use each_case::{Arguments, arity::{Mode, is_asynchronous}};
/// use serde_json::json;
///
/// let tuples = vec![Arguments::from_parameter(json!("Bob"))];
/// assert!(is_asynchronous(&tuples, Mode::Declared(2)));
/// assert!(!is_asynchronous(&tuples, Mode::Declared(1)));
/// ```
#[must_use]
pub fn is_asynchronous(tuples: &[Arguments], mode: Mode) -> bool {
    match mode {
        Mode::Sync => false,
        Mode::Async => true,
        Mode::Declared(declared) => longest(tuples) < declared,
    }
}

/// One positional slot of an asynchronous call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Slot<'a> {
    /// A value taken from the tuple.
    Value(&'a Value),
    /// The completion handle.
    Done,
    /// A declared position that received nothing.
    Undefined,
}

/// Positional layout of an asynchronous call.
///
/// The completion handle always sits right after the tuple's own values.
/// Declared positions beyond it are [`Slot::Undefined`], so a one-value
/// tuple given to a body declaring `(x, y, done)` lays out as
/// `[value, Done, Undefined]`.
#[must_use]
pub fn async_layout(arguments: &Arguments, declared: Option<usize>) -> Vec<Slot<'_>> {
    let filled = arguments.len() + 1;
    let width = declared.map_or(filled, |declared| declared.max(filled));
    let mut slots: Vec<Slot<'_>> = arguments.values().iter().map(Slot::Value).collect();
    slots.push(Slot::Done);
    slots.resize(width, Slot::Undefined);
    slots
}
