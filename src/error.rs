//! Errors raised while defining parameterized cases.
//!
//! Registration failures are raised synchronously, before the first case
//! reaches the host, so a batch is either registered completely or not at
//! all. Failures raised by test bodies are never wrapped here; they belong
//! to the host framework.

use thiserror::Error;

/// Errors produced by `each_case`.
#[derive(Debug, Error)]
pub enum EachError {
    /// No host was injected and none is installed in the ambient slot.
    #[error("no host test framework is available; inject one or install an ambient host")]
    MissingHost,

    /// The factory was called with an unsupported argument list.
    #[error(
        "unsupported signature {shape} with {arity} argument(s); expected \
         ([title,] parameters, body[, host])"
    )]
    BadSignature {
        /// Number of arguments supplied.
        arity: usize,
        /// Kinds of the supplied arguments, in order.
        shape: String,
    },

    /// A filter was requested on a host lacking the matching primitive.
    #[error("host does not provide the `{capability}` primitive")]
    MissingCapability {
        /// Name of the missing primitive.
        capability: &'static str,
    },

    /// The parameter collection was not a sequence.
    #[error("parameters must be a sequence, found {found}")]
    InvalidParameters {
        /// JSON kind of the rejected value.
        found: &'static str,
    },

    /// Parameters could not be serialized into JSON values.
    #[error("failed to serialize parameters: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A test body asked for a position past the end of its tuple.
    #[error("argument {position} is missing; the case has {len} argument(s)")]
    MissingArgument {
        /// Zero-based position requested.
        position: usize,
        /// Length of the case's argument tuple.
        len: usize,
    },

    /// A test body could not deserialize its arguments into the requested type.
    #[error("argument {position:?} is not a valid `{expected}`: {source}")]
    ArgumentType {
        /// Zero-based position, or `None` when the whole tuple was parsed.
        position: Option<usize>,
        /// Name of the requested Rust type.
        expected: &'static str,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type used throughout `each_case`.
pub type Result<T, E = EachError> = std::result::Result<T, E>;
