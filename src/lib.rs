#![doc(html_root_url = "https://docs.rs/each_case/latest")]
//! Public API for the `each_case` library.
//!
//! This crate registers one named test case per parameter tuple with a host
//! test framework. It decides what gets registered, under which title, and
//! how each tuple reaches the test body; running the cases is left to the
//! host.

pub mod ambient;
pub mod arity;
pub mod body;
pub mod cases;
pub mod completion;
pub mod config;
pub mod error;
pub mod host;
mod macros;
pub mod params;
pub mod register;
pub mod title;

pub use arity::{Mode, Slot};
pub use body::{CaseBody, CaseContext, Call, TestBody};
pub use cases::{Cases, each, with_parameters};
pub use completion::{Completion, Done, Failure, Outcome};
pub use config::Config;
/// Result type alias re-exported for convenience.
pub use error::{EachError, Result};
pub use host::{Host, Registrar, Suite, SuiteSetup};
pub use params::{Arguments, Parameters, normalize};
pub use register::{
    FactoryArg,
    Filter,
    Request,
    register,
    register_only,
    register_skip,
    resolve,
};
pub use title::{CaseIndex, Title, make_title};
