//! Capabilities `each_case` consumes from a host test framework.
//!
//! [`Registrar`] is the case-registration hook (`it`). A [`Host`] is a
//! registrar that may also expose a skip variant (`it.skip`) and an
//! exclusive-suite primitive (`describe.only`). Any
//! `Fn(String, CaseBody)` closure is a host offering only the plain hook.

use crate::body::CaseBody;

/// Deferred body of a suite, run by the host when it builds the suite.
pub type SuiteSetup = Box<dyn FnOnce() + Send>;

/// Registers one named case.
pub trait Registrar: Send + Sync {
    /// Register `body` under `title`.
    fn register(&self, title: String, body: CaseBody);
}

/// Suite-level primitive able to mark a group as exclusive.
pub trait Suite: Send + Sync {
    /// Define an exclusive suite named `title` whose cases are defined by
    /// `setup`.
    fn only(&self, title: String, setup: SuiteSetup);
}

/// A host test framework.
pub trait Host: Registrar {
    /// The skip variant of the registration hook, if the host has one.
    fn skip_variant(&self) -> Option<&dyn Registrar> { None }

    /// The exclusive-suite primitive, if the host has one.
    fn exclusive_suite(&self) -> Option<&dyn Suite> { None }
}

impl<F> Registrar for F
where
    F: Fn(String, CaseBody) + Send + Sync,
{
    fn register(&self, title: String, body: CaseBody) { self(title, body); }
}

impl<F> Host for F where F: Fn(String, CaseBody) + Send + Sync {}
