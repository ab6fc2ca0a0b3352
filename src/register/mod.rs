//! The registration driver and its filter adapters.
//!
//! A [`Request`] holds everything one factory call needs. Running it
//! normalizes the parameters, classifies the batch once, and registers one
//! case per tuple, in order. Every failure is detected before the first
//! registration.

use std::{fmt, sync::Arc};

use derive_more::Display;
use tracing::{debug, trace};

use crate::{
    ambient,
    arity::is_asynchronous,
    body::TestBody,
    config::Config,
    error::{EachError, Result},
    host::{Host, Registrar},
    params::{Arguments, Parameters, normalize},
    title::{CaseIndex, Title, make_title},
};

pub mod signature;

pub use signature::{FactoryArg, resolve};

/// Which host primitive receives the cases.
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq)]
pub enum Filter {
    /// The plain registration hook.
    #[default]
    #[display("plain")]
    Plain,
    /// The host's skip variant.
    #[display("skip")]
    Skip,
    /// The plain hook, inside one exclusive suite.
    #[display("only")]
    Only,
}

/// Canonical form of a factory call.
#[derive(Clone)]
pub struct Request {
    title: Title,
    parameters: Parameters,
    body: TestBody,
    host: Option<Arc<dyn Host>>,
    config: Config,
}

impl Request {
    /// Request registering `parameters` with `body`, named by `title`.
    #[must_use]
    pub fn new(title: Title, parameters: Parameters, body: TestBody) -> Self {
        Self {
            title,
            parameters,
            body,
            host: None,
            config: Config::default(),
        }
    }

    /// Inject the host instead of using the ambient one.
    #[must_use]
    pub fn with_host(self, host: Arc<dyn Host>) -> Self { self.with_host_opt(Some(host)) }

    pub(crate) fn with_host_opt(mut self, host: Option<Arc<dyn Host>>) -> Self {
        self.host = host;
        self
    }

    /// Replace the naming configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Register the batch through the primitive selected by `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`EachError::MissingHost`] when no host can be found and
    /// [`EachError::MissingCapability`] when the host lacks the filtered
    /// primitive. Nothing is registered in either case.
    pub fn run(self, filter: Filter) -> Result<()> {
        let host = ambient::resolve(self.host.as_ref())?;
        let batch = Batch::prepare(self.title, &self.parameters, self.body, self.config);
        match filter {
            Filter::Plain => batch.define(host.as_ref(), filter),
            Filter::Skip => {
                let skip = host.skip_variant().ok_or(EachError::MissingCapability {
                    capability: "skip",
                })?;
                batch.define(skip, filter);
            }
            Filter::Only => {
                let suite = host.exclusive_suite().ok_or(EachError::MissingCapability {
                    capability: "only",
                })?;
                let suite_title = batch.config.suite_title().to_owned();
                let inner = Arc::clone(&host);
                suite.only(
                    suite_title,
                    Box::new(move || batch.define(inner.as_ref(), filter)),
                );
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("title", &self.title)
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .field("host", &self.host.is_some())
            .field("config", &self.config)
            .finish()
    }
}

/// A normalized, classified batch ready for registration.
struct Batch {
    title: Title,
    tuples: Vec<Arguments>,
    body: TestBody,
    config: Config,
    asynchronous: bool,
}

impl Batch {
    fn prepare(title: Title, parameters: &Parameters, body: TestBody, config: Config) -> Self {
        let tuples = normalize(parameters);
        let asynchronous = is_asynchronous(&tuples, body.mode());
        Self {
            title,
            tuples,
            body,
            config,
            asynchronous,
        }
    }

    fn define<R: Registrar + ?Sized>(self, registrar: &R, filter: Filter) {
        debug!(
            cases = self.tuples.len(),
            asynchronous = self.asynchronous,
            mode = %self.body.mode(),
            filter = %filter,
            "defining parameterized cases"
        );
        for (index, arguments) in self.tuples.into_iter().enumerate() {
            let index = CaseIndex::new(index);
            let title = make_title(&self.title, &arguments, index, &self.config);
            trace!(case = %index, title = %title, "registering case");
            registrar.register(title, self.body.adapt(arguments, index, self.asynchronous));
        }
    }
}

/// Register one case per parameter through the plain hook.
///
/// Accepts `([title,] parameters, body[, host])`; see [`resolve`].
///
/// # Errors
///
/// Returns [`EachError::BadSignature`] for unsupported argument lists and
/// [`EachError::MissingHost`] when no host is available.
pub fn register(args: Vec<FactoryArg>) -> Result<()> { resolve(args)?.run(Filter::Plain) }

/// Like [`register`], through the host's skip variant.
///
/// # Errors
///
/// As [`register`], plus [`EachError::MissingCapability`] when the host has
/// no skip variant.
pub fn register_skip(args: Vec<FactoryArg>) -> Result<()> { resolve(args)?.run(Filter::Skip) }

/// Like [`register`], wrapped in one exclusive suite.
///
/// # Errors
///
/// As [`register`], plus [`EachError::MissingCapability`] when the host has
/// no exclusive-suite primitive.
pub fn register_only(args: Vec<FactoryArg>) -> Result<()> { resolve(args)?.run(Filter::Only) }
