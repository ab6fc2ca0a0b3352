//! Curried surface: bind parameters first, then title and body.
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use each_case::{CaseBody, TestBody, with_parameters};
//! use serde_json::json;
//!
//! let titles = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&titles);
//! let host = Arc::new(move |title: String, _body: CaseBody| {
//!     sink.lock().expect("titles lock").push(title);
//! });
//!
//! with_parameters(vec![json!([1, 1, 2]), json!([2, -2, 0])])
//!     .host(host)
//!     .it("adds %d and %d then returns %d", TestBody::sync(|_| {}))
//!     .expect("cases registered");
//!
//! assert_eq!(*titles.lock().expect("titles lock"), [
//!     "adds 1 and 1 then returns 2",
//!     "adds 2 and -2 then returns 0",
//! ]);
//! ```

use std::{fmt, sync::Arc};

use crate::{
    body::TestBody,
    config::Config,
    error::Result,
    host::Host,
    params::Parameters,
    register::{Filter, Request},
    title::Title,
};

/// Parameters bound ahead of any title or body.
///
/// The same binding can define several batches.
#[must_use]
#[derive(Clone, Default)]
pub struct Cases {
    parameters: Parameters,
    host: Option<Arc<dyn Host>>,
    config: Config,
}

/// Bind `parameters` for later registration.
pub fn with_parameters(parameters: impl Into<Parameters>) -> Cases {
    Cases {
        parameters: parameters.into(),
        ..Cases::default()
    }
}

/// Alias of [`with_parameters`].
pub fn each(parameters: impl Into<Parameters>) -> Cases { with_parameters(parameters) }

impl Cases {
    /// Inject the host used by every batch defined from this binding.
    #[must_use]
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Replace the naming configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The bound parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters { &self.parameters }

    /// Define one case per parameter.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EachError::MissingHost`] when no host is injected or
    /// installed.
    pub fn it(&self, title: impl Into<Title>, body: TestBody) -> Result<()> {
        self.request(title.into(), body).run(Filter::Plain)
    }

    /// Define the cases through the host's skip variant.
    ///
    /// # Errors
    ///
    /// As [`Cases::it`], plus [`crate::EachError::MissingCapability`] when
    /// the host has no skip variant.
    pub fn skip(&self, title: impl Into<Title>, body: TestBody) -> Result<()> {
        self.request(title.into(), body).run(Filter::Skip)
    }

    /// Define the cases inside one exclusive suite.
    ///
    /// # Errors
    ///
    /// As [`Cases::it`], plus [`crate::EachError::MissingCapability`] when
    /// the host has no exclusive-suite primitive.
    pub fn only(&self, title: impl Into<Title>, body: TestBody) -> Result<()> {
        self.request(title.into(), body).run(Filter::Only)
    }

    fn request(&self, title: Title, body: TestBody) -> Request {
        let request = Request::new(title, self.parameters.clone(), body).with_config(self.config.clone());
        match &self.host {
            Some(host) => request.with_host(Arc::clone(host)),
            None => request,
        }
    }
}

impl fmt::Debug for Cases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cases")
            .field("parameters", &self.parameters)
            .field("host", &self.host.is_some())
            .field("config", &self.config)
            .finish()
    }
}
