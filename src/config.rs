//! Naming conventions applied when a batch does not fully specify titles.

/// Title used when no title is supplied at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DefaultTitle {
    /// `"<prefix> <parameter as JSON>"`, e.g. `handles [1,2]`.
    Json {
        /// Leading word of every title.
        prefix: String,
    },
    /// `"<prefix> case <n>"` with a one-based case number.
    CaseNumber {
        /// Leading word of every title.
        prefix: String,
    },
}

impl Default for DefaultTitle {
    fn default() -> Self {
        Self::Json {
            prefix: "handles".to_owned(),
        }
    }
}

/// Treatment of a template string containing no `%` markers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UntemplatedTitle {
    /// Append ` (case <n>)` with a one-based case number.
    #[default]
    CaseNumber,
    /// Append a space and the parameter as JSON.
    AppendJson,
    /// Use the template unchanged for every case.
    Verbatim,
}

/// Settings for a batch registration.
///
/// ```
/// use each_case::config::{Config, UntemplatedTitle};
///
/// let config = Config::default().with_untemplated(UntemplatedTitle::AppendJson);
/// assert_eq!(config.suite_title(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    default_title: DefaultTitle,
    untemplated: UntemplatedTitle,
    suite_title: String,
}

impl Config {
    /// Choose the convention for batches without a title.
    #[must_use]
    pub fn with_default_title(mut self, default_title: DefaultTitle) -> Self {
        self.default_title = default_title;
        self
    }

    /// Choose the convention for templates without markers.
    #[must_use]
    pub fn with_untemplated(mut self, untemplated: UntemplatedTitle) -> Self {
        self.untemplated = untemplated;
        self
    }

    /// Title of the suite wrapping an exclusive (`only`) batch.
    #[must_use]
    pub fn with_suite_title(mut self, title: impl Into<String>) -> Self {
        self.suite_title = title.into();
        self
    }

    /// Convention for batches without a title.
    #[must_use]
    pub fn default_title(&self) -> &DefaultTitle { &self.default_title }

    /// Convention for templates without markers.
    #[must_use]
    pub fn untemplated(&self) -> UntemplatedTitle { self.untemplated }

    /// Title of the exclusive wrapper suite.
    #[must_use]
    pub fn suite_title(&self) -> &str { &self.suite_title }
}
