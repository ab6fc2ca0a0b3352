//! Title generation for parameterized cases.
//!
//! A batch names its cases with a [`Title`]: a template string, a caller
//! function, or nothing at all. Conventions for the last two situations
//! without explicit instructions come from [`Config`].

use std::{fmt, sync::Arc};

use derive_more::{Display, From};
use tracing::warn;

use crate::{
    config::{Config, DefaultTitle, UntemplatedTitle},
    params::Arguments,
};

pub mod format;

/// Zero-based position of a case within its batch.
#[derive(Clone, Copy, Debug, Default, Display, From, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("{_0}")]
pub struct CaseIndex(usize);

impl CaseIndex {
    /// Wrap a zero-based index.
    #[must_use]
    pub const fn new(index: usize) -> Self { Self(index) }

    /// The zero-based index.
    #[must_use]
    pub const fn get(self) -> usize { self.0 }

    /// The one-based case number shown in titles.
    #[must_use]
    pub const fn number(self) -> usize { self.0 + 1 }
}

/// Caller-supplied naming function.
pub type TitleFn = Arc<dyn Fn(&Arguments, CaseIndex) -> String + Send + Sync>;

/// How a batch names its cases.
#[derive(Clone, Default)]
pub enum Title {
    /// Use the configured [`DefaultTitle`].
    #[default]
    Default,
    /// A template, optionally containing `%` markers.
    Template(String),
    /// A function of the tuple and case index; its result is used verbatim.
    Function(TitleFn),
}

impl Title {
    /// Name cases with a function.
    ///
    /// ```
    /// use each_case::Title;
    ///
    /// let title = Title::function(|args, _| {
    ///     let animal: String = args.get(0).unwrap_or_default();
    ///     format!("A {animal} should cry")
    /// });
    /// # let _ = title;
    /// ```
    pub fn function(name: impl Fn(&Arguments, CaseIndex) -> String + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(name))
    }
}

impl From<&str> for Title {
    fn from(template: &str) -> Self { Self::Template(template.to_owned()) }
}

impl From<String> for Title {
    fn from(template: String) -> Self { Self::Template(template) }
}

impl fmt::Debug for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Template(template) => f.debug_tuple("Template").field(template).finish(),
            Self::Function(_) => f.write_str("Function"),
        }
    }
}

/// Produce the title of one case.
#[must_use]
pub fn make_title(title: &Title, arguments: &Arguments, index: CaseIndex, config: &Config) -> String {
    match title {
        Title::Function(name) => name(arguments, index),
        Title::Default => match config.default_title() {
            DefaultTitle::Json { prefix } => format!("{prefix} {}", arguments.to_parameter()),
            DefaultTitle::CaseNumber { prefix } => format!("{prefix} case {}", index.number()),
        },
        Title::Template(template) if format::has_markers(template) => {
            let formatted = format::format(template, arguments.values());
            if formatted.unfilled > 0 {
                warn!(
                    template = %template,
                    case = %index,
                    unfilled = formatted.unfilled,
                    "title template has more markers than the case has arguments"
                );
            }
            formatted.text
        }
        Title::Template(template) => {
            let text = format::format(template, &[]).text;
            match config.untemplated() {
                UntemplatedTitle::CaseNumber => format!("{text} (case {})", index.number()),
                UntemplatedTitle::AppendJson => format!("{text} {}", arguments.to_parameter()),
                UntemplatedTitle::Verbatim => text,
            }
        }
    }
}
