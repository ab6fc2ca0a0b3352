//! An in-memory [`Host`] that records every registration.
//!
//! [`RecordingHost`] stands in for a real test framework: it keeps each
//! `(title, body)` pair it receives, distinguishes plain from skipped
//! registrations, records exclusive suites, and can execute recorded cases,
//! driving asynchronous ones until their completion handle fires.

use std::sync::{Arc, Mutex, MutexGuard};

use each_case::{CaseBody, CaseContext, Host, Outcome, Registrar, Suite, SuiteSetup};
use futures::executor::block_on;
use rstest::fixture;

/// Which primitive received a registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// The plain registration hook.
    Plain,
    /// The skip variant.
    Skip,
}

/// One recorded `(title, body)` pair.
#[derive(Clone, Debug)]
pub struct Registration {
    kind: Kind,
    title: String,
    body: Arc<CaseBody>,
}

impl Registration {
    /// Primitive that received the case.
    #[must_use]
    pub fn kind(&self) -> Kind { self.kind }

    /// Title the case was registered under.
    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    /// The adapted body.
    #[must_use]
    pub fn body(&self) -> &CaseBody { &self.body }

    /// Execute the case with a context carrying its title.
    pub fn run(&self) -> Outcome { self.run_with(&CaseContext::new(self.title.clone())) }

    /// Execute the case with a caller-built context, blocking until it
    /// completes.
    pub fn run_with(&self, context: &CaseContext) -> Outcome { block_on(self.body.execute(context)) }
}

#[derive(Default)]
struct Journal {
    registrations: Mutex<Vec<Registration>>,
    suites: Mutex<Vec<String>>,
    pending: Mutex<Vec<SuiteSetup>>,
}

impl Journal {
    fn record(&self, kind: Kind, title: String, body: CaseBody) {
        lock(&self.registrations).push(Registration {
            kind,
            title,
            body: Arc::new(body),
        });
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct SkipHook(Arc<Journal>);

impl Registrar for SkipHook {
    fn register(&self, title: String, body: CaseBody) { self.0.record(Kind::Skip, title, body); }
}

struct OnlyHook {
    journal: Arc<Journal>,
    deferred: bool,
}

impl Suite for OnlyHook {
    fn only(&self, title: String, setup: SuiteSetup) {
        lock(&self.journal.suites).push(title);
        if self.deferred {
            lock(&self.journal.pending).push(setup);
        } else {
            setup();
        }
    }
}

/// Host recording registrations for later inspection.
pub struct RecordingHost {
    journal: Arc<Journal>,
    skip: Option<SkipHook>,
    suite: Option<OnlyHook>,
}

impl Default for RecordingHost {
    fn default() -> Self { Self::new() }
}

impl RecordingHost {
    /// A host offering every primitive; exclusive suites run their setup
    /// immediately.
    #[must_use]
    pub fn new() -> Self {
        let journal = Arc::new(Journal::default());
        Self {
            skip: Some(SkipHook(Arc::clone(&journal))),
            suite: Some(OnlyHook {
                journal: Arc::clone(&journal),
                deferred: false,
            }),
            journal,
        }
    }

    /// Drop the skip variant.
    #[must_use]
    pub fn without_skip(mut self) -> Self {
        self.skip = None;
        self
    }

    /// Drop the exclusive-suite primitive.
    #[must_use]
    pub fn without_suite(mut self) -> Self {
        self.suite = None;
        self
    }

    /// Hold suite setups until [`RecordingHost::run_pending_suites`].
    #[must_use]
    pub fn deferred_suites(mut self) -> Self {
        if let Some(suite) = self.suite.as_mut() {
            suite.deferred = true;
        }
        self
    }

    /// Wrap the host for injection.
    #[must_use]
    pub fn shared(self) -> Arc<Self> { Arc::new(self) }

    /// Every registration, in arrival order.
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> { lock(&self.journal.registrations).clone() }

    /// Registrations received by the given primitive.
    #[must_use]
    pub fn of_kind(&self, kind: Kind) -> Vec<Registration> {
        self.registrations()
            .into_iter()
            .filter(|registration| registration.kind == kind)
            .collect()
    }

    /// Titles of plain registrations, in order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.of_kind(Kind::Plain)
            .into_iter()
            .map(|registration| registration.title)
            .collect()
    }

    /// Number of plain registrations.
    #[must_use]
    pub fn plain_count(&self) -> usize { self.of_kind(Kind::Plain).len() }

    /// Number of skip-variant registrations.
    #[must_use]
    pub fn skip_count(&self) -> usize { self.of_kind(Kind::Skip).len() }

    /// Titles of exclusive suites, in order.
    #[must_use]
    pub fn suite_titles(&self) -> Vec<String> { lock(&self.journal.suites).clone() }

    /// Run deferred suite setups, returning how many ran.
    pub fn run_pending_suites(&self) -> usize {
        let pending: Vec<SuiteSetup> = lock(&self.journal.pending).drain(..).collect();
        let ran = pending.len();
        for setup in pending {
            setup();
        }
        ran
    }

    /// Execute every plain registration in order.
    pub fn run_all(&self) -> Vec<Outcome> {
        self.of_kind(Kind::Plain)
            .iter()
            .map(Registration::run)
            .collect()
    }
}

impl Registrar for RecordingHost {
    fn register(&self, title: String, body: CaseBody) {
        self.journal.record(Kind::Plain, title, body);
    }
}

impl Host for RecordingHost {
    fn skip_variant(&self) -> Option<&dyn Registrar> {
        self.skip.as_ref().map(|skip| skip as &dyn Registrar)
    }

    fn exclusive_suite(&self) -> Option<&dyn Suite> {
        self.suite.as_ref().map(|suite| suite as &dyn Suite)
    }
}

/// A fresh recording host with every primitive available.
#[allow(
    unused_braces,
    reason = "rustc false positive for single line rstest fixtures"
)]
#[fixture]
pub fn recording_host() -> Arc<RecordingHost> { RecordingHost::new().shared() }
