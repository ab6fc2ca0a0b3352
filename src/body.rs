//! Test bodies and the adapted case bodies handed to the host.
//!
//! A [`TestBody`] is written once per batch. For each tuple the driver wraps
//! it in a [`CaseBody`]: a synchronous thunk, or an asynchronous body that
//! takes the host's [`Done`] handle. Both forward the host's
//! [`CaseContext`] untouched.

use std::{any::Any, fmt, sync::Arc};

use crate::{
    arity::{Mode, Slot, async_layout},
    completion::{Completion, Done},
    params::Arguments,
    title::CaseIndex,
};

/// Per-execution context supplied by the host when it runs a case.
///
/// Hosts may attach arbitrary data, for example their own test handle.
#[derive(Clone, Default)]
pub struct CaseContext {
    title: String,
    data: Option<Arc<dyn Any + Send + Sync>>,
}

impl CaseContext {
    /// Context for the case registered under `title`.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            data: None,
        }
    }

    /// Attach host data.
    #[must_use]
    pub fn with_data<T: Any + Send + Sync>(mut self, data: T) -> Self {
        self.data = Some(Arc::new(data));
        self
    }

    /// Title the host executes the case under.
    #[must_use]
    pub fn title(&self) -> &str { &self.title }

    /// Host data, if it is of type `T`.
    #[must_use]
    pub fn data<T: Any>(&self) -> Option<&T> { self.data.as_deref()?.downcast_ref() }
}

impl fmt::Debug for CaseContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaseContext")
            .field("title", &self.title)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}

/// One invocation of a [`TestBody`].
#[derive(Debug)]
pub struct Call<'a> {
    context: &'a CaseContext,
    arguments: &'a Arguments,
    index: CaseIndex,
    done: Option<Done>,
    declared: Option<usize>,
    asynchronous: bool,
}

impl<'a> Call<'a> {
    fn synchronous(context: &'a CaseContext, arguments: &'a Arguments, index: CaseIndex) -> Self {
        Self {
            context,
            arguments,
            index,
            done: None,
            declared: None,
            asynchronous: false,
        }
    }

    fn asynchronous(
        context: &'a CaseContext,
        arguments: &'a Arguments,
        index: CaseIndex,
        done: Done,
        declared: Option<usize>,
    ) -> Self {
        Self {
            context,
            arguments,
            index,
            done: Some(done),
            declared,
            asynchronous: true,
        }
    }

    /// Host context forwarded from the case execution.
    #[must_use]
    pub fn context(&self) -> &'a CaseContext { self.context }

    /// The case's positional arguments.
    #[must_use]
    pub fn args(&self) -> &'a Arguments { self.arguments }

    /// Zero-based position of the case within its batch.
    #[must_use]
    pub fn index(&self) -> CaseIndex { self.index }

    /// Whether the batch was classified asynchronous.
    #[must_use]
    pub fn is_async(&self) -> bool { self.asynchronous }

    /// Take the completion handle. `None` for synchronous calls or once taken.
    pub fn take_done(&mut self) -> Option<Done> { self.done.take() }

    /// Position of the completion handle, right after the tuple's values.
    #[must_use]
    pub fn done_position(&self) -> Option<usize> {
        self.asynchronous.then(|| self.arguments.len())
    }

    /// Positional view of the call.
    ///
    /// Synchronous calls list only the tuple's values; asynchronous calls
    /// follow [`async_layout`].
    #[must_use]
    pub fn slots(&self) -> Vec<Slot<'a>> {
        if self.asynchronous {
            async_layout(self.arguments, self.declared)
        } else {
            self.arguments.values().iter().map(Slot::Value).collect()
        }
    }
}

type BodyFn = dyn Fn(Call<'_>) + Send + Sync;

/// A test body shared by every case of a batch.
///
/// ```
/// use each_case::TestBody;
///
/// let body = TestBody::sync(|call| {
///     let (a, b, sum): (i64, i64, i64) = call.args().parse().expect("three integers");
///     assert_eq!(a + b, sum);
/// });
/// assert_eq!(body.mode(), each_case::Mode::Sync);
/// ```
#[derive(Clone)]
pub struct TestBody {
    mode: Mode,
    run: Arc<BodyFn>,
}

impl TestBody {
    /// A body that finishes when it returns.
    pub fn sync(body: impl Fn(Call<'_>) + Send + Sync + 'static) -> Self {
        Self::with_mode(Mode::Sync, body)
    }

    /// A body that always receives a completion handle.
    pub fn asynchronous(body: impl Fn(Call<'_>) + Send + Sync + 'static) -> Self {
        Self::with_mode(Mode::Async, body)
    }

    /// A body declaring `count` positional parameters.
    ///
    /// The batch becomes asynchronous when every tuple is shorter than
    /// `count`; the extra parameter is then the completion handle.
    pub fn declared(count: usize, body: impl Fn(Call<'_>) + Send + Sync + 'static) -> Self {
        Self::with_mode(Mode::Declared(count), body)
    }

    /// A body with an explicit [`Mode`].
    pub fn with_mode(mode: Mode, body: impl Fn(Call<'_>) + Send + Sync + 'static) -> Self {
        Self {
            mode,
            run: Arc::new(body),
        }
    }

    /// The body's execution mode.
    #[must_use]
    pub fn mode(&self) -> Mode { self.mode }

    fn declared_count(&self) -> Option<usize> {
        match self.mode {
            Mode::Declared(count) => Some(count),
            Mode::Sync | Mode::Async => None,
        }
    }

    /// Adapt the body for one tuple.
    pub(crate) fn adapt(
        &self,
        arguments: Arguments,
        index: CaseIndex,
        asynchronous: bool,
    ) -> CaseBody {
        let run = Arc::clone(&self.run);
        if asynchronous {
            let declared = self.declared_count();
            CaseBody::Async(Box::new(move |context: &CaseContext, done: Done| {
                run(Call::asynchronous(context, &arguments, index, done, declared));
            }))
        } else {
            CaseBody::Sync(Box::new(move |context: &CaseContext| {
                run(Call::synchronous(context, &arguments, index));
            }))
        }
    }
}

impl fmt::Debug for TestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestBody").field("mode", &self.mode).finish_non_exhaustive()
    }
}

/// Synchronous adapted body.
pub type SyncCase = Box<dyn Fn(&CaseContext) + Send + Sync>;
/// Asynchronous adapted body.
pub type AsyncCase = Box<dyn Fn(&CaseContext, Done) + Send + Sync>;

/// Body registered with the host for a single case.
pub enum CaseBody {
    /// Runs to completion when called.
    Sync(SyncCase),
    /// Finishes when the supplied [`Done`] is called.
    Async(AsyncCase),
}

impl CaseBody {
    /// Number of arguments the host must supply besides the context:
    /// zero for synchronous bodies, one (the handle) for asynchronous ones.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Sync(_) => 0,
            Self::Async(_) => 1,
        }
    }

    /// Whether the host must supply a completion handle.
    #[must_use]
    pub fn is_async(&self) -> bool { matches!(self, Self::Async(_)) }

    /// Run the case, returning a future that resolves when it finishes.
    ///
    /// Panics raised by the body propagate to the caller.
    pub fn execute(&self, context: &CaseContext) -> Completion {
        match self {
            Self::Sync(run) => {
                run(context);
                Completion::ready(Ok(()))
            }
            Self::Async(run) => {
                let (done, completion) = Done::channel();
                run(context, done);
                completion
            }
        }
    }
}

impl fmt::Debug for CaseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("CaseBody::Sync"),
            Self::Async(_) => f.write_str("CaseBody::Async"),
        }
    }
}
