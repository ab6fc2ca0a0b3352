//! Thread-local fallback host.
//!
//! Injecting a host is the primary path. When none is injected, the host
//! installed here for the current thread is used instead. Installing returns
//! a guard that restores the previous host when dropped.

use std::{cell::RefCell, marker::PhantomData, rc::Rc, sync::Arc};

use crate::{
    error::{EachError, Result},
    host::Host,
};

thread_local! {
    static AMBIENT: RefCell<Option<Arc<dyn Host>>> = const { RefCell::new(None) };
}

/// Restores the previously installed host on drop.
///
/// The guard belongs to the thread that installed the host and cannot leave
/// it:
///
/// ```compile_fail
/// use std::sync::Arc;
///
/// use each_case::{CaseBody, ambient};
///
/// let guard = ambient::install(Arc::new(|_: String, _: CaseBody| {}));
/// std::thread::spawn(move || drop(guard));
/// ```
#[must_use = "the host is uninstalled as soon as the guard drops"]
pub struct AmbientGuard {
    previous: Option<Arc<dyn Host>>,
    _thread: PhantomData<Rc<()>>,
}

impl Drop for AmbientGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        AMBIENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Install `host` as this thread's ambient host.
///
/// ```
/// use std::sync::Arc;
///
/// use each_case::{CaseBody, ambient};
///
/// let host = Arc::new(|_title: String, _body: CaseBody| {});
/// let guard = ambient::install(host);
/// assert!(ambient::current().is_some());
/// drop(guard);
/// assert!(ambient::current().is_none());
/// ```
pub fn install(host: Arc<dyn Host>) -> AmbientGuard {
    let previous = AMBIENT.with(|slot| slot.borrow_mut().replace(host));
    AmbientGuard {
        previous,
        _thread: PhantomData,
    }
}

/// The host installed for this thread, if any.
#[must_use]
pub fn current() -> Option<Arc<dyn Host>> { AMBIENT.with(|slot| slot.borrow().clone()) }

/// Prefer the injected host, falling back to the ambient one.
pub(crate) fn resolve(injected: Option<&Arc<dyn Host>>) -> Result<Arc<dyn Host>> {
    injected.cloned().or_else(current).ok_or(EachError::MissingHost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::CaseBody;

    fn noop() -> Arc<dyn Host> { Arc::new(|_: String, _: CaseBody| {}) }

    #[test]
    fn nothing_installed_is_a_missing_host() {
        assert!(matches!(resolve(None), Err(EachError::MissingHost)));
    }

    #[test]
    fn injected_host_wins_over_ambient() {
        let ambient = noop();
        let injected = noop();
        let _guard = install(Arc::clone(&ambient));
        let resolved = resolve(Some(&injected)).expect("host available");
        assert!(Arc::ptr_eq(&resolved, &injected));
    }

    #[test]
    fn guards_restore_the_previous_host() {
        let outer = noop();
        let _outer_guard = install(Arc::clone(&outer));
        {
            let _inner_guard = install(noop());
            assert!(!Arc::ptr_eq(&current().expect("inner"), &outer));
        }
        assert!(Arc::ptr_eq(&current().expect("outer restored"), &outer));
    }

    #[test]
    fn guard_uninstalls_on_the_installing_thread() {
        let guard = install(noop());
        assert!(current().is_some());
        drop(guard);
        assert!(current().is_none());
        let untouched = std::thread::spawn(|| current().is_none())
            .join()
            .expect("thread panicked");
        assert!(untouched);
    }

    #[test]
    fn ambient_host_is_per_thread() {
        let _guard = install(noop());
        let seen_elsewhere = std::thread::spawn(|| current().is_some())
            .join()
            .expect("thread panicked");
        assert!(!seen_elsewhere);
    }
}
