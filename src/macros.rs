//! Convenience macro over the dynamic factory surface.

/// Register parameterized cases from a loose argument list.
///
/// Every argument is converted with [`FactoryArg::from`](crate::FactoryArg),
/// so JSON arrays become parameters and strings become templates. Prefix the
/// list with `skip:` or `only:` to use the matching filter.
///
/// ```
/// use std::sync::Arc;
///
/// use each_case::{CaseBody, TestBody, each_case};
/// use serde_json::json;
///
/// let host = Arc::new(|_title: String, _body: CaseBody| {});
/// each_case!("handles %j", json!(["a", 1, true]), TestBody::sync(|_| {}), host)
///     .expect("three cases registered");
/// ```
#[macro_export]
macro_rules! each_case {
    (skip: $($arg:expr),+ $(,)?) => {
        $crate::register_skip(::std::vec![$($crate::FactoryArg::from($arg)),+])
    };
    (only: $($arg:expr),+ $(,)?) => {
        $crate::register_only(::std::vec![$($crate::FactoryArg::from($arg)),+])
    };
    ($($arg:expr),+ $(,)?) => {
        $crate::register(::std::vec![$($crate::FactoryArg::from($arg)),+])
    };
}
