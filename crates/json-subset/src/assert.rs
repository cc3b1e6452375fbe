//! Panicking helpers for test suites.

use crate::contains::Checker;
use crate::options::{Mode, Options};
use crate::value::JsonLike;

/// Panics with a problems report unless `contained` is present in `container`.
///
/// Unsupported constructs are reported as mismatches.
#[track_caller]
pub fn assert_contained<V: JsonLike>(container: &V, contained: &V, mode: Mode) {
    let checker = Checker::new(Options::new().with_mode(mode));
    match checker.check(container, contained) {
        Ok(outcome) if outcome.is_contained() => {}
        Ok(outcome) => panic!(
            "value is not contained\n  container: {container}\n  contained: {contained}\n{}",
            outcome.report()
        ),
        Err(err) => panic!("containment check failed: {err}"),
    }
}

/// Panics if `contained` is present in `container`.
#[track_caller]
pub fn assert_not_contained<V: JsonLike>(container: &V, contained: &V) {
    if crate::contains(container, contained) {
        panic!("value is unexpectedly contained\n  container: {container}\n  contained: {contained}");
    }
}

/// Asserts that the second value is contained in the first.
///
/// Reports every mismatch unless a [`Mode`] is given as third argument.
///
/// # Examples
///
/// ```
/// use json_subset::assert_contains;
/// use serde_json::json;
///
/// let response = json!({"status": "ok", "items": [{"id": 1}, {"id": 2}]});
/// assert_contains!(response, json!({"items": [{"id": 2}]}));
/// ```
#[macro_export]
macro_rules! assert_contains {
    ($container:expr, $contained:expr $(,)?) => {
        $crate::assert::assert_contained(&$container, &$contained, $crate::Mode::CollectAll)
    };
    ($container:expr, $contained:expr, $mode:expr $(,)?) => {
        $crate::assert::assert_contained(&$container, &$contained, $mode)
    };
}

/// Asserts that the second value is not contained in the first.
#[macro_export]
macro_rules! assert_not_contains {
    ($container:expr, $contained:expr $(,)?) => {
        $crate::assert::assert_not_contained(&$container, &$contained)
    };
}
