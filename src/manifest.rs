//! Explicit test registration.
//!
//! The harness discovers tests through a manifest built once before any
//! test executes, not by scanning for annotated items. Discovery order
//! is the manifest order; tests must not rely on it.

use crate::context::TestContext;

/// One registered test: a display name and the procedure that runs it.
#[derive(Clone, Copy)]
pub struct TestCase {
    /// Declaring scope plus function name, e.g. `examine::demo::passing_assertion`.
    pub name: &'static str,
    pub run: fn(&mut TestContext),
}

/// Build a test manifest from function names.
///
/// Names are qualified with the registering module's path:
///
/// ```
/// use examine::{manifest, TestCase, TestContext};
///
/// fn zero_is_zero(t: &mut TestContext) {
///     t.assert(0 == 0, "zero should equal zero");
/// }
///
/// let manifest: Vec<TestCase> = manifest![zero_is_zero];
/// assert!(manifest[0].name.ends_with("::zero_is_zero"));
/// ```
#[macro_export]
macro_rules! manifest {
    ( $( $test:ident ),* $(,)? ) => {
        ::std::vec![
            $(
                $crate::TestCase {
                    name: ::std::concat!(::std::module_path!(), "::", ::std::stringify!($test)),
                    run: $test,
                }
            ),*
        ]
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(t: &mut TestContext) {
        t.log("ran");
    }

    #[test]
    fn names_carry_the_declaring_scope() {
        let cases: Vec<TestCase> = crate::manifest![sample];
        assert_eq!(cases[0].name, "examine::manifest::tests::sample");
    }
}
