//! The built-in demonstration suite run by the `examine` binary.
//!
//! Shows every harness capability: plain assertions, expected errors in
//! both directions, and a full substitute round-trip. The failing tests
//! are deliberate; the point of the demo is the report they produce.

use examine_substitute::{mock_interface, values, Substitute, SubstituteError, ValueType};

use crate::context::TestContext;
use crate::manifest::TestCase;

mock_interface! {
    /// The interface mocked by the substitute demo.
    pub trait Widget => WidgetStub {
        fn brill(&self) -> i64;
        fn baz(&self, param: String) -> String;
        fn bar(&self, a: i64, b: i64) -> String;
    }
}

/// The demo manifest, in display order.
pub fn manifest() -> Vec<TestCase> {
    crate::manifest![
        passing_assertion,
        failing_assertion,
        expected_error_is_caught,
        missing_expected_error_fails,
        substitute_round_trip,
        unmocked_call_is_reported,
    ]
}

fn passing_assertion(t: &mut TestContext) {
    t.assert(0 == 0, "zero should equal zero");
}

fn failing_assertion(t: &mut TestContext) {
    t.assert(1 == 0, "one should equal zero");
}

fn expected_error_is_caught(t: &mut TestContext) {
    t.run_expecting_error::<SubstituteError>(
        || {
            let substitute = Substitute::<dyn Widget>::new();
            substitute.proxy().brill();
        },
        "calling an unmocked method should raise a substitute error",
    );
}

fn missing_expected_error_fails(t: &mut TestContext) {
    t.run_expecting_error::<SubstituteError>(
        || {},
        "this action was expected to raise a substitute error",
    );
}

fn substitute_round_trip(t: &mut TestContext) {
    let substitute = Substitute::<dyn Widget>::new();
    let widget = substitute.proxy();

    // Default handler of a zero-parameter method.
    substitute
        .set_handler("brill", || 10i64)
        .expect("brill() exists on Widget");
    t.assert(widget.brill() == 10, "the brill handler should return 10");

    // Default handler of a two-parameter method.
    substitute
        .set_default_handler("bar", &[ValueType::Int, ValueType::Int], |args| {
            format!(
                "default bar of {} and {}",
                args[0].as_int().unwrap_or_default(),
                args[1].as_int().unwrap_or_default()
            )
        })
        .expect("bar(Int, Int) exists on Widget");
    t.assert(
        widget.bar(4, 7) == "default bar of 4 and 7",
        "the default bar handler should describe its arguments",
    );

    // Case handler for one exact argument tuple.
    substitute
        .set_case_handler("bar", values![5, 8], || "specialized bar of 5 and 8".to_string())
        .expect("bar(Int, Int) exists on Widget");
    t.assert(
        widget.bar(5, 8) == "specialized bar of 5 and 8",
        "the case handler should shadow the default for (5, 8)",
    );
    // The default still answers every other tuple.
    t.assert(
        widget.bar(4, 7) == "default bar of 4 and 7",
        "the default bar handler should still cover other tuples",
    );

    t.log("substitute round trip complete");
}

fn unmocked_call_is_reported(t: &mut TestContext) {
    let substitute = Substitute::<dyn Widget>::new();
    let widget = substitute.proxy();
    t.log("about to call baz without a handler");
    // Raises an unhandled-call error the runner records as a failure.
    widget.baz("unmocked".to_string());
}
