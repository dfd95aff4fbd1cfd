//! Interface substitution and call-dispatch engine for the `examine`
//! test harness.
//!
//! A [`Substitute`] stands in for a trait declared through
//! [`mock_interface!`]. Test code registers behavior per method, either
//! a blanket default handler or handlers scoped to exact argument
//! tuples, and every call made through the generated proxy is routed to
//! the matching handler.
//!
//! ```
//! use examine_substitute::{mock_interface, values, Substitute, ValueType};
//!
//! mock_interface! {
//!     pub trait Calculator => CalculatorStub {
//!         fn add(&self, a: i64, b: i64) -> i64;
//!     }
//! }
//!
//! let substitute = Substitute::<dyn Calculator>::new();
//! let calc = substitute.proxy();
//!
//! substitute
//!     .set_default_handler("add", &[ValueType::Int, ValueType::Int], |args| {
//!         args[0].as_int().unwrap() + args[1].as_int().unwrap()
//!     })
//!     .unwrap();
//! substitute.set_case_handler("add", values![2, 2], || 5i64).unwrap();
//!
//! assert_eq!(calc.add(1, 2), 3);
//! assert_eq!(calc.add(2, 2), 5); // the exact-tuple handler wins
//! ```
//!
//! The engine is single-threaded by design: a substitute is created,
//! configured, and exercised within one test. Registration and dispatch
//! must not be called concurrently from multiple threads.

pub mod binding;
pub mod catalog;
pub mod dispatch;
mod macros;
pub mod substitute;
pub mod value;

pub use catalog::{MethodCatalog, MethodSignature};
pub use dispatch::Dispatcher;
pub use substitute::{Mockable, Substitute};
pub use value::{MockValue, Value, ValueType};

use miette::Diagnostic;

/// Result type alias for registration calls.
pub type Result<T> = std::result::Result<T, SubstituteError>;

/// Error types for the substitution engine.
///
/// Registration failures are returned synchronously from the
/// registration API. Dispatch failures are raised as unwinding panics
/// carrying the error at the proxy call site, so a test body observes
/// an intentionally unmocked call exactly as it would observe a real
/// failure from a genuine implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum SubstituteError {
    #[error("no method named `{method}` on `{interface}` accepts arguments ({arg_types})")]
    #[diagnostic(
        code(substitute::unknown_signature),
        help("Check the method name and argument types against the mocked trait declaration.")
    )]
    UnknownSignature {
        interface: String,
        method: String,
        arg_types: String,
    },

    #[error("method `{interface}::{signature}` called when not handled")]
    #[diagnostic(
        code(substitute::unhandled_call),
        help("Register a handler with `set_handler`, `set_case_handler` or `set_default_handler` before exercising this method.")
    )]
    UnhandledCall { interface: String, signature: String },

    #[error("no signature on `{interface}` matches intercepted call `{method}({arg_types})`")]
    #[diagnostic(
        code(substitute::signature_not_found),
        help("This indicates a defect in the proxy wiring; a generated proxy can only emit calls that exist on the mocked trait.")
    )]
    SignatureNotFound {
        interface: String,
        method: String,
        arg_types: String,
    },

    #[error("intercepted call `{method}({arg_types})` matches more than one signature on `{interface}`")]
    #[diagnostic(
        code(substitute::ambiguous_call),
        help("The method catalog contains overlapping signatures; every name + parameter-type combination must be unique.")
    )]
    AmbiguousCall {
        interface: String,
        method: String,
        arg_types: String,
    },

    #[error("handler for `{method}` returned a {actual} value, but the method is declared to return {expected}")]
    #[diagnostic(
        code(substitute::return_type),
        help("Make the registered handler return the type the mocked trait declares for this method.")
    )]
    ReturnType {
        method: String,
        expected: ValueType,
        actual: ValueType,
    },

    #[error("invalid argument tuple: {0}")]
    #[diagnostic(
        code(substitute::invalid_arguments),
        help("Argument tuples parse from a JSON array of null, boolean, number, string or nested array elements.")
    )]
    InvalidArguments(String),
}
