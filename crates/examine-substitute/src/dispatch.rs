//! Translates intercepted calls into binding invocations.

use std::cell::RefCell;
use std::panic::panic_any;
use std::rc::Rc;

use tracing::{trace, warn};

use crate::binding::{CaseHandler, DefaultHandler, MethodBinding, SelectedHandler};
use crate::catalog::{MethodCatalog, ResolveFailure};
use crate::value::{display_types, MockValue, Value, ValueType};
use crate::SubstituteError;

struct DispatchTable {
    catalog: MethodCatalog,
    bindings: Vec<MethodBinding>,
}

/// The call-routing handle shared by a [`Substitute`](crate::Substitute)
/// and every proxy stub it hands out.
///
/// Cloning is cheap; all clones refer to the same dispatch table, so a
/// handler registered after a stub was created is visible to that stub.
/// The table lives behind `Rc<RefCell<...>>` because one substitute is
/// created, configured, and exercised within a single test; concurrent
/// use from multiple threads is not a supported configuration.
#[derive(Clone)]
pub struct Dispatcher {
    table: Rc<RefCell<DispatchTable>>,
}

impl Dispatcher {
    pub(crate) fn new(catalog: MethodCatalog) -> Self {
        let bindings = catalog
            .signatures()
            .iter()
            .map(|signature| MethodBinding::new(catalog.interface(), signature.clone()))
            .collect();
        Self {
            table: Rc::new(RefCell::new(DispatchTable { catalog, bindings })),
        }
    }

    /// Route an intercepted call to its handler and return the result.
    ///
    /// Dispatch failures (`SignatureNotFound`, `AmbiguousCall`,
    /// `UnhandledCall`) are raised as unwinding panics carrying the
    /// typed [`SubstituteError`], so the test body observes them at the
    /// proxy call site exactly as it would observe a failure from a
    /// genuine implementation.
    pub fn dispatch(&self, method: &str, args: Vec<Value>) -> Value {
        let arg_types: Vec<ValueType> = args.iter().map(Value::value_type).collect();
        match self.select_handler(method, &arg_types, &args) {
            Ok(handler) => handler.run(&args),
            Err(err) => {
                warn!(%err, method, "dispatch failed for intercepted call");
                panic_any(err)
            }
        }
    }

    /// [`dispatch`](Self::dispatch) plus conversion of the result to the
    /// method's declared return type. A mismatch means the registered
    /// handler produced a value of the wrong type and is raised as a
    /// `ReturnType` error.
    pub fn dispatch_as<R: MockValue>(&self, method: &str, args: Vec<Value>) -> R {
        let value = self.dispatch(method, args);
        let actual = value.value_type();
        match R::from_value(value) {
            Some(result) => result,
            None => {
                let err = SubstituteError::ReturnType {
                    method: method.to_string(),
                    expected: R::VALUE_TYPE,
                    actual,
                };
                warn!(%err, "handler returned a mistyped value");
                panic_any(err)
            }
        }
    }

    // The selected handler is cloned out before the borrow is released,
    // so a handler may re-enter this substitute.
    fn select_handler(
        &self,
        method: &str,
        arg_types: &[ValueType],
        args: &[Value],
    ) -> crate::Result<SelectedHandler> {
        let table = self.table.borrow();
        let index = table
            .catalog
            .resolve(method, arg_types)
            .map_err(|failure| resolve_error(table.catalog.interface(), method, arg_types, failure))?;
        trace!(
            interface = table.catalog.interface(),
            signature = %table.bindings[index].signature(),
            "dispatching intercepted call"
        );
        table.bindings[index].select(args)
    }

    pub(crate) fn register_case(
        &self,
        method: &str,
        args: Vec<Value>,
        handler: CaseHandler,
    ) -> crate::Result<()> {
        let mut table = self.table.borrow_mut();
        let arg_types: Vec<ValueType> = args.iter().map(Value::value_type).collect();
        let index = table
            .catalog
            .resolve(method, &arg_types)
            .map_err(|_| unknown_signature(table.catalog.interface(), method, &arg_types))?;
        table.bindings[index].set_case(args, handler);
        Ok(())
    }

    pub(crate) fn register_default(
        &self,
        method: &str,
        params: &[ValueType],
        handler: DefaultHandler,
    ) -> crate::Result<()> {
        let mut table = self.table.borrow_mut();
        let index = table
            .catalog
            .resolve(method, params)
            .map_err(|_| unknown_signature(table.catalog.interface(), method, params))?;
        table.bindings[index].set_default(handler);
        Ok(())
    }
}

fn resolve_error(
    interface: &str,
    method: &str,
    arg_types: &[ValueType],
    failure: ResolveFailure,
) -> SubstituteError {
    let interface = interface.to_string();
    let method = method.to_string();
    let arg_types = display_types(arg_types);
    match failure {
        ResolveFailure::NotFound => SubstituteError::SignatureNotFound {
            interface,
            method,
            arg_types,
        },
        ResolveFailure::Ambiguous => SubstituteError::AmbiguousCall {
            interface,
            method,
            arg_types,
        },
    }
}

fn unknown_signature(interface: &str, method: &str, arg_types: &[ValueType]) -> SubstituteError {
    SubstituteError::UnknownSignature {
        interface: interface.to_string(),
        method: method.to_string(),
        arg_types: display_types(arg_types),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MethodSignature;
    use crate::values;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(MethodCatalog::new(
            "Sample",
            vec![
                MethodSignature::new("brill", vec![], ValueType::Int),
                MethodSignature::new("bar", vec![ValueType::Int, ValueType::Int], ValueType::Str),
                MethodSignature::new("bar", vec![ValueType::Str], ValueType::Str),
            ],
        ))
    }

    fn caught_error(action: impl FnOnce()) -> SubstituteError {
        let payload = catch_unwind(AssertUnwindSafe(action)).unwrap_err();
        *payload
            .downcast::<SubstituteError>()
            .expect("dispatch failures carry a SubstituteError payload")
    }

    #[test]
    fn routes_overloads_to_their_own_bindings() {
        let dispatcher = dispatcher();
        dispatcher
            .register_default(
                "bar",
                &[ValueType::Int, ValueType::Int],
                Rc::new(|_| Value::Str("pair".into())),
            )
            .unwrap();
        dispatcher
            .register_default("bar", &[ValueType::Str], Rc::new(|_| Value::Str("text".into())))
            .unwrap();

        assert_eq!(dispatcher.dispatch("bar", values![4, 7]), Value::Str("pair".into()));
        assert_eq!(dispatcher.dispatch("bar", values!["x"]), Value::Str("text".into()));
    }

    #[test]
    fn unhandled_call_unwinds_with_the_typed_error() {
        let dispatcher = dispatcher();
        let err = caught_error(|| {
            dispatcher.dispatch("brill", values![]);
        });
        assert!(matches!(err, SubstituteError::UnhandledCall { .. }));
    }

    #[test]
    fn unknown_call_shape_is_a_signature_not_found() {
        let dispatcher = dispatcher();
        let err = caught_error(|| {
            dispatcher.dispatch("bar", values![true]);
        });
        assert_eq!(
            err,
            SubstituteError::SignatureNotFound {
                interface: "Sample".into(),
                method: "bar".into(),
                arg_types: "Bool".into(),
            }
        );
    }

    #[test]
    fn registration_against_a_missing_signature_is_rejected() {
        let dispatcher = dispatcher();
        let err = dispatcher
            .register_case("missing", values![1], Rc::new(|| Value::Unit))
            .unwrap_err();
        assert!(matches!(err, SubstituteError::UnknownSignature { .. }));
    }

    #[test]
    fn mistyped_handler_result_is_a_return_type_error() {
        let dispatcher = dispatcher();
        dispatcher
            .register_default("brill", &[], Rc::new(|_| Value::Str("not an int".into())))
            .unwrap();

        let err = caught_error(|| {
            dispatcher.dispatch_as::<i64>("brill", values![]);
        });
        assert_eq!(
            err,
            SubstituteError::ReturnType {
                method: "brill".into(),
                expected: ValueType::Int,
                actual: ValueType::Str,
            }
        );
    }

    #[test]
    fn handlers_may_reenter_the_dispatcher() {
        let dispatcher = dispatcher();
        let inner = dispatcher.clone();
        dispatcher
            .register_default("brill", &[], Rc::new(|_| Value::Int(2)))
            .unwrap();
        dispatcher
            .register_default(
                "bar",
                &[ValueType::Int, ValueType::Int],
                Rc::new(move |args| {
                    let base = inner.dispatch_as::<i64>("brill", values![]);
                    Value::Str(format!("{}", base + args[0].as_int().unwrap()))
                }),
            )
            .unwrap();

        assert_eq!(dispatcher.dispatch("bar", values![40, 0]), Value::Str("42".into()));
    }
}
