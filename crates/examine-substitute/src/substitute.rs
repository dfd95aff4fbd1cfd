//! The public construction and registration surface.

use std::marker::PhantomData;
use std::rc::Rc;

use tracing::debug;

use crate::catalog::MethodCatalog;
use crate::dispatch::Dispatcher;
use crate::value::{MockValue, Value, ValueType};

/// An interface type that can be substituted.
///
/// Implemented for `dyn Trait` by [`mock_interface!`](crate::mock_interface);
/// there is no reason to implement it by hand.
pub trait Mockable {
    /// The generated concrete type satisfying the interface.
    type Stub;

    /// Enumerate the interface's method signatures, once, at substitute
    /// construction. Deterministic and complete over the declared
    /// method surface.
    fn catalog() -> MethodCatalog;

    /// Build a stub forwarding every method into the dispatcher.
    fn stub(dispatcher: Dispatcher) -> Self::Stub;
}

/// A stand-in for an interface type whose method behavior is fully
/// controlled by test code.
///
/// Created per test, configured through the `set_*` registration calls,
/// and exercised through the proxies returned by [`proxy`](Self::proxy).
/// Substitute instances are fully independent: registering a handler on
/// one has no observable effect on any other, including substitutes for
/// the same interface.
pub struct Substitute<T: ?Sized + Mockable> {
    dispatcher: Dispatcher,
    _interface: PhantomData<fn() -> Box<T>>,
}

impl<T: ?Sized + Mockable> Substitute<T> {
    /// Build the method catalog and an unhandled-by-default binding per
    /// signature.
    pub fn new() -> Self {
        let catalog = T::catalog();
        debug!(
            interface = catalog.interface(),
            methods = catalog.len(),
            "creating substitute"
        );
        Self {
            dispatcher: Dispatcher::new(catalog),
            _interface: PhantomData,
        }
    }

    /// A concrete implementation of the target interface whose every
    /// method forwards into this substitute's dispatcher. May be called
    /// repeatedly; all proxies share the same handler state.
    pub fn proxy(&self) -> T::Stub {
        T::stub(self.dispatcher.clone())
    }

    /// Register the default handler for the zero-parameter overload of
    /// `method`.
    ///
    /// Fails with [`SubstituteError::UnknownSignature`](crate::SubstituteError)
    /// if the interface has no zero-parameter method of that name; on
    /// failure no binding is mutated.
    pub fn set_handler<R, F>(&self, method: &str, handler: F) -> crate::Result<()>
    where
        R: MockValue,
        F: Fn() -> R + 'static,
    {
        self.dispatcher
            .register_default(method, &[], Rc::new(move |_args| handler().into_value()))
    }

    /// Register a handler for one exact argument tuple.
    ///
    /// The signature is resolved from the runtime types of `args`; the
    /// handler takes no arguments because the tuple it serves is fixed.
    /// Re-registering an equal tuple overwrites the prior handler, and
    /// the handler always takes priority over the overload's default
    /// handler, regardless of registration order.
    pub fn set_case_handler<R, F>(&self, method: &str, args: Vec<Value>, handler: F) -> crate::Result<()>
    where
        R: MockValue,
        F: Fn() -> R + 'static,
    {
        self.dispatcher
            .register_case(method, args, Rc::new(move || handler().into_value()))
    }

    /// Register the default handler for the overload whose parameter
    /// types are exactly `params`. The handler receives each call's
    /// argument tuple; there is no arity ceiling.
    pub fn set_default_handler<R, F>(
        &self,
        method: &str,
        params: &[ValueType],
        handler: F,
    ) -> crate::Result<()>
    where
        R: MockValue,
        F: Fn(&[Value]) -> R + 'static,
    {
        self.dispatcher
            .register_default(method, params, Rc::new(move |args| handler(args).into_value()))
    }
}

impl<T: ?Sized + Mockable> Default for Substitute<T> {
    fn default() -> Self {
        Self::new()
    }
}
