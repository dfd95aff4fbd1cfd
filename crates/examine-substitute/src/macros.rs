//! Proxy generation for mocked interfaces.

/// Expands to the declared return type of a mocked method, defaulting
/// to `()` when the declaration has none.
#[doc(hidden)]
#[macro_export]
macro_rules! __mock_ret {
    () => { () };
    ($ret:ty) => { $ret };
}

/// Declare a mockable interface.
///
/// Emits three items: the trait itself, a stub type implementing the
/// trait by forwarding every call into a [`Dispatcher`](crate::Dispatcher),
/// and a [`Mockable`](crate::Mockable) impl for `dyn Trait` so the
/// trait can parameterize [`Substitute`](crate::Substitute).
///
/// ```
/// use examine_substitute::{mock_interface, Substitute};
///
/// mock_interface! {
///     pub trait Greeter => GreeterStub {
///         fn greet(&self, name: String) -> String;
///         fn ready(&self) -> bool;
///     }
/// }
///
/// let substitute = Substitute::<dyn Greeter>::new();
/// substitute.set_handler("ready", || true).unwrap();
/// assert!(substitute.proxy().ready());
/// ```
///
/// Every parameter and return type must implement
/// [`MockValue`](crate::MockValue). Methods take `&self`; a method
/// without a return type is treated as returning `()`. Because a Rust
/// trait cannot declare two methods with the same name, generated
/// interfaces carry no overloads; the catalog and dispatcher still
/// support same-name signatures for catalogs built directly.
#[macro_export]
macro_rules! mock_interface {
    (
        $(#[$trait_meta:meta])*
        $vis:vis trait $trait_name:ident => $stub_name:ident {
            $(
                $(#[$method_meta:meta])*
                fn $method:ident(&self $(, $arg:ident : $arg_ty:ty)* $(,)?) $(-> $ret:ty)?;
            )*
        }
    ) => {
        $(#[$trait_meta])*
        $vis trait $trait_name {
            $(
                $(#[$method_meta])*
                fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)?;
            )*
        }

        /// Generated stand-in forwarding every call into the dispatch
        /// engine.
        #[derive(Clone)]
        $vis struct $stub_name {
            dispatcher: $crate::Dispatcher,
        }

        impl $trait_name for $stub_name {
            $(
                fn $method(&self $(, $arg: $arg_ty)*) $(-> $ret)? {
                    self.dispatcher.dispatch_as::<$crate::__mock_ret!($($ret)?)>(
                        stringify!($method),
                        ::std::vec![
                            $( $crate::MockValue::into_value($arg) ),*
                        ],
                    )
                }
            )*
        }

        impl $crate::Mockable for dyn $trait_name {
            type Stub = $stub_name;

            fn catalog() -> $crate::MethodCatalog {
                $crate::MethodCatalog::new(
                    stringify!($trait_name),
                    ::std::vec![
                        $(
                            $crate::MethodSignature::new(
                                stringify!($method),
                                ::std::vec![
                                    $( <$arg_ty as $crate::MockValue>::VALUE_TYPE ),*
                                ],
                                <$crate::__mock_ret!($($ret)?) as $crate::MockValue>::VALUE_TYPE,
                            )
                        ),*
                    ],
                )
            }

            fn stub(dispatcher: $crate::Dispatcher) -> Self::Stub {
                $stub_name { dispatcher }
            }
        }
    };
}
