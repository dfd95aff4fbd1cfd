//! Per-signature handler state and the handler-selection policy.

use std::collections::HashMap;
use std::rc::Rc;

use crate::catalog::MethodSignature;
use crate::value::Value;
use crate::SubstituteError;

/// A handler scoped to one exact argument tuple.
pub type CaseHandler = Rc<dyn Fn() -> Value>;

/// A blanket handler receiving the call's argument tuple.
pub type DefaultHandler = Rc<dyn Fn(&[Value]) -> Value>;

/// The mutable handler state attached to one [`MethodSignature`].
///
/// A binding starts with no default handler, which models the original
/// failing state: invoking it yields an unhandled-call error naming the
/// signature. Case handlers are keyed by the deep structural equality
/// of [`Value`]; re-registering an equal tuple overwrites the prior
/// handler.
pub struct MethodBinding {
    interface: String,
    signature: MethodSignature,
    default_handler: Option<DefaultHandler>,
    case_handlers: HashMap<Vec<Value>, CaseHandler>,
}

impl MethodBinding {
    pub fn new(interface: impl Into<String>, signature: MethodSignature) -> Self {
        Self {
            interface: interface.into(),
            signature,
            default_handler: None,
            case_handlers: HashMap::new(),
        }
    }

    pub fn signature(&self) -> &MethodSignature {
        &self.signature
    }

    /// Replace the default handler.
    pub fn set_default(&mut self, handler: DefaultHandler) {
        self.default_handler = Some(handler);
    }

    /// Insert or overwrite the case handler for an exact argument tuple.
    pub fn set_case(&mut self, args: Vec<Value>, handler: CaseHandler) {
        self.case_handlers.insert(args, handler);
    }

    /// Select the handler for a call: an exact-tuple case handler always
    /// takes priority over the default handler, regardless of
    /// registration order.
    pub(crate) fn select(&self, args: &[Value]) -> Result<SelectedHandler, SubstituteError> {
        if let Some(handler) = self.case_handlers.get(args) {
            return Ok(SelectedHandler::Case(Rc::clone(handler)));
        }
        match &self.default_handler {
            Some(handler) => Ok(SelectedHandler::Default(Rc::clone(handler))),
            None => Err(SubstituteError::UnhandledCall {
                interface: self.interface.clone(),
                signature: self.signature.to_string(),
            }),
        }
    }

    /// Resolve and run the handler for the given argument tuple.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, SubstituteError> {
        Ok(self.select(args)?.run(args))
    }
}

/// A handler cloned out of a binding, runnable after the binding's
/// owner has released its borrow.
pub(crate) enum SelectedHandler {
    Case(CaseHandler),
    Default(DefaultHandler),
}

impl SelectedHandler {
    pub(crate) fn run(&self, args: &[Value]) -> Value {
        match self {
            SelectedHandler::Case(handler) => handler(),
            SelectedHandler::Default(handler) => handler(args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueType;
    use crate::values;

    fn binding() -> MethodBinding {
        MethodBinding::new(
            "Sample",
            MethodSignature::new("bar", vec![ValueType::Int, ValueType::Int], ValueType::Str),
        )
    }

    #[test]
    fn starts_unhandled() {
        let binding = binding();
        let err = binding.invoke(&values![4, 7]).unwrap_err();
        assert!(matches!(err, SubstituteError::UnhandledCall { .. }));
        assert!(err.to_string().contains("Sample::bar(Int, Int) -> Str"));
    }

    #[test]
    fn case_handler_takes_priority_over_default() {
        let mut binding = binding();
        binding.set_default(Rc::new(|args| {
            Value::Str(format!("default {} {}", args[0], args[1]))
        }));
        binding.set_case(values![5, 8], Rc::new(|| Value::Str("special".into())));

        assert_eq!(binding.invoke(&values![5, 8]).unwrap(), Value::Str("special".into()));
        assert_eq!(
            binding.invoke(&values![4, 7]).unwrap(),
            Value::Str("default 4 7".into())
        );
    }

    #[test]
    fn case_registration_order_is_irrelevant() {
        let mut binding = binding();
        binding.set_case(values![5, 8], Rc::new(|| Value::Str("special".into())));
        binding.set_default(Rc::new(|_| Value::Str("default".into())));

        assert_eq!(binding.invoke(&values![5, 8]).unwrap(), Value::Str("special".into()));
    }

    #[test]
    fn last_case_registration_for_an_equal_tuple_wins() {
        let mut binding = binding();
        binding.set_case(values![5, 8], Rc::new(|| Value::Str("first".into())));
        binding.set_case(values![5, 8], Rc::new(|| Value::Str("second".into())));

        assert_eq!(binding.invoke(&values![5, 8]).unwrap(), Value::Str("second".into()));
    }

    #[test]
    fn unmatched_tuple_without_default_stays_unhandled() {
        let mut binding = binding();
        binding.set_case(values![5, 8], Rc::new(|| Value::Str("special".into())));

        assert!(binding.invoke(&values![4, 7]).is_err());
    }
}
