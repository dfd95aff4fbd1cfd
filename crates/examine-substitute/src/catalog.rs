//! The fixed method surface of a mocked interface.

use std::fmt;

use crate::value::{display_types, ValueType};

/// One overload of the target interface: method name plus the ordered
/// declared parameter types and the declared return type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    name: String,
    params: Vec<ValueType>,
    ret: ValueType,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: Vec<ValueType>, ret: ValueType) -> Self {
        Self {
            name: name.into(),
            params,
            ret,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    pub fn return_type(&self) -> ValueType {
        self.ret
    }

    /// Whether this signature accepts a call with the given runtime
    /// argument types. Acceptance is exact type equality over the
    /// closed value set; the arity must match as well.
    pub fn accepts(&self, arg_types: &[ValueType]) -> bool {
        self.params.len() == arg_types.len()
            && self
                .params
                .iter()
                .zip(arg_types)
                .all(|(declared, actual)| declared == actual)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) -> {}", self.name, display_types(&self.params), self.ret)
    }
}

/// Why a call could not be resolved against a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolveFailure {
    /// No signature matches the call's name and argument types.
    NotFound,
    /// More than one signature applies. Unreachable for a well-formed
    /// catalog; kept as a defensive arm.
    Ambiguous,
}

/// The complete, ordered set of method signatures for one interface,
/// computed once at substitute construction and read-only thereafter.
#[derive(Debug, Clone)]
pub struct MethodCatalog {
    interface: String,
    signatures: Vec<MethodSignature>,
}

impl MethodCatalog {
    /// Build the catalog for the named interface.
    ///
    /// Within one interface no two signatures may share a name and
    /// parameter list; a trait declaration guarantees this by
    /// construction, so a violation is a programming defect.
    pub fn new(interface: impl Into<String>, signatures: Vec<MethodSignature>) -> Self {
        debug_assert!(
            signatures
                .iter()
                .enumerate()
                .all(|(i, a)| signatures[..i]
                    .iter()
                    .all(|b| a.name() != b.name() || a.params() != b.params())),
            "duplicate signature in method catalog"
        );
        Self {
            interface: interface.into(),
            signatures,
        }
    }

    /// The name of the interface this catalog describes.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The declared signatures, in declaration order.
    pub fn signatures(&self) -> &[MethodSignature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Resolve a call by name and runtime argument types to the index
    /// of the accepting signature.
    ///
    /// With exact type acceptance there is at most one applicable
    /// signature per well-formed catalog; two applicable signatures
    /// would mean the catalog holds a duplicate, which is reported as
    /// [`ResolveFailure::Ambiguous`] rather than resolved by guesswork.
    pub(crate) fn resolve(
        &self,
        method: &str,
        arg_types: &[ValueType],
    ) -> Result<usize, ResolveFailure> {
        let mut applicable = self
            .signatures
            .iter()
            .enumerate()
            .filter(|(_, sig)| sig.name() == method && sig.accepts(arg_types))
            .map(|(index, _)| index);

        match (applicable.next(), applicable.next()) {
            (Some(index), None) => Ok(index),
            (Some(_), Some(_)) => Err(ResolveFailure::Ambiguous),
            (None, _) => Err(ResolveFailure::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> MethodCatalog {
        MethodCatalog::new(
            "Sample",
            vec![
                MethodSignature::new("brill", vec![], ValueType::Int),
                MethodSignature::new("baz", vec![ValueType::Str], ValueType::Str),
                MethodSignature::new("bar", vec![ValueType::Int, ValueType::Int], ValueType::Str),
                // Overload of `bar` by arity and parameter types.
                MethodSignature::new("bar", vec![ValueType::Str], ValueType::Str),
            ],
        )
    }

    #[test]
    fn resolves_by_name_and_argument_types() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("brill", &[]), Ok(0));
        assert_eq!(catalog.resolve("baz", &[ValueType::Str]), Ok(1));
    }

    #[test]
    fn resolves_overloads_to_the_accepting_signature() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("bar", &[ValueType::Int, ValueType::Int]), Ok(2));
        assert_eq!(catalog.resolve("bar", &[ValueType::Str]), Ok(3));
    }

    #[test]
    fn rejects_unknown_names_and_type_mismatches() {
        let catalog = sample_catalog();
        assert_eq!(catalog.resolve("missing", &[]), Err(ResolveFailure::NotFound));
        assert_eq!(
            catalog.resolve("bar", &[ValueType::Int]),
            Err(ResolveFailure::NotFound)
        );
        assert_eq!(
            catalog.resolve("baz", &[ValueType::Int]),
            Err(ResolveFailure::NotFound)
        );
    }

    #[test]
    fn signature_display_reads_like_a_declaration() {
        let sig = MethodSignature::new("bar", vec![ValueType::Int, ValueType::Int], ValueType::Str);
        assert_eq!(sig.to_string(), "bar(Int, Int) -> Str");
    }
}
