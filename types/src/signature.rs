//! Function signature descriptors.
//!
//! A signature with `N` parameters is the class `Function$N` instantiated
//! with the return type followed by the parameter types. Every signature
//! implements the unparameterized [`FUNCTION`](names::FUNCTION) interface,
//! which is also what untyped host functions report.

use alloc::vec::Vec;

use crate::names::{self, SIGNATURE_ARITY_SEPARATOR};
use crate::{Descriptor, TypeRegistry};

impl<'types> TypeRegistry<'types> {
    /// The generic callable interface.
    pub fn function(&self) -> Descriptor<'types> {
        self.class(names::FUNCTION, None)
    }

    /// Canonical descriptor of functions taking `params` and returning `ret`.
    pub fn function_type(
        &self,
        ret: Descriptor<'types>,
        params: &[Descriptor<'types>],
    ) -> Descriptor<'types> {
        let mut args = Vec::with_capacity(params.len() + 1);
        args.push(ret);
        args.extend_from_slice(params);

        let signature = self.class(&names::signature_class(params.len()), Some(&args));
        if signature.implemented(names::FUNCTION).is_none() {
            signature.add_supertype(self.function());
        }
        signature
    }
}

impl<'types> Descriptor<'types> {
    /// Parameter count, if this is a function signature.
    pub fn arity(self) -> Option<usize> {
        self.class_key()
            .strip_prefix(names::FUNCTION)?
            .strip_prefix(SIGNATURE_ARITY_SEPARATOR)?
            .parse()
            .ok()
    }

    pub fn is_function_type(self) -> bool {
        self.arity().is_some()
    }

    pub fn return_type(self) -> Option<Descriptor<'types>> {
        self.arity()?;
        self.type_args()?.first().copied()
    }

    pub fn parameter_types(self) -> Option<&'types [Descriptor<'types>]> {
        self.arity()?;
        self.type_args()?.get(1..)
    }
}
