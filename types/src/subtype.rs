//! The runtime subtype check.
//!
//! Generic arguments are matched covariantly in every position, function
//! parameters included. This is not variance-sound, and generated code
//! relies on exactly this behaviour.

use crate::Descriptor;

impl<'types> Descriptor<'types> {
    /// Whether a value of type `other` is usable wherever `self` is
    /// required, i.e. `other <: self`.
    ///
    /// `Object`, `dynamic` and the placeholder accept everything. `dynamic`
    /// and the placeholder are also accepted by everything. Otherwise
    /// `other` must implement `self`'s class, and when both sides carry
    /// type arguments each of `other`'s substituted arguments must in turn
    /// be accepted by the matching argument of `self`. A side without
    /// arguments is erased and matches on the class alone.
    pub fn implemented_by_type(self, other: Descriptor<'types>) -> bool {
        if self.is_object() || self.is_universal() {
            return true;
        }
        if self == other || other.is_universal() {
            return true;
        }

        let Some(target) = other.implemented(self.class_key()) else {
            return false;
        };
        if !self.is_parameterized() || !target.is_parameterized() {
            return true;
        }

        let expected = self.type_args().unwrap_or_default();
        let actual = target.type_args().unwrap_or_default();
        expected.len() == actual.len()
            && expected
                .iter()
                .zip(actual)
                .all(|(expected, actual)| expected.implemented_by_type(*actual))
    }
}
