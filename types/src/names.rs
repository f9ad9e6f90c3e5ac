//! Well-known class names and type-key rendering.

use alloc::string::String;

use crate::Descriptor;

/// Class name of the root of the "is-a" hierarchy.
pub const OBJECT: &str = "Object";

/// Class name of the universal, erased type.
pub const DYNAMIC: &str = "dynamic";

/// Class name of the fallback descriptor for values of unknown type.
pub const PLACEHOLDER: &str = "$placeholder";

/// Class name of the generic callable interface every function implements.
pub const FUNCTION: &str = "Function";

/// Separator between [`FUNCTION`] and the arity in signature class names.
pub const SIGNATURE_ARITY_SEPARATOR: char = '$';

/// Renders the identity key of `name` instantiated with `type_args`.
///
/// Without arguments (or with an empty list) the key is `name` itself,
/// otherwise `name<k1,...,kN>` where each `ki` is the argument's own
/// `type_key`.
///
/// ```
/// use rtt_types::names::build_key;
///
/// assert_eq!(build_key("List", None), "List");
/// assert_eq!(build_key("List", Some(&[])), "List");
/// ```
pub fn build_key(name: &str, type_args: Option<&[Descriptor<'_>]>) -> String {
    let mut key = String::from(name);
    let Some(args) = type_args.filter(|args| !args.is_empty()) else {
        return key;
    };
    key.push('<');
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            key.push(',');
        }
        key.push_str(arg.type_key());
    }
    key.push('>');
    key
}

/// Class name of the function signature with `arity` parameters.
pub fn signature_class(arity: usize) -> String {
    alloc::format!("{FUNCTION}{SIGNATURE_ARITY_SEPARATOR}{arity}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeRegistry;
    use bumpalo::Bump;

    #[test]
    fn test_build_key_nested() {
        let arena = Bump::new();
        let reg = TypeRegistry::new(&arena);
        let string = reg.class("String", None);
        let int = reg.class("int", None);
        let list_int = reg.class("List", Some(&[int]));

        assert_eq!(
            build_key("Map", Some(&[string, list_int])),
            "Map<String,List<int>>"
        );
    }

    #[test]
    fn test_signature_class() {
        assert_eq!(signature_class(0), "Function$0");
        assert_eq!(signature_class(2), "Function$2");
    }
}
