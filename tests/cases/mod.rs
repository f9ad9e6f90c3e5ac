//! Table-driven subtype cases over a small, fixed class hierarchy.
//!
//! Types are written the way their `type_key` renders, e.g.
//! `Map<String,List<int>>`, and built on demand with the right supplier.

use std::iter::Peekable;

use rtt::{Descriptor, RttError, Supplier, TypeArgs, TypeRegistry};

// =============================================================================
// Hierarchy
//
//   int, double   extend num
//   num           implements Comparable<num>
//   String        implements Comparable<String>, Pattern
//   List<E>       implements Iterable<E>
//   Set<E>        implements Iterable<E>
//   Function$N    implements Function
// =============================================================================

fn number_supplier<'t>(
    reg: &TypeRegistry<'t>,
    this: Descriptor<'t>,
    _: TypeArgs<'t>,
) -> Result<(), RttError> {
    this.add_supertype(reg.create("num", Some(&num_supplier), None)?);
    Ok(())
}

fn num_supplier<'t>(
    reg: &TypeRegistry<'t>,
    this: Descriptor<'t>,
    _: TypeArgs<'t>,
) -> Result<(), RttError> {
    this.add_supertype(reg.class("Comparable", Some(&[this])));
    Ok(())
}

fn string_supplier<'t>(
    reg: &TypeRegistry<'t>,
    this: Descriptor<'t>,
    _: TypeArgs<'t>,
) -> Result<(), RttError> {
    this.add_supertype(reg.class("Comparable", Some(&[this])));
    this.add_supertype(reg.class("Pattern", None));
    Ok(())
}

fn iterable_supplier<'t>(
    reg: &TypeRegistry<'t>,
    this: Descriptor<'t>,
    args: TypeArgs<'t>,
) -> Result<(), RttError> {
    let e = reg.get_type_arg(args, 0)?;
    this.add_supertype(reg.class("Iterable", Some(&[e])));
    Ok(())
}

fn signature_supplier<'t>(
    reg: &TypeRegistry<'t>,
    this: Descriptor<'t>,
    _: TypeArgs<'t>,
) -> Result<(), RttError> {
    this.add_supertype(reg.function());
    Ok(())
}

pub fn supplier_for<'t>(name: &str) -> Option<&'t Supplier<'t, 't>> {
    match name {
        "int" | "double" => Some(&number_supplier),
        "num" => Some(&num_supplier),
        "String" => Some(&string_supplier),
        "List" | "Set" => Some(&iterable_supplier),
        _ if name.starts_with("Function$") => Some(&signature_supplier),
        _ => None,
    }
}

/// Build the descriptor written as `src`.
pub fn ty<'t>(reg: &TypeRegistry<'t>, src: &str) -> Descriptor<'t> {
    let mut chars = src.chars().filter(|c| !c.is_whitespace()).peekable();
    let ty = parse(reg, &mut chars);
    assert!(chars.next().is_none(), "trailing input in `{src}`");
    ty
}

fn parse<'t>(
    reg: &TypeRegistry<'t>,
    chars: &mut Peekable<impl Iterator<Item = char>>,
) -> Descriptor<'t> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if matches!(c, '<' | ',' | '>') {
            break;
        }
        name.push(c);
        chars.next();
    }
    assert!(!name.is_empty(), "expected a class name");

    let mut args = Vec::new();
    if chars.peek() == Some(&'<') {
        chars.next();
        loop {
            args.push(parse(reg, chars));
            match chars.next() {
                Some(',') => continue,
                Some('>') => break,
                other => panic!("expected `,` or `>` after `{name}` argument, got {other:?}"),
            }
        }
    }

    reg.create(&name, supplier_for(&name), Some(&args))
        .unwrap_or_else(|err| panic!("building `{name}`: {err}"))
}

/// Initialize tracing subscriber for tests with DEBUG level
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// Main macro - name first, then the required and the given type
#[macro_export]
macro_rules! subtype_case {
    (
        name: $name:ident,
        required: $required:expr,
        given: $given:expr,
        expected: $expected:expr $(,)?
    ) => {
        #[test]
        fn $name() {
            let arena = bumpalo::Bump::new();
            let reg = rtt::TypeRegistry::new(&arena);
            let required = $crate::cases::ty(reg, $required);
            let given = $crate::cases::ty(reg, $given);

            pretty_assertions::assert_eq!(
                required.implemented_by_type(given),
                $expected,
                "{} <- {}",
                required,
                given,
            );
        }
    };
}
