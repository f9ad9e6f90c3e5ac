use bumpalo::Bump;
use core::cell::Cell;
use core::fmt;
use rtt_types::Descriptor;

/// Hidden per-value type tag.
///
/// Only heap values carry one. Compiled constructors fill it right after
/// allocation; it may later be overwritten or cleared.
#[derive(Default)]
pub struct TypeTag<'types>(Cell<Option<Descriptor<'types>>>);

static_assertions::assert_eq_size!(TypeTag<'static>, usize);

impl<'types> TypeTag<'types> {
    pub fn new(descriptor: Option<Descriptor<'types>>) -> Self {
        Self(Cell::new(descriptor))
    }

    pub fn get(&self) -> Option<Descriptor<'types>> {
        self.0.get()
    }

    pub fn set(&self, descriptor: Descriptor<'types>) {
        self.0.set(Some(descriptor));
    }

    pub fn clear(&self) {
        self.0.set(None);
    }
}

impl fmt::Debug for TypeTag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(ty) => write!(f, "TypeTag({ty})"),
            None => f.write_str("TypeTag(-)"),
        }
    }
}

#[derive(Debug)]
pub struct HostArray<'types, 'arena> {
    tag: TypeTag<'types>,
    elements: &'arena [Value<'types, 'arena>],
}

impl<'types, 'arena> HostArray<'types, 'arena> {
    pub fn elements(&self) -> &'arena [Value<'types, 'arena>] {
        self.elements
    }
}

#[derive(Debug)]
pub struct HostFunction<'types, 'arena> {
    tag: TypeTag<'types>,
    name: &'arena str,
    arity: usize,
}

impl<'arena> HostFunction<'_, 'arena> {
    pub fn name(&self) -> &'arena str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

#[derive(Debug)]
pub struct HostObject<'types, 'arena> {
    tag: TypeTag<'types>,
    fields: &'arena [(&'arena str, Value<'types, 'arena>)],
}

impl<'types, 'arena> HostObject<'types, 'arena> {
    pub fn fields(&self) -> &'arena [(&'arena str, Value<'types, 'arena>)] {
        self.fields
    }

    pub fn field(&self, name: &str) -> Option<Value<'types, 'arena>> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

/// A value as the host sees it.
///
/// Primitives are immediate. Arrays, functions and objects live in an arena
/// and have reference identity; they are the only values that can carry a
/// [`TypeTag`].
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use rtt_values::{Value, ValueBuilder};
///
/// let arena = Bump::new();
/// let b = ValueBuilder::new(&arena);
///
/// let v: Value<'_, '_> = Value::array(&b, [Value::Number(1.0), Value::str(&b, "two")]);
/// assert_eq!(v.to_string(), r#"[1, "two"]"#);
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Value<'types, 'arena> {
    Null,
    Bool(bool),
    Number(f64),
    Str(&'arena str),
    Array(&'arena HostArray<'types, 'arena>),
    Function(&'arena HostFunction<'types, 'arena>),
    Object(&'arena HostObject<'types, 'arena>),
}

impl<'types, 'arena> Value<'types, 'arena> {
    pub fn str(builder: &ValueBuilder<'arena>, s: &str) -> Self {
        Value::Str(builder.arena.alloc_str(s))
    }

    pub fn array(
        builder: &ValueBuilder<'arena>,
        elements: impl IntoIterator<Item = Self, IntoIter: ExactSizeIterator>,
    ) -> Self {
        let elements = builder.arena.alloc_slice_fill_iter(elements);
        Value::Array(builder.arena.alloc(HostArray {
            tag: TypeTag::default(),
            elements,
        }))
    }

    pub fn function(builder: &ValueBuilder<'arena>, name: &str, arity: usize) -> Self {
        let name = builder.arena.alloc_str(name);
        Value::Function(builder.arena.alloc(HostFunction {
            tag: TypeTag::default(),
            name,
            arity,
        }))
    }

    pub fn object<'a>(
        builder: &ValueBuilder<'arena>,
        fields: impl IntoIterator<Item = (&'a str, Self), IntoIter: ExactSizeIterator>,
    ) -> Self {
        let arena = builder.arena;
        let fields = arena.alloc_slice_fill_iter(
            fields
                .into_iter()
                .map(|(name, value)| (&*arena.alloc_str(name), value)),
        );
        Value::Object(arena.alloc(HostObject {
            tag: TypeTag::default(),
            fields,
        }))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The value's type tag slot, if it is a heap value.
    pub fn tag(&self) -> Option<&'arena TypeTag<'types>> {
        match *self {
            Value::Array(array) => Some(&array.tag),
            Value::Function(function) => Some(&function.tag),
            Value::Object(object) => Some(&object.tag),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => None,
        }
    }

    /// Host identity: heap values compare by reference, primitives by value.
    pub fn identical(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => core::ptr::eq(a, b),
            (Value::Function(a), Value::Function(b)) => core::ptr::eq(a, b),
            (Value::Object(a), Value::Object(b)) => core::ptr::eq(a, b),
            _ => false,
        }
    }
}

/// Diagnostic rendering, used in internal error messages.
impl fmt::Display for Value<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Array(array) => {
                f.write_str("[")?;
                for (i, element) in array.elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Value::Function(function) => write!(f, "Closure '{}'", function.name),
            Value::Object(object) => match object.tag.get() {
                Some(ty) => write!(f, "Instance of '{ty}'"),
                None => {
                    f.write_str("{")?;
                    for (i, (name, value)) in object.fields.iter().enumerate() {
                        if i > 0 {
                            f.write_str(",")?;
                        }
                        write!(f, " {name}: {value}")?;
                    }
                    if !object.fields.is_empty() {
                        f.write_str(" ")?;
                    }
                    f.write_str("}")
                }
            },
        }
    }
}

/// Allocates host heap values in an arena.
#[derive(Copy, Clone)]
pub struct ValueBuilder<'arena> {
    arena: &'arena Bump,
}

impl<'arena> ValueBuilder<'arena> {
    pub fn new(arena: &'arena Bump) -> Self {
        Self { arena }
    }
}

impl fmt::Debug for ValueBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueBuilder")
            .field("arena", &(self.arena as *const Bump))
            .finish()
    }
}
