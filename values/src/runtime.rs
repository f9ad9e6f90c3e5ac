use alloc::string::{String, ToString};
use bumpalo::Bump;
use once_cell::unsync::OnceCell;
use rtt_types::{Descriptor, RttError, TypeRegistry};

use crate::{RuntimeOptions, Value};

/// Process-wide type runtime: the registry plus the descriptors host values
/// fall back to.
///
/// The runtime implements the tagging API used by compiled constructors
/// and the instance check used by `is`/`as` sites.
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use rtt_values::{Runtime, RuntimeOptions, Value, ValueBuilder};
///
/// let types = Bump::new();
/// let rt = Runtime::new(RuntimeOptions::default(), &types);
///
/// let values = Bump::new();
/// let b = ValueBuilder::new(&values);
///
/// let point_ty = rt.registry().class("Point", None);
/// let point = rt.set_type_info(Value::object(&b, [("x", Value::Number(1.0))]), point_ty);
///
/// assert!(rt.implemented_by(point_ty, point));
/// assert!(!rt.implemented_by(point_ty, Value::Number(1.0)));
/// assert_eq!(rt.get_type_info(Value::Number(1.0)), rt.number_type());
/// ```
pub struct Runtime<'types> {
    registry: &'types TypeRegistry<'types>,
    options: RuntimeOptions,
    callable: Descriptor<'types>,
    natives: NativeTypes<'types>,
}

/// Host primitive descriptors, built on first use.
#[derive(Default)]
struct NativeTypes<'types> {
    array: OnceCell<Descriptor<'types>>,
    number: OnceCell<Descriptor<'types>>,
    string: OnceCell<Descriptor<'types>>,
    boolean: OnceCell<Descriptor<'types>>,
}

impl<'types> Runtime<'types> {
    /// Create a runtime with a fresh registry allocated in `arena`.
    pub fn new(options: RuntimeOptions, arena: &'types Bump) -> Self {
        let registry = TypeRegistry::with_capacity(arena, options.registry_capacity);
        Self::with_registry(options, registry)
    }

    /// Create a runtime on top of an existing registry.
    pub fn with_registry(options: RuntimeOptions, registry: &'types TypeRegistry<'types>) -> Self {
        // Untagged host functions report the generic callable interface.
        let callable = registry.function();
        tracing::trace!(callable = callable.type_key(), "runtime initialized");
        Self {
            registry,
            options,
            callable,
            natives: NativeTypes::default(),
        }
    }

    pub fn registry(&self) -> &'types TypeRegistry<'types> {
        self.registry
    }

    pub fn options(&self) -> &RuntimeOptions {
        &self.options
    }

    /// Descriptor of untagged host functions.
    pub fn callable_type(&self) -> Descriptor<'types> {
        self.callable
    }

    pub fn array_type(&self) -> Descriptor<'types> {
        self.native(&self.natives.array, self.options.array_class)
    }

    pub fn number_type(&self) -> Descriptor<'types> {
        self.native(&self.natives.number, self.options.number_class)
    }

    pub fn string_type(&self) -> Descriptor<'types> {
        self.native(&self.natives.string, self.options.string_class)
    }

    pub fn boolean_type(&self) -> Descriptor<'types> {
        self.native(&self.natives.boolean, self.options.boolean_class)
    }

    fn native(&self, cell: &OnceCell<Descriptor<'types>>, name: &str) -> Descriptor<'types> {
        *cell.get_or_init(|| {
            let ty = self.registry.class(name, None);
            tracing::trace!(type_key = ty.type_key(), "native descriptor");
            ty
        })
    }

    /// Attach `descriptor` to `value` and return the value.
    ///
    /// Primitives and `null` cannot carry a tag, so for them this does
    /// nothing.
    pub fn set_type_info<'arena>(
        &self,
        value: Value<'types, 'arena>,
        descriptor: Descriptor<'types>,
    ) -> Value<'types, 'arena> {
        match value.tag() {
            Some(tag) => tag.set(descriptor),
            None => {
                tracing::debug!(%value, %descriptor, "ignoring type tag on primitive");
            }
        }
        value
    }

    /// The descriptor of `value`: its tag if it has one, the callable
    /// interface for untagged functions, otherwise whatever can be inferred
    /// from the host value itself.
    pub fn get_type_info(&self, value: Value<'types, '_>) -> Descriptor<'types> {
        if let Some(ty) = value.tag().and_then(|tag| tag.get()) {
            return ty;
        }
        match value {
            Value::Function(_) => self.callable,
            _ => self.get_native_type_info(value),
        }
    }

    /// Forget the tag of `value`, if it has one.
    pub fn remove_type_info(&self, value: Value<'types, '_>) {
        if let Some(tag) = value.tag() {
            tag.clear();
        }
    }

    /// Infer a descriptor from the host representation alone.
    ///
    /// Arrays and primitives map to their canonical native descriptors;
    /// anything else is the placeholder.
    pub fn get_native_type_info(&self, value: Value<'types, '_>) -> Descriptor<'types> {
        match value {
            Value::Array(_) => self.array_type(),
            Value::Number(_) => self.number_type(),
            Value::Str(_) => self.string_type(),
            Value::Bool(_) => self.boolean_type(),
            Value::Null | Value::Function(_) | Value::Object(_) => self.registry.placeholder(),
        }
    }

    /// Whether `value` is an instance of `descriptor`.
    ///
    /// `null` is only an instance of `Object`, `dynamic` and the
    /// placeholder.
    pub fn implemented_by(&self, descriptor: Descriptor<'types>, value: Value<'types, '_>) -> bool {
        if value.is_null() {
            return descriptor.is_object() || descriptor.is_universal();
        }
        descriptor.implemented_by_type(self.get_type_info(value))
    }

    /// The type arguments `value`'s type supplies to `class_key`.
    ///
    /// Asking for a class the value's type never declared is an internal
    /// error: compiled code only does so after proving the value is an
    /// instance of that class.
    pub fn get_type_args_for(
        &self,
        value: Value<'types, '_>,
        class_key: &str,
    ) -> Result<&'types [Descriptor<'types>], RttError> {
        let ty = self.get_type_info(value);
        match ty.implemented(class_key) {
            Some(view) => Ok(view.type_args().unwrap_or_default()),
            None => {
                tracing::debug!(%value, type_key = ty.type_key(), class_key, "missing implemented type");
                Err(RttError::MissingImplementedType {
                    class_key: String::from(class_key),
                    value: value.to_string(),
                })
            }
        }
    }
}

impl core::fmt::Debug for Runtime<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Runtime")
            .field("registry", self.registry)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
