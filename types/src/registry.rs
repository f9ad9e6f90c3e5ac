use alloc::vec::Vec;
use bumpalo::Bump;
use core::cell::RefCell;
use core::fmt;
use hashbrown::{DefaultHashBuilder, HashMap};

use crate::descriptor::DescriptorNode;
use crate::names::{self, build_key};
use crate::{Descriptor, DescriptorFlags, DescriptorKind, RttError, TypeArgs};

type Entries<'types> = HashMap<&'types str, Descriptor<'types>, DefaultHashBuilder, &'types Bump>;

/// Callback that wires the supertype/interface edges of a freshly
/// registered descriptor.
///
/// It receives the registry (to build each ancestor, substituting from the
/// type arguments), the new descriptor, and that descriptor's arguments.
pub type Supplier<'s, 'types> =
    dyn Fn(&TypeRegistry<'types>, Descriptor<'types>, TypeArgs<'types>) -> Result<(), RttError> + 's;

/// Canonicalizing store of runtime type descriptors.
///
/// Maps each `type_key` to its unique [`Descriptor`]. The registry and
/// everything it hands out live in a single arena: entries are only ever
/// added, never removed, and no descriptor is freed before the arena.
///
/// A fresh registry already holds the three well-known descriptors:
/// [`object`](Self::object), [`dynamic`](Self::dynamic) and
/// [`placeholder`](Self::placeholder).
///
/// # Example
///
/// ```
/// use bumpalo::Bump;
/// use rtt_types::TypeRegistry;
///
/// let arena = Bump::new();
/// let reg = TypeRegistry::new(&arena);
///
/// let string = reg.class("String", None);
/// let a = reg.class("List", Some(&[string]));
/// let b = reg.class("List", Some(&[string]));
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "List<String>");
/// ```
pub struct TypeRegistry<'types> {
    arena: &'types Bump,
    entries: RefCell<Entries<'types>>,
    object: Descriptor<'types>,
    dynamic: Descriptor<'types>,
    placeholder: Descriptor<'types>,
}

impl<'types> TypeRegistry<'types> {
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a registry in `arena`, pre-populated with the well-known
    /// descriptors.
    pub fn new(arena: &'types Bump) -> &'types Self {
        Self::with_capacity(arena, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(arena: &'types Bump, capacity: usize) -> &'types Self {
        let alloc_singleton = |kind, name: &'static str| {
            Descriptor::from_node(arena.alloc(DescriptorNode::new(arena, kind, name, name, None)))
        };

        let object = alloc_singleton(DescriptorKind::Object, names::OBJECT);
        object.add_implemented(object);

        let dynamic = alloc_singleton(DescriptorKind::Dynamic, names::DYNAMIC);
        let placeholder = alloc_singleton(DescriptorKind::Placeholder, names::PLACEHOLDER);
        for ty in [dynamic, placeholder] {
            ty.add_implemented(ty);
            ty.add_implemented(object);
        }

        let mut entries = HashMap::with_capacity_in(capacity, arena);
        for ty in [object, dynamic, placeholder] {
            entries.insert(ty.type_key(), ty);
        }

        arena.alloc(Self {
            arena,
            entries: RefCell::new(entries),
            object,
            dynamic,
            placeholder,
        })
    }

    /// Root of the "is-a" hierarchy.
    pub fn object(&self) -> Descriptor<'types> {
        self.object
    }

    /// The universal, erased type.
    pub fn dynamic(&self) -> Descriptor<'types> {
        self.dynamic
    }

    /// Fallback for values whose type cannot be determined.
    pub fn placeholder(&self) -> Descriptor<'types> {
        self.placeholder
    }

    pub fn lookup(&self, type_key: &str) -> Option<Descriptor<'types>> {
        self.entries.borrow().get(type_key).copied()
    }

    pub(crate) fn register(&self, type_key: &'types str, descriptor: Descriptor<'types>) {
        let previous = self.entries.borrow_mut().insert(type_key, descriptor);
        debug_assert!(previous.is_none(), "descriptor `{type_key}` registered twice");
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Snapshot of every registered descriptor, ordered by type key.
    pub fn descriptors(&self) -> Vec<Descriptor<'types>> {
        let mut all: Vec<_> = self.entries.borrow().values().copied().collect();
        all.sort_unstable_by_key(|ty| ty.type_key());
        all
    }

    /// Obtain the canonical descriptor for `name` instantiated with
    /// `type_args`, building and registering it on first request.
    ///
    /// The well-known names are never parameterized: asking for `Object`,
    /// `dynamic` or `$placeholder` always yields the singleton. A new
    /// descriptor is registered *before* `supplier` runs, so a supplier that
    /// (directly or transitively) needs the descriptor under construction
    /// finds it in the registry instead of recursing forever.
    ///
    /// Each descriptor's supplier runs at most once, on the first `create`
    /// that brings one. A descriptor first obtained without a supplier
    /// (through [`class`](Self::class), or inferred for a host value) gets
    /// its edges when its class is declared later.
    ///
    /// Errors only come from the supplier. The descriptor stays registered
    /// in that case; internal errors are not meant to be recovered from.
    pub fn create(
        &self,
        name: &str,
        supplier: Option<&Supplier<'_, 'types>>,
        type_args: Option<&[Descriptor<'types>]>,
    ) -> Result<Descriptor<'types>, RttError> {
        let (this, fresh) = self.intern(name, type_args);
        let pending = this.kind() == DescriptorKind::Class
            && !this.flags().contains(DescriptorFlags::SUPPLIED);
        let Some(supplier) = supplier.filter(|_| pending) else {
            return Ok(this);
        };
        if !fresh {
            tracing::debug!(type_key = this.type_key(), "wiring descriptor declared late");
        }

        this.set_flag(DescriptorFlags::SUPPLIED | DescriptorFlags::WIRING, true);
        let wired = supplier(self, this, this.type_args());
        this.set_flag(DescriptorFlags::WIRING, false);

        if let Err(err) = &wired {
            tracing::debug!(type_key = this.type_key(), error = %err, "supplier failed");
        }
        wired.map(|()| this)
    }

    /// [`create`](Self::create) without a supplier, which cannot fail.
    ///
    /// The resulting descriptor implements only itself and `Object` unless
    /// edges are added later with [`Descriptor::add_supertype`].
    pub fn class(&self, name: &str, type_args: Option<&[Descriptor<'types>]>) -> Descriptor<'types> {
        self.intern(name, type_args).0
    }

    /// Returns the canonical descriptor and whether it was just built.
    fn intern(
        &self,
        name: &str,
        type_args: Option<&[Descriptor<'types>]>,
    ) -> (Descriptor<'types>, bool) {
        match name {
            names::OBJECT => return (self.object, false),
            names::DYNAMIC => return (self.dynamic, false),
            names::PLACEHOLDER => return (self.placeholder, false),
            _ => {}
        }

        let type_args = type_args.filter(|args| !args.is_empty());
        let type_key = build_key(name, type_args);
        if let Some(existing) = self.lookup(&type_key) {
            if !existing.is_wired() {
                tracing::debug!(
                    type_key = existing.type_key(),
                    "forward reference to descriptor under construction"
                );
            }
            return (existing, false);
        }

        let class_key = match self.lookup(name) {
            Some(class) => class.class_key(),
            None => &*self.arena.alloc_str(name),
        };
        let type_key: &'types str = self.arena.alloc_str(&type_key);
        let type_args = type_args.map(|args| self.alloc_type_args(args.iter().copied()));

        let node = self.arena.alloc(DescriptorNode::new(
            self.arena,
            DescriptorKind::Class,
            class_key,
            type_key,
            type_args,
        ));
        let this = Descriptor::from_node(node);
        this.add_implemented(this);
        this.add_implemented(self.object);

        self.register(type_key, this);
        tracing::trace!(type_key, "registered descriptor");
        (this, true)
    }

    /// Copy an argument list into the registry's arena.
    pub fn alloc_type_args(
        &self,
        iter: impl IntoIterator<Item = Descriptor<'types>, IntoIter: ExactSizeIterator>,
    ) -> &'types [Descriptor<'types>] {
        self.arena.alloc_slice_fill_iter(iter)
    }

    /// The `index`-th explicit type argument.
    ///
    /// A missing (or empty) argument list means the arguments were erased,
    /// so every position reads as [`dynamic`](Self::dynamic). Indexing past
    /// the end of a non-empty list is an internal error.
    pub fn get_type_arg(
        &self,
        type_args: Option<&[Descriptor<'types>]>,
        index: usize,
    ) -> Result<Descriptor<'types>, RttError> {
        match type_args {
            None | Some([]) => Ok(self.dynamic),
            Some(args) => args.get(index).copied().ok_or_else(|| {
                tracing::debug!(index, len = args.len(), "type argument out of range");
                RttError::TypeArgOutOfRange {
                    index,
                    len: args.len(),
                }
            }),
        }
    }
}

impl fmt::Debug for TypeRegistry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("arena", &(self.arena as *const Bump))
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
