use alloc::vec::Vec;
use bitflags::bitflags;
use bumpalo::Bump;
use core::cell::{Cell, RefCell};
use core::{fmt, hash};
use hashbrown::{DefaultHashBuilder, HashMap, HashSet};

/// Arena-resident table of the ancestors a descriptor implements, keyed by
/// the ancestor's `class_key`.
pub(crate) type ImplementedTypes<'types> =
    HashMap<&'types str, Descriptor<'types>, DefaultHashBuilder, &'types Bump>;

/// Descriptors that inherited from this one through
/// [`Descriptor::add_supertype`].
type Subtypes<'types> = HashSet<Descriptor<'types>, DefaultHashBuilder, &'types Bump>;

/// Explicit type arguments of an instantiation. `None` means "this class,
/// unparameterized".
pub type TypeArgs<'types> = Option<&'types [Descriptor<'types>]>;

/// What a descriptor stands for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Every non-null value is-a `Object`.
    Object,

    /// Erased / unannotated positions. Matches and is matched by everything.
    Dynamic,

    /// Values whose type could not be determined. Behaves like `Dynamic`.
    Placeholder,

    /// A class or interface, possibly instantiated with type arguments.
    Class,
}

bitflags! {
    /// Properties of a descriptor computed once when it is created.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct DescriptorFlags: u8 {
        /// Carries an explicit, non-empty argument list.
        const PARAMETERIZED = 1;

        /// A supplier has been run (or is running) for this descriptor.
        const SUPPLIED = 1 << 1;

        /// Registered, but its supplier has not returned yet.
        const WIRING = 1 << 2;
    }
}

/// The storage behind a [`Descriptor`] handle.
///
/// Nodes are only ever created by the registry, which guarantees a single
/// node per `type_key`.
pub struct DescriptorNode<'types> {
    kind: DescriptorKind,
    class_key: &'types str,
    type_key: &'types str,
    type_args: TypeArgs<'types>,
    flags: Cell<DescriptorFlags>,
    implemented: RefCell<ImplementedTypes<'types>>,
    subtypes: RefCell<Subtypes<'types>>,
}

impl<'types> DescriptorNode<'types> {
    pub(crate) fn new(
        arena: &'types Bump,
        kind: DescriptorKind,
        class_key: &'types str,
        type_key: &'types str,
        type_args: TypeArgs<'types>,
    ) -> Self {
        let mut flags = DescriptorFlags::empty();
        flags.set(DescriptorFlags::PARAMETERIZED, type_args.is_some());
        Self {
            kind,
            class_key,
            type_key,
            type_args,
            flags: Cell::new(flags),
            implemented: RefCell::new(HashMap::new_in(arena)),
            subtypes: RefCell::new(HashSet::new_in(arena)),
        }
    }
}

/// Canonical handle to one runtime type.
///
/// Handles are pointer-sized and `Copy`. Two handles are equal if and only
/// if they point at the same node, which the registry guarantees is the
/// case exactly when their `type_key`s are equal.
#[derive(Copy, Clone)]
pub struct Descriptor<'types>(&'types DescriptorNode<'types>);

static_assertions::assert_eq_size!(Descriptor<'static>, usize);

impl<'types> Descriptor<'types> {
    pub(crate) fn from_node(node: &'types DescriptorNode<'types>) -> Self {
        Self(node)
    }

    pub fn kind(self) -> DescriptorKind {
        self.0.kind
    }

    /// Identity of the unparameterized class.
    pub fn class_key(self) -> &'types str {
        self.0.class_key
    }

    /// Identity of this exact instantiation.
    pub fn type_key(self) -> &'types str {
        self.0.type_key
    }

    pub fn type_args(self) -> TypeArgs<'types> {
        self.0.type_args
    }

    pub fn flags(self) -> DescriptorFlags {
        self.0.flags.get()
    }

    pub fn is_object(self) -> bool {
        self.kind() == DescriptorKind::Object
    }

    pub fn is_dynamic(self) -> bool {
        self.kind() == DescriptorKind::Dynamic
    }

    pub fn is_placeholder(self) -> bool {
        self.kind() == DescriptorKind::Placeholder
    }

    /// `dynamic` or the placeholder: matches and is matched by everything.
    pub fn is_universal(self) -> bool {
        matches!(
            self.kind(),
            DescriptorKind::Dynamic | DescriptorKind::Placeholder
        )
    }

    /// Whether construction of this descriptor has finished wiring its
    /// supertype edges.
    pub fn is_wired(self) -> bool {
        !self.flags().contains(DescriptorFlags::WIRING)
    }

    pub fn is_parameterized(self) -> bool {
        self.flags().contains(DescriptorFlags::PARAMETERIZED)
    }

    pub(crate) fn set_flag(self, flag: DescriptorFlags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.0.flags.set(flags);
    }

    /// This descriptor viewed as an instance of `class_key`, if it
    /// implements that class at all.
    pub fn implemented(self, class_key: &str) -> Option<Descriptor<'types>> {
        self.0.implemented.borrow().get(class_key).copied()
    }

    /// Snapshot of every ancestor this descriptor implements (itself
    /// included), ordered by class key.
    pub fn implemented_types(self) -> Vec<Descriptor<'types>> {
        let mut types: Vec<_> = self.0.implemented.borrow().values().copied().collect();
        types.sort_unstable_by_key(|ty| ty.class_key());
        types
    }

    /// Records `ancestor` as the view of this descriptor under the
    /// ancestor's class key, replacing any previous entry.
    ///
    /// Descriptors that already inherit from this one pick the new entry up
    /// unless they have their own view of that class.
    pub fn add_implemented(self, ancestor: Descriptor<'types>) {
        self.0
            .implemented
            .borrow_mut()
            .insert(ancestor.class_key(), ancestor);
        self.propagate(&[ancestor]);
    }

    /// Records `ancestor` and everything `ancestor` implements, now or
    /// later.
    ///
    /// Entries already present win: a class's own view of an interface is
    /// more specific than the one inherited through a supertype. The link
    /// stays live, so an ancestor still being wired when this is called
    /// passes on whatever it gains afterwards.
    pub fn add_supertype(self, ancestor: Descriptor<'types>) {
        if self == ancestor {
            return;
        }
        ancestor.0.subtypes.borrow_mut().insert(self);
        self.inherit(&ancestor.implemented_types());
    }

    /// Adds the entries whose class key is not present yet and forwards
    /// those to the subtypes.
    fn inherit(self, entries: &[Descriptor<'types>]) {
        let added: Vec<_> = {
            let mut implemented = self.0.implemented.borrow_mut();
            entries
                .iter()
                .copied()
                .filter(|ty| {
                    if implemented.contains_key(ty.class_key()) {
                        return false;
                    }
                    implemented.insert(ty.class_key(), *ty);
                    true
                })
                .collect()
        };
        if !added.is_empty() {
            self.propagate(&added);
        }
    }

    fn propagate(self, entries: &[Descriptor<'types>]) {
        let subtypes: Vec<_> = self.0.subtypes.borrow().iter().copied().collect();
        for subtype in subtypes {
            tracing::trace!(
                ancestor = self.type_key(),
                subtype = subtype.type_key(),
                "propagating implemented types"
            );
            subtype.inherit(entries);
        }
    }
}

impl PartialEq for Descriptor<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.0, other.0)
    }
}

impl Eq for Descriptor<'_> {}

impl hash::Hash for Descriptor<'_> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        core::ptr::hash(self.0, state)
    }
}

impl fmt::Display for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_key())
    }
}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Descriptor")
            .field(&self.kind())
            .field(&self.type_key())
            .finish()
    }
}
