//! rtt - runtime type identity and subtype checks for compiled code
//!
//! # Overview
//!
//! Compiled programs targeting a host with no native generics, interfaces
//! or `is`/`as` checks embed this runtime to answer two questions:
//!
//! - Is a value of type `B` usable where type `A` is required?
//! - What is the type of this value, whether it was built by compiled code
//!   or is native to the host (numbers, strings, booleans, arrays,
//!   functions)?
//!
//! Types are canonical [`Descriptor`]s interned by a [`TypeRegistry`];
//! values are tagged with, or inferred to have, a descriptor by a
//! [`Runtime`].
//!
//! # Quick Start
//!
//! ```
//! use bumpalo::Bump;
//! use rtt::{Descriptor, RttError, Runtime, RuntimeOptions, TypeArgs, TypeRegistry, Value, ValueBuilder};
//!
//! // class List<E> implements Iterable<E>
//! fn list_supplier<'t>(
//!     reg: &TypeRegistry<'t>,
//!     this: Descriptor<'t>,
//!     args: TypeArgs<'t>,
//! ) -> Result<(), RttError> {
//!     let e = reg.get_type_arg(args, 0)?;
//!     this.add_supertype(reg.class("Iterable", Some(&[e])));
//!     Ok(())
//! }
//!
//! let types = Bump::new();
//! let rt = Runtime::new(RuntimeOptions::default(), &types);
//! let reg = rt.registry();
//!
//! let string = reg.class("String", None);
//! let list_string = reg.create("List", Some(&list_supplier), Some(&[string]))?;
//!
//! // A generated constructor tags the new instance.
//! let values = Bump::new();
//! let b = ValueBuilder::new(&values);
//! let names = rt.set_type_info(Value::array(&b, [Value::str(&b, "ada")]), list_string);
//!
//! let iterable_string = reg.class("Iterable", Some(&[string]));
//! assert!(rt.implemented_by(iterable_string, names));
//! assert_eq!(rt.get_type_args_for(names, "Iterable")?, &[string]);
//! # Ok::<(), RttError>(())
//! ```

pub use rtt_types::{
    Descriptor, DescriptorFlags, DescriptorKind, RttError, Supplier, TypeArgs, TypeRegistry, names,
};
pub use rtt_values::{
    HostArray, HostFunction, HostObject, Runtime, RuntimeOptions, TypeTag, Value, ValueBuilder,
};
