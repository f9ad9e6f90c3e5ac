//! Runtime type descriptors and the subtype check.
//!
//! This crate provides the canonical runtime representation of types used by
//! compiled code on a host with no native notion of generics or interfaces:
//!
//! - [`Descriptor`]: a `Copy` handle to one (possibly parameterized) type
//! - [`TypeRegistry`]: the arena-backed interning table that builds
//!   descriptors on first request and guarantees one per `type_key`
//! - [`Descriptor::implemented_by_type`]: the covariant subtype check
//!
//! # Example
//!
//! ```
//! use bumpalo::Bump;
//! use rtt_types::{Descriptor, RttError, TypeArgs, TypeRegistry};
//!
//! // class int implements num
//! fn int_supplier<'t>(
//!     reg: &TypeRegistry<'t>,
//!     this: Descriptor<'t>,
//!     _: TypeArgs<'t>,
//! ) -> Result<(), RttError> {
//!     this.add_supertype(reg.class("num", None));
//!     Ok(())
//! }
//!
//! let arena = Bump::new();
//! let reg = TypeRegistry::new(&arena);
//!
//! let int = reg.create("int", Some(&int_supplier), None)?;
//! let num = reg.class("num", None);
//! let box_int = reg.class("Box", Some(&[int]));
//! let box_num = reg.class("Box", Some(&[num]));
//!
//! assert!(box_num.implemented_by_type(box_int));
//! assert!(!box_int.implemented_by_type(box_num));
//! # Ok::<(), RttError>(())
//! ```

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod descriptor;
mod error;
pub mod names;
mod registry;
mod signature;
mod subtype;

pub use descriptor::{Descriptor, DescriptorFlags, DescriptorKind, DescriptorNode, TypeArgs};
pub use error::RttError;
pub use registry::{Supplier, TypeRegistry};
