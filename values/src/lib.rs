//! Host values and the runtime tagging API.
//!
//! Values produced by compiled code carry a hidden [`TypeTag`]; values native
//! to the host (numbers, strings, booleans, arrays, functions) have their
//! descriptor inferred. [`Runtime`] ties both to a
//! [`TypeRegistry`](rtt_types::TypeRegistry) and answers instance checks.

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod options;
mod runtime;
mod value;

pub use options::RuntimeOptions;
pub use runtime::Runtime;
pub use value::{HostArray, HostFunction, HostObject, TypeTag, Value, ValueBuilder};

pub use rtt_types::RttError;
