use alloc::string::String;
use thiserror::Error;

/// Internal consistency failures.
///
/// These never describe a bug in the source program: they signal that the
/// generated code and this runtime library disagree about a type's shape.
/// Negative subtype answers are plain `false`, not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RttError {
    /// A value was asked for the type arguments of a class it never
    /// declared.
    #[error("internal error: `{value}` does not implement `{class_key}`")]
    MissingImplementedType { class_key: String, value: String },

    /// A type argument index beyond an explicitly supplied argument list.
    #[error("internal error: type argument {index} requested, but only {len} supplied")]
    TypeArgOutOfRange { index: usize, len: usize },
}
