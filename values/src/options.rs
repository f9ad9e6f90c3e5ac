use rtt_types::TypeRegistry;

/// Runtime configuration.
///
/// The class names are the ones compiled code uses for the host's own
/// array and primitive types, so that `is`-checks against them succeed on
/// untagged host values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    /// Class reported for untagged host arrays.
    pub array_class: &'static str,

    /// Class reported for host numbers.
    pub number_class: &'static str,

    /// Class reported for host strings.
    pub string_class: &'static str,

    /// Class reported for host booleans.
    pub boolean_class: &'static str,

    /// Initial capacity of a registry created by [`Runtime::new`](crate::Runtime::new).
    pub registry_capacity: usize,
}

impl Default for RuntimeOptions {
    fn default() -> Self {
        Self {
            array_class: "Array",
            number_class: "Number",
            string_class: "String",
            boolean_class: "Boolean",
            registry_capacity: TypeRegistry::DEFAULT_CAPACITY,
        }
    }
}
