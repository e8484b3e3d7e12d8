pub mod definition;
pub mod validation;

pub use definition::{Behavior, Capability, CapabilityFile, Prerequisite};
pub use validation::{is_kebab_case, validate_capability_file};
