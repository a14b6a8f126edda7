//! Session lifecycle: one managed assistant terminal per project root.

mod command;
mod instance;
mod manager;
mod registry;

pub use command::{VariantLookup, compose, lookup_variant, shell_escape, wrap_for_root};
pub use instance::Instance;
pub use manager::{SessionManager, ToggleOutcome};
pub use registry::InstanceRegistry;
