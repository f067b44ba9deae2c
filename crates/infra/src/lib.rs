//! Infrastructure layer: in-memory catalog and stores, configuration loading.

pub mod catalog;
pub mod config;
pub mod store;

pub use catalog::InMemoryCatalog;
pub use config::{load_field_rules, load_settings, settings_from_env};
pub use store::{InMemoryAssignmentStore, InMemoryAttributeValueStore};
