/// Settings module
///
/// User-editable settings (API key, note template, context folders) and
/// their on-disk record.

pub mod store;

pub use store::{Settings, SettingsStore, DEFAULT_TEMPLATE};
