//! Configuration module — user settings stored beside the vault.

pub mod settings;

pub use settings::Settings;
