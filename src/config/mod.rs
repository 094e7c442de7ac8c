//! Project configuration (`.credvault.toml`).

pub mod settings;

pub use settings::Settings;
