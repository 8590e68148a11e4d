/// JSON site configuration.
pub mod config;
