//! Configuration loading

mod toml_config;

pub use toml_config::TomlConfigRepository;
