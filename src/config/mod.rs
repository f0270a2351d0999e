// src/config/mod.rs
// Configuration loaded from the environment

pub mod env;

pub use env::{
    ApiKeys, CatalogConfig, ConfigValidation, EnvConfig, LlmConfig, OrderConfig, SearchConfig,
    ServerConfig,
};
