//! Configuration module - overlay settings
//!
//! This module provides functionality for:
//! - Loading configuration from ~/.nui-menu/config.json (or an explicit path)
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, BusyPolicy)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_MAX_PENDING_OPENS, DEFAULT_POST_QUEUE_CAPACITY, DEFAULT_POST_TIMEOUT_MS,
    DEFAULT_RESOURCE_NAME, DEFAULT_SEARCH_PLACEHOLDER,
};
pub use loader::{default_config_path, load_config_from};
pub use types::{BusyPolicy, Config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
