//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Resource name used in `https://<resource>/<endpoint>` callback URLs
pub const DEFAULT_RESOURCE_NAME: &str = "nui-menu";

/// Per-request timeout for host callbacks
pub const DEFAULT_POST_TIMEOUT_MS: u64 = 5000;

/// Bound of the fire-and-forget post queue
pub const DEFAULT_POST_QUEUE_CAPACITY: usize = 100;

/// Bound of the list of open requests waiting for the active surface to close
pub const DEFAULT_MAX_PENDING_OPENS: usize = 4;

/// Placeholder of the menu search box
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";

pub const DEFAULT_ALLOW_ITEM_MARKUP: bool = false;

/// Config file location, relative to the home directory
pub const DEFAULT_CONFIG_PATH: &str = "~/.nui-menu/config.json";

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "NUI_MENU_CONFIG";
