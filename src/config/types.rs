//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

/// What to do with an open request for one surface while the other is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusyPolicy {
    /// Hold the request and replay it once the active surface closes
    #[default]
    Queue,
    /// Drop the request
    Reject,
}

/// Overlay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Host resource name used to build callback URLs
    #[serde(default = "default_resource_name")]
    pub resource_name: String,
    /// Full callback URL base, overriding `https://<resourceName>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_base: Option<String>,
    /// Per-request timeout in milliseconds (default: 5000)
    #[serde(default = "default_post_timeout_ms")]
    pub post_timeout_ms: u64,
    /// Capacity of the outbound post queue (default: 100)
    #[serde(default = "default_post_queue_capacity")]
    pub post_queue_capacity: usize,
    #[serde(default)]
    pub busy_policy: BusyPolicy,
    /// Maximum number of queued open requests (default: 4)
    #[serde(default = "default_max_pending_opens")]
    pub max_pending_opens: usize,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    /// Insert item header/text verbatim instead of escaping it
    #[serde(default = "default_allow_item_markup")]
    pub allow_item_markup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

fn default_resource_name() -> String {
    DEFAULT_RESOURCE_NAME.to_string()
}
fn default_post_timeout_ms() -> u64 {
    DEFAULT_POST_TIMEOUT_MS
}
fn default_post_queue_capacity() -> usize {
    DEFAULT_POST_QUEUE_CAPACITY
}
fn default_max_pending_opens() -> usize {
    DEFAULT_MAX_PENDING_OPENS
}
fn default_search_placeholder() -> String {
    DEFAULT_SEARCH_PLACEHOLDER.to_string()
}
fn default_allow_item_markup() -> bool {
    DEFAULT_ALLOW_ITEM_MARKUP
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resource_name: default_resource_name(),
            callback_base: None,
            post_timeout_ms: DEFAULT_POST_TIMEOUT_MS,
            post_queue_capacity: DEFAULT_POST_QUEUE_CAPACITY,
            busy_policy: BusyPolicy::default(),
            max_pending_opens: DEFAULT_MAX_PENDING_OPENS,
            search_placeholder: default_search_placeholder(),
            allow_item_markup: DEFAULT_ALLOW_ITEM_MARKUP,
            log_dir: None,
        }
    }
}

impl Config {
    /// Base URL that endpoint names are appended to, without a trailing slash
    pub fn callback_base_url(&self) -> String {
        match &self.callback_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.resource_name),
        }
    }

    /// Full URL for an endpoint name
    pub fn callback_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.callback_base_url(), endpoint)
    }
}
