use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_UPSTREAM_URL: &str = "https://http.cat";

// 32 MiB
pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 32 * 1024 * 1024;

/// What a GET does when the requested key is not on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Fetch the image from upstream, store it and serve it.
    #[default]
    FetchThrough,
    /// Answer 404 without contacting upstream.
    NotFound,
}

impl MissPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissPolicy::FetchThrough => "fetch_through",
            MissPolicy::NotFound => "not_found",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub address: String,
    pub cache_dir: PathBuf,
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,
    #[serde(default)]
    pub miss_policy: MissPolicy,
    /// Seconds; no deadline when unset.
    #[serde(default)]
    pub upstream_timeout: Option<u64>,
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u64,
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_max_image_size() -> u64 {
    DEFAULT_MAX_IMAGE_SIZE
}

impl AppConfig {
    pub fn new(address: impl Into<String>, port: u16, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            port,
            address: address.into(),
            cache_dir: cache_dir.into(),
            upstream_url: default_upstream_url(),
            miss_policy: MissPolicy::default(),
            upstream_timeout: None,
            max_image_size: default_max_image_size(),
        }
    }
}
