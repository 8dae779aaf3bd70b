#[macro_use]
extern crate rocket;

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod upstream;

use std::io;

use rocket::figment::Figment;
use rocket::{Build, Rocket};
use thiserror::Error;

use cache::ImageCache;
use config::AppConfig;
use upstream::{UpstreamClient, UpstreamError};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to create cache directory: {0}")]
    CacheDir(#[from] io::Error),

    #[error("Failed to build upstream client: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Prepare the cache directory and assemble the Rocket instance.
pub async fn build(figment: Figment, config: AppConfig) -> Result<Rocket<Build>, StartupError> {
    let image_cache = ImageCache::new(config.cache_dir.clone());
    image_cache.init().await?;
    log::info!("Cache directory ready: {}", image_cache.dir().display());

    let upstream = UpstreamClient::new(&config.upstream_url, config.upstream_timeout)?;
    log::info!(
        "Upstream {} with miss policy '{}'",
        upstream.base_url(),
        config.miss_policy.as_str()
    );

    Ok(rocket::custom(figment)
        .manage(image_cache)
        .manage(upstream)
        .manage(config)
        .mount("/", api::routes())
        .register("/", api::catchers()))
}
