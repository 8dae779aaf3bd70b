use rocket::data::{Data, ToByteUnit};
use rocket::http::{ContentType, Status};
use rocket::response::{self, Responder, Response};
use rocket::{Request, State};
use std::io::Cursor;

use crate::api::ApiError;
use crate::cache::{CacheKey, ImageCache, KeyError};
use crate::config::{AppConfig, MissPolicy};
use crate::upstream::UpstreamClient;

pub struct ImageResponse {
    pub data: Vec<u8>,
}

impl<'r> Responder<'r, 'static> for ImageResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        Response::build()
            .header(ContentType::JPEG)
            .sized_body(self.data.len(), Cursor::new(self.data))
            .ok()
    }
}

#[get("/<key>")]
pub async fn get_image(
    key: Result<CacheKey, KeyError>,
    cache: &State<ImageCache>,
    upstream: &State<UpstreamClient>,
    config: &State<AppConfig>,
) -> Result<ImageResponse, ApiError> {
    let key = key?;

    // Check cache first
    if let Some(data) = cache.get_image(&key).await? {
        log::info!("Served from cache: {}", cache.path_for(&key).display());
        return Ok(ImageResponse { data });
    }

    if config.miss_policy == MissPolicy::NotFound {
        log::info!("Cache miss for '{}', upstream fetch disabled", key);
        return Err(ApiError::NotFound(format!("Image '{}' is not cached", key)));
    }

    log::info!("Cache miss, fetching {}", upstream.image_url(key.as_str()));

    match upstream.fetch_image(key.as_str()).await {
        Ok(data) => {
            cache.store_image(&key, &data).await?;
            log::info!("Stored in cache: {}", cache.path_for(&key).display());
            Ok(ImageResponse { data })
        }
        Err(err) => {
            log::warn!("Upstream fetch for '{}' failed: {}", key, err);
            Err(ApiError::NotFound(format!("Image '{}' not found upstream", key)))
        }
    }
}

#[put("/<key>", data = "<data>")]
pub async fn put_image(
    key: Result<CacheKey, KeyError>,
    data: Data<'_>,
    cache: &State<ImageCache>,
    config: &State<AppConfig>,
) -> Result<(Status, &'static str), ApiError> {
    let key = key?;

    let body = data.open(config.max_image_size.bytes()).into_bytes().await?;
    if !body.is_complete() {
        return Err(ApiError::PayloadTooLarge(config.max_image_size));
    }

    cache.store_image(&key, &body.into_inner()).await?;
    log::info!("Added to cache: {}", cache.path_for(&key).display());

    Ok((Status::Created, "Image stored in cache"))
}

#[delete("/<key>")]
pub async fn delete_image(
    key: Result<CacheKey, KeyError>,
    cache: &State<ImageCache>,
) -> Result<(Status, &'static str), ApiError> {
    let key = key?;

    if cache.remove_image(&key).await? {
        log::info!("Removed from cache: {}", cache.path_for(&key).display());
        Ok((Status::Ok, "Image removed from cache"))
    } else {
        Err(ApiError::NotFound(format!("Image '{}' is not cached", key)))
    }
}

// Requests without a code get a usage hint
#[get("/")]
pub fn get_without_key() -> ApiError {
    ApiError::MissingKey
}

#[put("/")]
pub fn put_without_key() -> ApiError {
    ApiError::MissingKey
}

#[delete("/")]
pub fn delete_without_key() -> ApiError {
    ApiError::MissingKey
}

#[post("/<_..>")]
pub fn post_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[patch("/<_..>")]
pub fn patch_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[options("/<_..>")]
pub fn options_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[head("/<_..>")]
pub fn head_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
