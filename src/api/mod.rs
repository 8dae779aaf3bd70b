pub mod error;
pub mod images;

pub use error::ApiError;

use rocket::http::{Method, Status};
use rocket::{Catcher, Request, Route};

pub fn routes() -> Vec<Route> {
    routes![
        images::get_image,
        images::put_image,
        images::delete_image,
        images::get_without_key,
        images::put_without_key,
        images::delete_without_key,
        images::post_not_allowed,
        images::patch_not_allowed,
        images::options_not_allowed,
        images::head_not_allowed,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, default_catcher]
}

// TRACE and CONNECT cannot be routed, so they end up here too
#[catch(404)]
fn not_found(req: &Request<'_>) -> ApiError {
    match req.method() {
        Method::Get | Method::Put | Method::Delete => {
            ApiError::NotFound(format!("No image route for '{}'", req.uri().path()))
        }
        _ => ApiError::MethodNotAllowed,
    }
}

#[catch(default)]
fn default_catcher(status: Status, _: &Request<'_>) -> (Status, String) {
    (status, status.reason().unwrap_or("Error").to_string())
}
