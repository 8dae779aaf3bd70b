mod image;
mod key;

pub use image::ImageCache;
pub use key::{CacheKey, KeyError};
