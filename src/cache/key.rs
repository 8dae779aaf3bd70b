use std::fmt;

use rocket::request::FromParam;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("No status code given")]
    Empty,

    #[error("Invalid status code: {0}")]
    Invalid(String),
}

/// An image code that names a file directly inside the cache directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn parse(raw: &str) -> Result<Self, KeyError> {
        if raw.is_empty() {
            return Err(KeyError::Empty);
        }

        if raw == "." || raw == ".." || raw.contains(['/', '\\', '\0']) {
            return Err(KeyError::Invalid(raw.to_string()));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.jpg", self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'a> FromParam<'a> for CacheKey {
    type Error = KeyError;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        CacheKey::parse(param)
    }
}
