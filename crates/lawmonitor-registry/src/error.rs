use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("XML parse error: {0}")]
    Xml(String),
    #[error("registry request timed out after {0:?}")]
    Timeout(Duration),
}

impl From<quick_xml::Error> for RegistryError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Xml(e.to_string())
    }
}
