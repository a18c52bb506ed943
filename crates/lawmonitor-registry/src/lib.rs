//! Law registry gateway.
//!
//! [`LawRegistry`] is the contract the monitoring engine depends on. The
//! `http` feature (on by default) adds [`RegistryClient`], which talks to the
//! national law registry's DRF endpoints and decodes their XML.

mod error;
pub mod xml;

#[cfg(feature = "http")]
mod http;

pub use error::RegistryError;
#[cfg(feature = "http")]
pub use http::RegistryClient;

use async_trait::async_trait;
use lawmonitor_core::{LawDetail, LawSummary};

/// Lookup service for the authoritative version of laws.
#[async_trait]
pub trait LawRegistry: Send + Sync {
    /// Search laws by name. An empty result is not an error.
    async fn search_laws(&self, query: &str) -> Result<Vec<LawSummary>, RegistryError>;

    /// Fetch the current version of one law by serial number.
    ///
    /// `Ok(None)` means the registry does not know the law.
    async fn law_detail(&self, law_id: &str) -> Result<Option<LawDetail>, RegistryError>;
}
