use std::sync::Arc;

use lawmonitor_engine::Monitor;
use lawmonitor_registry::RegistryClient;

/// Shared state passed to every handler.
///
/// The relay routes use `registry` directly so the registry's XML reaches the
/// browser untouched; everything else goes through `monitor`.
#[derive(Clone)]
pub struct AppState {
    pub monitor: Monitor,
    pub registry: Arc<RegistryClient>,
}

impl AppState {
    pub fn new(monitor: Monitor, registry: Arc<RegistryClient>) -> Self {
        Self { monitor, registry }
    }
}
