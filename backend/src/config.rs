//! Portal configuration loaded via OrthoConfig.
//!
//! The original deployment read its namespace and credentials from ambient
//! process-wide globals. Here they form an explicit settings object handed to
//! each adapter at construction.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Deployment identifier used when none is configured.
pub const DEFAULT_DEPLOYMENT_ID: &str = "default-app-id";

/// Configuration values for the portal's external collaborators.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMREG")]
pub struct PortalSettings {
    /// Deployment identifier namespacing every collection path.
    #[ortho_config(default = "default-app-id".to_owned())]
    pub deployment_id: String,
    /// Opaque credential blob authenticating the store and auth clients.
    pub backend_credentials: Option<String>,
    /// Optional pre-issued session token consumed during bootstrap sign-in.
    pub initial_auth_token: Option<String>,
}

impl Default for PortalSettings {
    fn default() -> Self {
        Self {
            deployment_id: DEFAULT_DEPLOYMENT_ID.to_owned(),
            backend_credentials: None,
            initial_auth_token: None,
        }
    }
}
