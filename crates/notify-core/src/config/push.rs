//! Push delivery channel configuration.

use serde::{Deserialize, Serialize};

/// Settings for the background push delivery channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Base URL of the remote notification backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Timeout applied to the periodic `/check` fetch, in seconds.
    #[serde(default = "default_check_timeout")]
    pub check_timeout_seconds: u64,
    /// VAPID public key advertised to subscribing clients.
    #[serde(default)]
    pub vapid_public_key: Option<String>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            check_timeout_seconds: default_check_timeout(),
            vapid_public_key: None,
        }
    }
}

fn default_backend_url() -> String {
    "https://notify.circlepot.app".to_string()
}

fn default_check_timeout() -> u64 {
    10
}
