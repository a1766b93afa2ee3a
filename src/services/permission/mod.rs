// Permission gate guarding image-capture acquisition

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::core::types::{AuthorizationState, DeviceAuthorization};

/// Platform boundary for camera authorization.
///
/// `status` reflects the current OS-level state; `request_access` issues the
/// one-time permission prompt and resolves exactly once with the user's
/// choice. Requesting is only meaningful while the status is
/// `NotDetermined`; the gate never calls it otherwise.
#[async_trait]
pub trait CameraAuthorizer: Send + Sync {
    fn status(&self) -> DeviceAuthorization;

    async fn request_access(&self) -> bool;
}

/// Tracks and requests authorization to use the capture device.
///
/// Every call re-queries the authorizer instead of trusting a cached value;
/// the user can change OS settings between calls. The gate issues no
/// retries; callers re-invoke on the next user action.
pub struct PermissionGate {
    authorizer: Arc<dyn CameraAuthorizer>,
}

impl PermissionGate {
    pub fn new(authorizer: Arc<dyn CameraAuthorizer>) -> Self {
        Self { authorizer }
    }

    /// Resolve the current authorization, prompting the user if the OS has
    /// not asked yet.
    ///
    /// The synchronous (already decided) and asynchronous (prompt shown)
    /// paths produce the same tri-state result, so callers never need to
    /// special-case them. Denied and restricted states resolve without a
    /// prompt; the platform treats further requests as no-ops.
    pub async fn check_and_request(&self) -> AuthorizationState {
        match self.authorizer.status() {
            DeviceAuthorization::Authorized => AuthorizationState::Granted,
            DeviceAuthorization::NotDetermined => {
                debug!("camera authorization undetermined, requesting access");
                if self.authorizer.request_access().await {
                    AuthorizationState::Granted
                } else {
                    AuthorizationState::Denied
                }
            }
            DeviceAuthorization::Denied | DeviceAuthorization::Restricted => {
                AuthorizationState::Denied
            }
        }
    }
}
