//! Authenticated session info.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in user, as reported by the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// User id, owner of created storybooks
    pub user_id: Uuid,
    /// Account email, if known
    #[serde(default)]
    pub email: Option<String>,
    /// Bearer token for authenticated requests
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,
}
