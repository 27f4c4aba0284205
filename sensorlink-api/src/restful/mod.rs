mod history;
mod sensor;

pub use history::*;
pub use sensor::*;

use serde::{Deserialize, Serialize};

/// Body of every unsuccessful response.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureResponse {
    /// Always `false`
    pub success: bool,
    /// What went wrong, safe to show to a user
    pub message: String,
    /// Short cause of the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FailureResponse {
    pub fn new(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error,
        }
    }
}
