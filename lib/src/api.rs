/// Contains API-related struct definitions that are shared between the
/// demo server and its front-end.
use serde::{Deserialize, Serialize};

use crate::email::SendEmailResponse;

/// JSON reply of every email endpoint.
///
/// The send response fields are inlined next to the operation label, e.g.
/// `{"operation": "Send HTML Email", "sent": true, "status": 200, ...}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationResult {
    pub operation: String,
    #[serde(flatten)]
    pub response: SendEmailResponse,
}

impl OperationResult {
    pub fn new(operation: &str, response: SendEmailResponse) -> Self {
        Self {
            operation: operation.to_string(),
            response,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

/// Entry of the /files directory listing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}
