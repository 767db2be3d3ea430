use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Returned when an upload was received but could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,
    pub error: String,
}

/// Returned when the request body itself could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransportErrorResponse {
    pub error: String,
}
