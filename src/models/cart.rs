use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Cart entry: owned by a user (email) plus whatever course reference fields
/// the frontend sends along.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewCartItem {
    pub email: String,
    #[serde(flatten)]
    pub course: serde_json::Map<String, serde_json::Value>,
}
