use serde::{Deserialize, Serialize};

/// Catalog class as posted by the admin frontend. Extra presentation fields
/// are kept on the document as-is.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewClass {
    pub name: String,
    pub price: f64,
    pub seats: i64,
    pub instructor: String,
    pub image: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
