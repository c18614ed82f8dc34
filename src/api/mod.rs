use serde::Deserialize;

pub mod approved_courses;
pub mod auth;
pub mod carts;
pub mod classes;
pub mod courses;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod users;

/// `?email=` query used by the owned-list endpoints. The reference behavior
/// is an empty array, not an error, when the parameter is missing.
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}
