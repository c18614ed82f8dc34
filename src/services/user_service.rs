use mongodb::bson::doc;
use serde_json::{json, Value};

use crate::database::{collections, DocumentId, Store, UpdateResult};
use crate::models::user::{NewUser, Role, User};
use crate::utils::error::AppError;

/// Looks up the stored role for an email. Unknown emails read as `Unset`, so
/// role gates fail closed for users the store has never seen.
pub async fn role_for_email(store: &dyn Store, email: &str) -> Result<Role, AppError> {
    let found = store
        .find_one(collections::USERS, doc! { "email": email })
        .await?;

    match found {
        Some(document) => {
            let user: User = mongodb::bson::from_document(document)?;
            Ok(user.role)
        }
        None => Ok(Role::Unset),
    }
}

/// Inserts the user unless the email is already registered; the duplicate
/// case reports itself without touching the collection. This check is what
/// keeps emails unique across the users collection.
pub async fn create_if_absent(store: &dyn Store, user: &NewUser) -> Result<Value, AppError> {
    let existing = store
        .find_one(collections::USERS, doc! { "email": &user.email })
        .await?;
    if existing.is_some() {
        return Ok(json!({ "message": "user already exists" }));
    }

    let document = mongodb::bson::to_document(user)?;
    let result = store.insert(collections::USERS, document).await?;
    Ok(serde_json::to_value(result)?)
}

/// Role changes are one-directional promotions and only flow through here.
pub async fn promote(
    store: &dyn Store,
    id: &DocumentId,
    role: Role,
) -> Result<UpdateResult, AppError> {
    store
        .update_by_id(collections::USERS, id, doc! { "role": role.as_str() }, false)
        .await
}
