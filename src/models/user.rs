use serde::{Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;

/// Stored role. Plain users carry no `role` field at all, so absence and any
/// unknown value both read back as `Unset`; comparisons stay exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Unset,
    Admin,
    Instructor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Unset => "unset",
            Role::Admin => "admin",
            Role::Instructor => "instructor",
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "admin" => Role::Admin,
            "instructor" => Role::Instructor,
            _ => Role::Unset,
        })
    }
}

/// Stored user document, as read back for role checks. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// Registration payload. Profile extras (name, photo, ...) pass through to the
/// document untouched; no `role` field means new users start as plain users.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct NewUser {
    pub email: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn missing_role_reads_as_unset() {
        let user: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "name": "Ada" }).unwrap();
        assert_eq!(user.role, Role::Unset);
    }

    #[test]
    fn known_roles_round_trip() {
        let user: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "role": "admin" }).unwrap();
        assert_eq!(user.role, Role::Admin);

        let user: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "role": "instructor" })
                .unwrap();
        assert_eq!(user.role, Role::Instructor);
    }

    #[test]
    fn unknown_role_string_collapses_to_unset() {
        let user: User =
            mongodb::bson::from_document(doc! { "email": "a@b.com", "role": "superuser" }).unwrap();
        assert_eq!(user.role, Role::Unset);
    }

    #[test]
    fn new_user_keeps_extra_fields() {
        let user: NewUser = serde_json::from_str(
            r#"{"email":"a@b.com","name":"Ada","photo":"https://x/y.png"}"#,
        )
        .unwrap();
        assert_eq!(user.email, "a@b.com");
        assert_eq!(user.extra["name"], "Ada");

        let document = mongodb::bson::to_document(&user).unwrap();
        assert_eq!(document.get_str("photo").unwrap(), "https://x/y.png");
        assert!(document.get("role").is_none());
    }
}
