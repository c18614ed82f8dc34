use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};
use mongodb::{Client, Collection, Database};
use serde::Serialize;
use serde_json::Value;

use crate::utils::error::AppError;

#[cfg(test)]
pub mod memory;

/// Names of the six marketplace collections.
pub mod collections {
    pub const USERS: &str = "users";
    pub const CLASSES: &str = "classes";
    pub const TEACHERS: &str = "teachers";
    pub const INSTRUCTOR_COURSES: &str = "instructorCourses";
    pub const APPROVED_COURSES: &str = "approvedCourses";
    pub const CARTS: &str = "carts";
}

/// Validated document identifier. Path ids go through this at the handler
/// boundary so a malformed id becomes a 400 instead of reaching the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentId(ObjectId);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        ObjectId::parse_str(raw)
            .map(DocumentId)
            .map_err(|_| AppError::InvalidRequest(format!("invalid document id: {}", raw)))
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for DocumentId {
    fn from(oid: ObjectId) -> Self {
        DocumentId(oid)
    }
}

#[derive(Debug, Serialize)]
pub struct InsertResult {
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateResult {
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
    #[serde(rename = "upsertedId", skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResult {
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}

/// Uniform access to the marketplace collections. Constructed once at startup
/// and injected as `web::Data<dyn Store>`, so handlers and middleware never
/// reach for a global handle and tests can swap in an in-memory fake.
#[async_trait]
pub trait Store: Send + Sync {
    /// Empty filter returns the whole collection, insertion order.
    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError>;

    async fn insert(&self, collection: &str, document: Document) -> Result<InsertResult, AppError>;

    /// `$set` semantics: only the fields listed in `patch` change, unlisted
    /// fields are left untouched. With `upsert` the document is created when
    /// the id has no match.
    async fn update_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Document,
        upsert: bool,
    ) -> Result<UpdateResult, AppError>;

    async fn delete_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<DeleteResult, AppError>;

    async fn find_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<Option<Document>, AppError> {
        self.find_one(collection, doc! { "_id": id.as_object_id() })
            .await
    }
}

/// MongoDB-backed store. One client for the whole process; pooling is left to
/// the driver beyond the limits set here.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut options = mongodb::options::ClientOptions::parse(uri).await?;

        options.max_pool_size = Some(20);
        options.min_pool_size = Some(5);
        options.max_idle_time = Some(std::time::Duration::from_secs(300));
        options.connect_timeout = Some(std::time::Duration::from_secs(5));
        options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        Ok(Self { db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<InsertResult, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertResult {
            inserted_id: bson_id_to_string(&result.inserted_id),
        })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Document,
        upsert: bool,
    ) -> Result<UpdateResult, AppError> {
        let result = self
            .collection(collection)
            .update_one(doc! { "_id": id.as_object_id() }, doc! { "$set": patch })
            .upsert(upsert)
            .await?;

        Ok(UpdateResult {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.as_ref().map(bson_id_to_string),
        })
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<DeleteResult, AppError> {
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": id.as_object_id() })
            .await?;
        Ok(DeleteResult {
            deleted_count: result.deleted_count,
        })
    }
}

fn bson_id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

/// Converts BSON to plain JSON with ObjectIds rendered as hex strings and
/// datetimes as RFC 3339, which is the shape the web client expects (not the
/// `{"$oid": ...}` extended-JSON form).
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => Value::String(dt.try_to_rfc3339_string().unwrap_or_default()),
        Bson::Document(document) => doc_to_json(document),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        other => other.into_relaxed_extjson(),
    }
}

pub fn doc_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

pub fn docs_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(doc_to_json).collect())
}
