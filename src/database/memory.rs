use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, Bson, Document};

use super::{DeleteResult, DocumentId, InsertResult, Store, UpdateResult};
use crate::utils::error::AppError;

/// In-memory stand-in for the Mongo-backed store. Filters support top-level
/// equality only, which is all the handlers use.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(document: &Document, filter: &Document) -> bool {
        filter
            .iter()
            .all(|(key, expected)| document.get(key) == Some(expected))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| Self::matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
    ) -> Result<Option<Document>, AppError> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| Self::matches(d, &filter)).cloned()))
    }

    async fn insert(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<InsertResult, AppError> {
        let id = ObjectId::new();
        document.insert("_id", id);

        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);

        Ok(InsertResult {
            inserted_id: id.to_hex(),
        })
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
        patch: Document,
        upsert: bool,
    ) -> Result<UpdateResult, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        let target = Bson::ObjectId(id.as_object_id());

        if let Some(existing) = docs.iter_mut().find(|d| d.get("_id") == Some(&target)) {
            let mut modified = false;
            for (key, value) in patch {
                if existing.get(&key) != Some(&value) {
                    existing.insert(key, value);
                    modified = true;
                }
            }
            return Ok(UpdateResult {
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_id: None,
            });
        }

        if upsert {
            let mut created = doc! { "_id": id.as_object_id() };
            for (key, value) in patch {
                created.insert(key, value);
            }
            docs.push(created);
            return Ok(UpdateResult {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(id.as_object_id().to_hex()),
            });
        }

        Ok(UpdateResult {
            matched_count: 0,
            modified_count: 0,
            upserted_id: None,
        })
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: &DocumentId,
    ) -> Result<DeleteResult, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        let target = Bson::ObjectId(id.as_object_id());

        let before = docs.len();
        docs.retain(|d| d.get("_id") != Some(&target));

        Ok(DeleteResult {
            deleted_count: (before - docs.len()) as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::collections;

    #[tokio::test]
    async fn insert_then_list_filters_by_email() {
        let store = MemoryStore::new();
        store
            .insert(collections::CARTS, doc! { "email": "a@b.com", "name": "Yoga" })
            .await
            .unwrap();
        store
            .insert(collections::CARTS, doc! { "email": "c@d.com", "name": "Chess" })
            .await
            .unwrap();

        let all = store.list(collections::CARTS, doc! {}).await.unwrap();
        assert_eq!(all.len(), 2);

        let mine = store
            .list(collections::CARTS, doc! { "email": "a@b.com" })
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].get_str("name").unwrap(), "Yoga");
    }

    #[tokio::test]
    async fn update_patches_listed_fields_only() {
        let store = MemoryStore::new();
        let inserted = store
            .insert(
                collections::INSTRUCTOR_COURSES,
                doc! { "name": "Guitar", "price": 30.0, "status": "pending", "email": "i@x.com" },
            )
            .await
            .unwrap();
        let id = DocumentId::parse(&inserted.inserted_id).unwrap();

        let result = store
            .update_by_id(
                collections::INSTRUCTOR_COURSES,
                &id,
                doc! { "price": 45.0 },
                true,
            )
            .await
            .unwrap();
        assert_eq!(result.matched_count, 1);
        assert_eq!(result.modified_count, 1);
        assert!(result.upserted_id.is_none());

        let doc = store
            .find_by_id(collections::INSTRUCTOR_COURSES, &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc.get_f64("price").unwrap(), 45.0);
        assert_eq!(doc.get_str("status").unwrap(), "pending");
        assert_eq!(doc.get_str("email").unwrap(), "i@x.com");
    }

    #[tokio::test]
    async fn upsert_creates_missing_document() {
        let store = MemoryStore::new();
        let id = DocumentId::from(ObjectId::new());

        let result = store
            .update_by_id(
                collections::APPROVED_COURSES,
                &id,
                doc! { "status": "approved" },
                true,
            )
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert_eq!(result.upserted_id, Some(id.as_object_id().to_hex()));

        let created = store
            .find_by_id(collections::APPROVED_COURSES, &id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.get_str("status").unwrap(), "approved");
    }

    #[tokio::test]
    async fn update_without_upsert_is_a_no_op_for_missing_id() {
        let store = MemoryStore::new();
        let id = DocumentId::from(ObjectId::new());

        let result = store
            .update_by_id(collections::USERS, &id, doc! { "role": "admin" }, false)
            .await
            .unwrap();
        assert_eq!(result.matched_count, 0);
        assert!(result.upserted_id.is_none());
        assert!(store
            .find_by_id(collections::USERS, &id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_reports_count() {
        let store = MemoryStore::new();
        let inserted = store
            .insert(collections::CARTS, doc! { "email": "a@b.com" })
            .await
            .unwrap();
        let id = DocumentId::parse(&inserted.inserted_id).unwrap();

        let deleted = store.delete_by_id(collections::CARTS, &id).await.unwrap();
        assert_eq!(deleted.deleted_count, 1);

        let again = store.delete_by_id(collections::CARTS, &id).await.unwrap();
        assert_eq!(again.deleted_count, 0);
    }
}
