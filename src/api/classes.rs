use actix_web::{web, HttpResponse};
use mongodb::bson::doc;

use crate::database::{collections, docs_to_json, Store};
use crate::models::class::NewClass;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/classes",
    tag = "Catalog",
    responses(
        (status = 200, description = "All catalog classes")
    )
)]
pub async fn list_classes(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let classes = store.list(collections::CLASSES, doc! {}).await?;
    Ok(HttpResponse::Ok().json(docs_to_json(classes)))
}

pub async fn create_class(
    store: web::Data<dyn Store>,
    class: web::Json<NewClass>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /classes - {}", class.name);
    let document = mongodb::bson::to_document(&class.into_inner())?;
    let result = store.insert(collections::CLASSES, document).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[utoipa::path(
    get,
    path = "/teachers",
    tag = "Catalog",
    responses(
        (status = 200, description = "All teacher profiles")
    )
)]
pub async fn list_teachers(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let teachers = store.list(collections::TEACHERS, doc! {}).await?;
    Ok(HttpResponse::Ok().json(docs_to_json(teachers)))
}
