use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use super::EmailQuery;
use crate::database::{collections, docs_to_json, DocumentId, Store};
use crate::models::cart::NewCartItem;
use crate::utils::error::AppError;

/// GET /carts?email= - answers `[]` outright when no email is supplied.
#[utoipa::path(
    get,
    path = "/carts",
    tag = "Carts",
    responses(
        (status = 200, description = "Cart items owned by the given email")
    )
)]
pub async fn my_cart(
    store: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(email) = &query.email else {
        return Ok(HttpResponse::Ok().json(json!([])));
    };

    let items = store
        .list(collections::CARTS, doc! { "email": email })
        .await?;
    Ok(HttpResponse::Ok().json(docs_to_json(items)))
}

#[utoipa::path(
    post,
    path = "/carts",
    tag = "Carts",
    responses(
        (status = 200, description = "Insert result")
    )
)]
pub async fn add_cart_item(
    store: web::Data<dyn Store>,
    item: web::Json<NewCartItem>,
) -> Result<HttpResponse, AppError> {
    log::info!("🛒 POST /carts - {}", item.email);
    let document = mongodb::bson::to_document(&item.into_inner())?;
    let result = store.insert(collections::CARTS, document).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn delete_cart_item(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("🗑️ DELETE /carts/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let result = store.delete_by_id(collections::CARTS, &id).await?;
    Ok(HttpResponse::Ok().json(result))
}
