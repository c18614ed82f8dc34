use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use super::EmailQuery;
use crate::database::{collections, doc_to_json, docs_to_json, DocumentId, Store};
use crate::models::course::ApprovedCourse;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/approvedCourses",
    tag = "ApprovedCourses",
    responses(
        (status = 200, description = "All approved courses")
    )
)]
pub async fn list_approved(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let courses = store.list(collections::APPROVED_COURSES, doc! {}).await?;
    Ok(HttpResponse::Ok().json(docs_to_json(courses)))
}

pub async fn get_approved(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path.into_inner())?;
    let course = store
        .find_by_id(collections::APPROVED_COURSES, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("course not found".to_string()))?;
    Ok(HttpResponse::Ok().json(doc_to_json(course)))
}

/// GET /myApprovedCourses?email= - answers `[]` outright when no email is
/// supplied.
pub async fn my_approved(
    store: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(email) = &query.email else {
        return Ok(HttpResponse::Ok().json(json!([])));
    };

    let courses = store
        .list(collections::APPROVED_COURSES, doc! { "email": email })
        .await?;
    Ok(HttpResponse::Ok().json(docs_to_json(courses)))
}

/// POST /approvedCourses - the only path that populates the approved catalog;
/// the approve upsert on instructorCourses never writes here.
#[utoipa::path(
    post,
    path = "/approvedCourses",
    tag = "ApprovedCourses",
    request_body = ApprovedCourse,
    responses(
        (status = 200, description = "Insert result")
    )
)]
pub async fn create_approved(
    store: web::Data<dyn Store>,
    course: web::Json<ApprovedCourse>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /approvedCourses - {}", course.name);
    let document = mongodb::bson::to_document(&course.into_inner())?;
    let result = store.insert(collections::APPROVED_COURSES, document).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /approvedCourses/{id} - patches exactly
/// status/email/image/instructor/name/price/seats, creating on a missing id.
#[utoipa::path(
    put,
    path = "/approvedCourses/{id}",
    tag = "ApprovedCourses",
    request_body = ApprovedCourse,
    responses(
        (status = 200, description = "Upsert result")
    )
)]
pub async fn upsert_approved(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    course: web::Json<ApprovedCourse>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path.into_inner())?;
    let patch = mongodb::bson::to_document(&course.into_inner())?;
    let result = store
        .update_by_id(collections::APPROVED_COURSES, &id, patch, true)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
