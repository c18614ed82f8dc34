use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use super::EmailQuery;
use crate::database::{collections, doc_to_json, docs_to_json, DocumentId, Store};
use crate::models::course::{CourseEdit, NewInstructorCourse, StatusUpdate, StatusWithFeedback};
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/instructorCourses",
    tag = "InstructorCourses",
    responses(
        (status = 200, description = "All submitted instructor courses")
    )
)]
pub async fn list_courses(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let courses = store.list(collections::INSTRUCTOR_COURSES, doc! {}).await?;
    Ok(HttpResponse::Ok().json(docs_to_json(courses)))
}

pub async fn get_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path.into_inner())?;
    let course = store
        .find_by_id(collections::INSTRUCTOR_COURSES, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("course not found".to_string()))?;
    Ok(HttpResponse::Ok().json(doc_to_json(course)))
}

/// GET /myCourses?email= - answers `[]` outright when no email is supplied.
pub async fn my_courses(
    store: web::Data<dyn Store>,
    query: web::Query<EmailQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(email) = &query.email else {
        return Ok(HttpResponse::Ok().json(json!([])));
    };

    let courses = store
        .list(collections::INSTRUCTOR_COURSES, doc! { "email": email })
        .await?;
    Ok(HttpResponse::Ok().json(docs_to_json(courses)))
}

#[utoipa::path(
    post,
    path = "/instructorCourses",
    tag = "InstructorCourses",
    responses(
        (status = 200, description = "Insert result for the submission")
    )
)]
pub async fn create_course(
    store: web::Data<dyn Store>,
    course: web::Json<NewInstructorCourse>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /instructorCourses - {} by {}", course.name, course.email);
    let document = mongodb::bson::to_document(&course.into_inner())?;
    let result = store.insert(collections::INSTRUCTOR_COURSES, document).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /instructorCourses/{id} - patches name/seats/price, creating the
/// document when the id has no match.
#[utoipa::path(
    put,
    path = "/instructorCourses/{id}",
    tag = "InstructorCourses",
    request_body = CourseEdit,
    responses(
        (status = 200, description = "Upsert result")
    )
)]
pub async fn update_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    edit: web::Json<CourseEdit>,
) -> Result<HttpResponse, AppError> {
    let id = DocumentId::parse(&path.into_inner())?;
    let patch = mongodb::bson::to_document(&edit.into_inner())?;
    let result = store
        .update_by_id(collections::INSTRUCTOR_COURSES, &id, patch, true)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /updateCoursesStatus/{id} - approve flow. Populating the approved
/// catalog stays a separate POST /approvedCourses call.
#[utoipa::path(
    put,
    path = "/updateCoursesStatus/{id}",
    tag = "InstructorCourses",
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Upsert result")
    )
)]
pub async fn approve_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    update: web::Json<StatusUpdate>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("✅ PUT /updateCoursesStatus/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let patch = mongodb::bson::to_document(&update.into_inner())?;
    let result = store
        .update_by_id(collections::INSTRUCTOR_COURSES, &id, patch, true)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PUT /denyCoursesStatus/{id} - deny flow, status plus reviewer feedback.
#[utoipa::path(
    put,
    path = "/denyCoursesStatus/{id}",
    tag = "InstructorCourses",
    request_body = StatusWithFeedback,
    responses(
        (status = 200, description = "Upsert result")
    )
)]
pub async fn deny_course(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
    update: web::Json<StatusWithFeedback>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("🚫 PUT /denyCoursesStatus/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let patch = mongodb::bson::to_document(&update.into_inner())?;
    let result = store
        .update_by_id(collections::INSTRUCTOR_COURSES, &id, patch, true)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}
