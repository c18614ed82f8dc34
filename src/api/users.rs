use actix_web::{web, HttpResponse};
use mongodb::bson::doc;
use serde_json::json;

use crate::database::{collections, docs_to_json, DocumentId, Store};
use crate::models::user::{NewUser, Role};
use crate::services::{token_service::Claims, user_service};
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All registered users"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users");
    let users = store.list(collections::USERS, doc! {}).await?;
    Ok(HttpResponse::Ok().json(docs_to_json(users)))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Insert result, or `user already exists`")
    )
)]
pub async fn create_user(
    store: web::Data<dyn Store>,
    user: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - email: {}", user.email);
    let result = user_service::create_if_absent(store.get_ref(), &user).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /users/admin/{email} - ownership check. A path email that does not
/// match the token answers `false` immediately; the store is only consulted
/// for the caller's own email.
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    responses(
        (status = 200, description = "`{admin: bool}` for the caller's own email"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_admin(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if claims.email != email {
        return Ok(HttpResponse::Ok().json(json!({ "admin": false })));
    }

    let role = user_service::role_for_email(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(json!({ "admin": role == Role::Admin })))
}

/// GET /users/instructor/{email} - same shape as the admin check.
pub async fn check_instructor(
    claims: web::ReqData<Claims>,
    path: web::Path<String>,
    store: web::Data<dyn Store>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if claims.email != email {
        return Ok(HttpResponse::Ok().json(json!({ "instructor": false })));
    }

    let role = user_service::role_for_email(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(json!({ "instructor": role == Role::Instructor })))
}

pub async fn make_admin(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("👑 PATCH /users/admin/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let result = user_service::promote(store.get_ref(), &id, Role::Admin).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn make_instructor(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("🎓 PATCH /users/instructor/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let result = user_service::promote(store.get_ref(), &id, Role::Instructor).await?;
    Ok(HttpResponse::Ok().json(result))
}

pub async fn delete_user(
    store: web::Data<dyn Store>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let raw = path.into_inner();
    log::info!("🗑️ DELETE /users/{}", raw);
    let id = DocumentId::parse(&raw)?;
    let result = store.delete_by_id(collections::USERS, &id).await?;
    Ok(HttpResponse::Ok().json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;
    use crate::middleware::{AuthMiddleware, RoleGuard};
    use crate::services::token_service;
    use actix_web::{test, App};
    use std::sync::Arc;

    fn seeded_store() -> (Arc<MemoryStore>, web::Data<dyn Store>) {
        std::env::set_var("ACCESS_TOKEN_SECRET", "test-secret");
        let store = Arc::new(MemoryStore::new());
        let data = web::Data::from(store.clone() as Arc<dyn Store>);
        (store, data)
    }

    macro_rules! app_routes {
        ($data:expr) => {
            test::init_service(
                App::new()
                    .app_data($data)
                    .route(
                        "/users",
                        web::get()
                            .to(list_users)
                            .wrap(RoleGuard::admin())
                            .wrap(AuthMiddleware),
                    )
                    .route("/users", web::post().to(create_user))
                    .route(
                        "/users/admin/{email}",
                        web::get().to(check_admin).wrap(AuthMiddleware),
                    )
                    .route("/users/admin/{id}", web::patch().to(make_admin))
                    .route(
                        "/users/instructor/{email}",
                        web::get().to(check_instructor).wrap(AuthMiddleware),
                    )
                    .route("/users/instructor/{id}", web::patch().to(make_instructor))
                    .route("/users/{id}", web::delete().to(delete_user)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn admin_route_without_token_is_401() {
        let (_, data) = seeded_store();
        let app = app_routes!(data);

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
        assert_eq!(resp.status(), 401);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "unauthorized access");
    }

    #[actix_web::test]
    async fn admin_route_with_non_admin_token_is_403() {
        let (store, data) = seeded_store();
        store
            .insert(collections::USERS, doc! { "email": "plain@x.com" })
            .await
            .unwrap();
        let app = app_routes!(data);

        let token = token_service::issue("plain@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 403);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "forbidden message");
    }

    #[actix_web::test]
    async fn admin_route_with_admin_token_lists_users() {
        let (store, data) = seeded_store();
        store
            .insert(collections::USERS, doc! { "email": "boss@x.com", "role": "admin" })
            .await
            .unwrap();
        let app = app_routes!(data);

        let token = token_service::issue("boss@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["email"], "boss@x.com");
    }

    #[actix_web::test]
    async fn duplicate_email_reports_without_inserting() {
        let (store, data) = seeded_store();
        let app = app_routes!(data);

        let first = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users")
                .set_json(serde_json::json!({ "email": "a@b.com", "name": "Ada" }))
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), 200);
        let body: serde_json::Value = test::read_body_json(first).await;
        assert!(body["insertedId"].is_string());

        let second = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/users")
                .set_json(serde_json::json!({ "email": "a@b.com" }))
                .to_request(),
        )
        .await;
        let body: serde_json::Value = test::read_body_json(second).await;
        assert_eq!(body["message"], "user already exists");

        let users = store.list(collections::USERS, doc! {}).await.unwrap();
        assert_eq!(users.len(), 1);
    }

    #[actix_web::test]
    async fn mismatched_path_email_answers_false_without_store_lookup() {
        let (store, data) = seeded_store();
        // The path email IS an admin; the short-circuit must still answer
        // false because the token belongs to someone else.
        store
            .insert(collections::USERS, doc! { "email": "boss@x.com", "role": "admin" })
            .await
            .unwrap();
        let app = app_routes!(data);

        let token = token_service::issue("intruder@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/users/admin/boss@x.com")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["admin"], false);
    }

    #[actix_web::test]
    async fn own_email_admin_check_reflects_stored_role() {
        let (store, data) = seeded_store();
        store
            .insert(collections::USERS, doc! { "email": "boss@x.com", "role": "admin" })
            .await
            .unwrap();
        let app = app_routes!(data);

        let token = token_service::issue("boss@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/users/admin/boss@x.com")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["admin"], true);
    }

    #[actix_web::test]
    async fn promotion_flow_makes_instructor_check_pass() {
        let (store, data) = seeded_store();
        let inserted = store
            .insert(collections::USERS, doc! { "email": "teach@x.com" })
            .await
            .unwrap();
        let app = app_routes!(data);

        let req = test::TestRequest::patch()
            .uri(&format!("/users/instructor/{}", inserted.inserted_id))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["matchedCount"], 1);

        let token = token_service::issue("teach@x.com").unwrap();
        let req = test::TestRequest::get()
            .uri("/users/instructor/teach@x.com")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body: serde_json::Value =
            test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["instructor"], true);
    }

    #[actix_web::test]
    async fn delete_with_malformed_id_is_400() {
        let (_, data) = seeded_store();
        let app = app_routes!(data);

        let resp = test::call_service(
            &app,
            test::TestRequest::delete().uri("/users/not-an-id").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }
}
