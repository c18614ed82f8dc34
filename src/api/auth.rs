use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::services::token_service;
use crate::utils::error::AppError;

/// POST /jwt body. Extra profile fields are accepted and ignored; only the
/// email goes into the token.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TokenRequest {
    pub email: String,
}

#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Signed bearer token, raw string body")
    )
)]
pub async fn issue_token(request: web::Json<TokenRequest>) -> Result<HttpResponse, AppError> {
    log::info!("🔑 POST /jwt - email: {}", request.email);
    let token = token_service::issue(&request.email)?;
    Ok(HttpResponse::Ok().body(token))
}
