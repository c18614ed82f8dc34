use actix_web::{web, HttpResponse};

use crate::services::payment_service::{self, PaymentIntentRequest};
use crate::utils::error::AppError;

/// POST /create-payment-intent - price arrives pre-validated as a positive
/// number; the conversion to minor units happens in the adapter.
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for the created intent", body = payment_service::PaymentIntentResponse),
        (status = 400, description = "Missing or non-positive price")
    )
)]
pub async fn create_payment_intent(
    request: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    let response = payment_service::create_intent(request.price).await?;
    Ok(HttpResponse::Ok().json(response))
}
