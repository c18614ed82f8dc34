use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::utils::error::AppError;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Price in major currency units, validated on deserialization so a missing,
/// non-numeric, or non-positive price is rejected before any arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(f64);

impl Price {
    pub fn new(value: f64) -> Result<Self, AppError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(AppError::InvalidRequest(
                "price must be a positive number".to_string(),
            ));
        }
        Ok(Price(value))
    }

    /// Integer minor units (cents), as the processor expects.
    pub fn minor_units(&self) -> i64 {
        (self.0 * 100.0).round() as i64
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Price::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PaymentIntentRequest {
    #[schema(value_type = f64)]
    pub price: Price,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeIntent {
    client_secret: String,
}

fn secret_key() -> Result<String, AppError> {
    std::env::var("PAYMENT_SECRET_KEY")
        .map_err(|_| AppError::PaymentError("PAYMENT_SECRET_KEY is not set".to_string()))
}

/// Requests a card payment intent from Stripe, fixed currency "usd".
pub async fn create_intent(price: Price) -> Result<PaymentIntentResponse, AppError> {
    let amount = price.minor_units();
    log::info!("💳 Creating payment intent for {} cents", amount);

    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .bearer_auth(secret_key()?)
        .form(&params)
        .send()
        .await
        .map_err(|e| AppError::PaymentError(format!("request failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::PaymentError(format!(
            "processor returned {}",
            response.status()
        )));
    }

    let intent: StripeIntent = response
        .json()
        .await
        .map_err(|e| AppError::PaymentError(format!("invalid processor response: {}", e)))?;

    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}
