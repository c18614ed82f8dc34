use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Marketplace API",
        version = "1.0.0",
        description = "REST API for the course marketplace.\n\n**Authentication:** the user list and the role ownership checks require a JWT Bearer token from `POST /jwt`; the user list additionally requires the admin role."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::check_admin,

        // Catalog
        crate::api::classes::list_classes,
        crate::api::classes::list_teachers,

        // Approved courses
        crate::api::approved_courses::list_approved,
        crate::api::approved_courses::create_approved,
        crate::api::approved_courses::upsert_approved,

        // Instructor courses
        crate::api::courses::list_courses,
        crate::api::courses::create_course,
        crate::api::courses::update_course,
        crate::api::courses::approve_course,
        crate::api::courses::deny_course,

        // Carts
        crate::api::carts::my_cart,
        crate::api::carts::add_cart_item,

        // Payments
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::auth::TokenRequest,
            crate::models::course::CourseStatus,
            crate::models::course::CourseEdit,
            crate::models::course::StatusUpdate,
            crate::models::course::StatusWithFeedback,
            crate::models::course::ApprovedCourse,
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints."),
        (name = "Auth", description = "Bearer token issuance."),
        (name = "Users", description = "Registration, role checks, and promotions."),
        (name = "Catalog", description = "Public classes and teacher profiles."),
        (name = "ApprovedCourses", description = "Published course catalog."),
        (name = "InstructorCourses", description = "Instructor submissions and the approve/deny review flow."),
        (name = "Carts", description = "Per-user cart items."),
        (name = "Payments", description = "Payment intent creation via the external processor."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
