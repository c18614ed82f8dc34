mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use std::env;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use database::{MongoStore, Store};
use middleware::{AuthMiddleware, RoleGuard};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let db_user = env::var("DB_USER").expect("DB_USER must be set");
    let db_pass = env::var("DB_PASS").expect("DB_PASS must be set");

    let uri = format!(
        "mongodb+srv://{}:{}@cluster0.lf3ijbn.mongodb.net/?retryWrites=true&w=majority",
        db_user, db_pass
    );

    log::info!("🚀 Starting Marketplace Service...");

    // Initialize MongoDB-backed store; one handle shared by every request
    let store = MongoStore::new(&uri, "summerCamp")
        .await
        .expect("Failed to connect to MongoDB");
    let store_data: web::Data<dyn Store> = web::Data::from(Arc::new(store) as Arc<dyn Store>);

    log::info!("✅ MongoDB connected successfully");
    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::permissive();
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store_data.clone())
            .app_data(web::JsonConfig::default().error_handler(utils::error::json_error_handler))
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Liveness
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Token issuance
            .route("/jwt", web::post().to(api::auth::issue_token))
            // Users
            .route(
                "/users",
                web::get()
                    .to(api::users::list_users)
                    .wrap(RoleGuard::admin())
                    .wrap(AuthMiddleware),
            )
            .route("/users", web::post().to(api::users::create_user))
            .route(
                "/users/admin/{email}",
                web::get().to(api::users::check_admin).wrap(AuthMiddleware),
            )
            .route("/users/admin/{id}", web::patch().to(api::users::make_admin))
            .route(
                "/users/instructor/{email}",
                web::get().to(api::users::check_instructor).wrap(AuthMiddleware),
            )
            .route(
                "/users/instructor/{id}",
                web::patch().to(api::users::make_instructor),
            )
            .route("/users/{id}", web::delete().to(api::users::delete_user))
            // Catalog
            .route("/classes", web::get().to(api::classes::list_classes))
            .route("/classes", web::post().to(api::classes::create_class))
            .route("/teachers", web::get().to(api::classes::list_teachers))
            // Approved courses
            .route(
                "/approvedCourses",
                web::get().to(api::approved_courses::list_approved),
            )
            .route(
                "/approvedCourses",
                web::post().to(api::approved_courses::create_approved),
            )
            .route(
                "/approvedCourses/{id}",
                web::get().to(api::approved_courses::get_approved),
            )
            .route(
                "/approvedCourses/{id}",
                web::put().to(api::approved_courses::upsert_approved),
            )
            .route(
                "/myApprovedCourses",
                web::get().to(api::approved_courses::my_approved),
            )
            // Instructor courses
            .route("/instructorCourses", web::get().to(api::courses::list_courses))
            .route("/instructorCourses", web::post().to(api::courses::create_course))
            .route("/instructorCourses/{id}", web::get().to(api::courses::get_course))
            .route("/instructorCourses/{id}", web::put().to(api::courses::update_course))
            .route("/myCourses", web::get().to(api::courses::my_courses))
            .route(
                "/updateCoursesStatus/{id}",
                web::put().to(api::courses::approve_course),
            )
            .route(
                "/denyCoursesStatus/{id}",
                web::put().to(api::courses::deny_course),
            )
            // Carts
            .route("/carts", web::get().to(api::carts::my_cart))
            .route("/carts", web::post().to(api::carts::add_cart_item))
            .route("/carts/{id}", web::delete().to(api::carts::delete_cart_item))
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
