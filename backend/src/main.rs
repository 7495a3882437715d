use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use staffpoint_backend::config::Config;
use staffpoint_backend::db::connection::create_pool;
use staffpoint_backend::docs::ApiDoc;
use staffpoint_backend::handlers;
use staffpoint_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffpoint_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!(
        database_url = %config.database_url,
        bind_addr = %config.bind_addr,
        corporate_email_domain = %config.corporate_email_domain,
        phone_country_code = %config.phone_country_code,
        "Loaded configuration from environment/.env"
    );

    let pool = create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let state = AppState::new(pool, config.clone());

    let api_routes = Router::new()
        .route(
            "/api/requests",
            post(handlers::requests::create_request).get(handlers::requests::list_requests),
        )
        .route(
            "/api/requests/validate",
            post(handlers::requests::validate_request),
        )
        .route(
            "/api/requests/login-suggestion",
            get(handlers::requests::suggest_login),
        )
        .route(
            "/api/requests/{id}",
            get(handlers::requests::get_request).put(handlers::requests::edit_request),
        )
        .route(
            "/api/requests/{id}/submit",
            post(handlers::requests::submit_request),
        )
        .route(
            "/api/requests/{id}/accept",
            post(handlers::requests::accept_request),
        )
        .route(
            "/api/requests/{id}/decline",
            post(handlers::requests::decline_request),
        )
        .route(
            "/api/requests/{id}/cancel",
            post(handlers::requests::cancel_request),
        )
        .route(
            "/api/requests/{id}/complete",
            post(handlers::requests::complete_request),
        )
        .route(
            "/api/deactivations",
            post(handlers::deactivations::create_deactivation)
                .get(handlers::deactivations::list_deactivations),
        )
        .route(
            "/api/deactivations/validate",
            post(handlers::deactivations::validate_deactivation),
        )
        .route(
            "/api/deactivations/{id}",
            get(handlers::deactivations::get_deactivation)
                .put(handlers::deactivations::edit_deactivation),
        )
        .route(
            "/api/deactivations/{id}/submit",
            post(handlers::deactivations::submit_deactivation),
        )
        .route(
            "/api/deactivations/{id}/accept",
            post(handlers::deactivations::accept_deactivation),
        )
        .route(
            "/api/deactivations/{id}/decline",
            post(handlers::deactivations::decline_deactivation),
        )
        .route(
            "/api/deactivations/{id}/cancel",
            post(handlers::deactivations::cancel_deactivation),
        );

    // Compose app with shared layers (CORS/Trace) and shared state
    let app = Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state);

    let addr = config.bind_addr.clone();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
