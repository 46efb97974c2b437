mod auth;
mod handlers;
mod models;
mod origin;

use axum::{http::HeaderValue, routing::get, Router};
use common::builders::{Repositories, Services};
use common::db;
use common::settings::Settings;
use sea_orm::DatabaseConnection;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub settings: Settings,
    pub repos: Repositories,
    pub services: Services,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new().expect("Failed to load configuration");

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = db::establish_connection(&settings.database.url).await?;
    let db = Arc::new(db);
    let (repos, services) = common::builders::build_all(db.clone(), &settings);

    let state = Arc::new(AppState {
        db,
        settings: settings.clone(),
        repos,
        services,
    });

    let cors = build_cors(&settings);

    let app = Router::new()
        .route("/", get(|| async { "Org Chart API" }))
        .route(
            "/api/organization",
            get(handlers::get_my_organization).post(handlers::create_organization),
        )
        .route("/api/organization/ceo", get(handlers::get_ceo))
        .route(
            "/api/organization/:id",
            get(handlers::get_organization)
                .put(handlers::update_organization)
                .delete(handlers::delete_organization),
        )
        .route(
            "/api/departments",
            get(handlers::list_departments).post(handlers::create_department),
        )
        .route("/api/departments/hod/:id", get(handlers::get_hod))
        .route(
            "/api/departments/:id",
            get(handlers::get_department)
                .put(handlers::update_department)
                .delete(handlers::delete_department),
        )
        .route(
            "/api/teammembers",
            get(handlers::list_team_members).post(handlers::create_team_member),
        )
        .route(
            "/api/teammembers/:id",
            get(handlers::get_team_member)
                .put(handlers::update_team_member)
                .delete(handlers::delete_team_member),
        )
        .route("/api/chart", get(handlers::get_chart))
        .route("/api/me", get(auth::me))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(settings: &Settings) -> CorsLayer {
    let origins: Vec<HeaderValue> =
        origin::parse_frontend_origins(settings.auth.frontend_origin.as_deref())
            .iter()
            .filter_map(|raw| HeaderValue::from_str(raw).ok())
            .collect();

    match (settings.debug, origins.is_empty()) {
        (false, false) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
            ])
            .allow_methods(Any),
        _ => CorsLayer::permissive(),
    }
}
