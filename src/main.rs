//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod client;
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar
    let config = AppConfig::from_env()?;
    let app_state = AppState::new(&config).await?;

    let app = router(app_state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(app_state: AppState) -> Router {
    let contact_routes = Router::new()
        .route("/"
               ,get(handlers::crm::list_contacts)
               .post(handlers::crm::create_contact)
        )
        .route("/import", post(handlers::crm::import_contacts))
        .route("/stats", get(handlers::crm::contact_stats))
        .route("/{id}"
               ,get(handlers::crm::get_contact)
               .put(handlers::crm::update_contact)
               .delete(handlers::crm::delete_contact)
        );

    let property_type_routes = Router::new()
        .route("/"
               ,get(handlers::inventory::list_property_types)
               .post(handlers::inventory::create_property_type)
        )
        .route("/grouped", get(handlers::inventory::grouped_property_types))
        .route("/{id}"
               ,put(handlers::inventory::update_property_type)
               .delete(handlers::inventory::delete_property_type)
        );

    let unit_routes = Router::new()
        .route("/"
               ,get(handlers::inventory::list_units)
               .post(handlers::inventory::create_unit)
        )
        .route("/grouped", get(handlers::inventory::grouped_units))
        .route("/stats", get(handlers::inventory::unit_stats))
        .route("/{id}"
               ,put(handlers::inventory::update_unit)
               .delete(handlers::inventory::delete_unit)
        );

    let development_routes = Router::new()
        .route("/"
               ,get(handlers::developments::list_developments)
               .post(handlers::developments::create_development)
        )
        .route("/stats", get(handlers::developments::development_stats))
        .route("/{id}"
               ,get(handlers::developments::get_development)
               .put(handlers::developments::update_development)
               .delete(handlers::developments::delete_development)
        );

    let reservation_routes = Router::new()
        .route("/"
               ,get(handlers::operations::list_reservations)
               .post(handlers::operations::create_reservation)
        )
        .route("/stats", get(handlers::operations::reservation_stats))
        .route("/{id}"
               ,get(handlers::operations::get_reservation)
               .delete(handlers::operations::delete_reservation)
        );

    let quota_routes = Router::new()
        .route("/"
               ,get(handlers::finance::list_quotas)
               .post(handlers::finance::create_quota)
        )
        .route("/stats", get(handlers::finance::quota_stats))
        .route("/plan", post(handlers::finance::generate_plan))
        .route("/plan/preview", post(handlers::finance::preview_plan))
        .route("/{id}", axum::routing::delete(handlers::finance::delete_quota));

    let location_routes = Router::new()
        .route("/countries", get(handlers::locations::list_countries))
        .route("/countries/{id}/cities", get(handlers::locations::list_cities))
        .route("/cities/{id}/neighborhoods", get(handlers::locations::list_neighborhoods));

    // Combina tudo no router principal
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/currencies", get(handlers::locations::list_currencies))
        .route("/api/amenities", get(handlers::locations::list_amenities))
        .route("/api/dashboard", get(handlers::dashboard::get_overview))
        .route("/api/settings"
               ,get(handlers::settings::get_settings)
               .put(handlers::settings::update_settings)
        )
        .nest("/api/contacts", contact_routes)
        .nest("/api/property-types", property_type_routes)
        .nest("/api/units", unit_routes)
        .nest("/api/developments", development_routes)
        .nest("/api/reservations", reservation_routes)
        .nest("/api/quotas", quota_routes)
        .nest("/api/locations", location_routes)
        .with_state(app_state)
}
