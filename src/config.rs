// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    client::{
        BackendClient, CatalogRepository, ContactRepository, DevelopmentRepository, LocationRepository,
        PropertyTypeRepository, QuotaRepository, ReservationRepository, UnitRepository,
    },
    db::{InMemorySettingsStore, PgSettingsStore, SettingsStore},
    services::{
        CrmService, DashboardService, FinanceService, InventoryService, OperationService, SettingsService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuração lida do ambiente (`.env` incluído).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend_api_url: String,
    pub backend_api_token: Option<String>,
    pub backend_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend_api_url = env::var("BACKEND_API_URL").context("BACKEND_API_URL deve ser definida")?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR inválido")?;

        let timeout_secs = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().context("BACKEND_TIMEOUT_SECS deve ser um número")?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend_api_url,
            backend_api_token: non_empty(env::var("BACKEND_API_TOKEN").ok()),
            backend_timeout: Duration::from_secs(timeout_secs),
            bind_addr,
            database_url: non_empty(env::var("DATABASE_URL").ok()),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactRepository,
    pub property_types: PropertyTypeRepository,
    pub units: UnitRepository,
    pub developments: DevelopmentRepository,
    pub reservations: ReservationRepository,
    pub quotas: QuotaRepository,
    pub locations: LocationRepository,
    pub catalog: CatalogRepository,

    pub crm_service: CrmService,
    pub inventory_service: InventoryService,
    pub operation_service: OperationService,
    pub finance_service: FinanceService,
    pub dashboard_service: DashboardService,
    pub settings_service: SettingsService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn SettingsStore> = match &config.database_url {
            Some(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!().run(&pool).await?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(PgSettingsStore::new(pool))
            }
            None => {
                tracing::warn!("⚠️ DATABASE_URL ausente: configurações ficam só em memória");
                Arc::new(InMemorySettingsStore::new())
            }
        };

        let client = BackendClient::new(
            &config.backend_api_url,
            config.backend_timeout,
            config.backend_api_token.clone(),
        )?;
        tracing::info!("🔗 Backend REST: {}", config.backend_api_url);

        Ok(Self::build(client, store))
    }

    /// Monta o gráfico de dependências sobre um cliente e um store já prontos.
    pub fn build(client: BackendClient, store: Arc<dyn SettingsStore>) -> Self {
        let contacts = ContactRepository::new(client.clone());
        let property_types = PropertyTypeRepository::new(client.clone());
        let units = UnitRepository::new(client.clone());
        let developments = DevelopmentRepository::new(client.clone());
        let reservations = ReservationRepository::new(client.clone());
        let quotas = QuotaRepository::new(client.clone());
        let locations = LocationRepository::new(client.clone());
        let catalog = CatalogRepository::new(client);

        let crm_service = CrmService::new(Arc::new(contacts.clone()));
        let inventory_service =
            InventoryService::new(property_types.clone(), units.clone(), developments.clone());
        let operation_service = OperationService::new(reservations.clone());
        let finance_service = FinanceService::new(Arc::new(quotas.clone()));
        let dashboard_service = DashboardService::new(
            developments.clone(),
            units.clone(),
            reservations.clone(),
            quotas.clone(),
            contacts.clone(),
        );
        let settings_service =
            SettingsService::new(store, locations.clone(), catalog.clone(), property_types.clone());

        Self {
            contacts,
            property_types,
            units,
            developments,
            reservations,
            quotas,
            locations,
            catalog,
            crm_service,
            inventory_service,
            operation_service,
            finance_service,
            dashboard_service,
            settings_service,
        }
    }
}
