// src/db/settings_repo.rs

use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use tokio::sync::RwLock;

use crate::{common::error::AppError, models::settings::AppSettings};

const SETTINGS_KEY: &str = "app_settings";

/// Armazenamento chave-valor das configurações da aplicação.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Option<AppSettings>, AppError>;
    async fn save(&self, settings: &AppSettings) -> Result<(), AppError>;
}

// =========================================================================
//  POSTGRES
// =========================================================================

#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn load(&self) -> Result<Option<AppSettings>, AppError> {
        let row = sqlx::query_as::<_, (Json<AppSettings>,)>(
            "SELECT value FROM app_settings WHERE key = $1",
        )
        .bind(SETTINGS_KEY)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(Json(settings),)| settings))
    }

    async fn save(&self, settings: &AppSettings) -> Result<(), AppError> {
        // UPSERT: última escrita vence
        sqlx::query(
            r#"
            INSERT INTO app_settings (key, value, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(Json(settings))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// =========================================================================
//  MEMÓRIA (sem DATABASE_URL e nos testes)
// =========================================================================

#[derive(Default)]
pub struct InMemorySettingsStore {
    value: RwLock<Option<AppSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<Option<AppSettings>, AppError> {
        Ok(self.value.read().await.clone())
    }

    async fn save(&self, settings: &AppSettings) -> Result<(), AppError> {
        *self.value.write().await = Some(settings.clone());
        Ok(())
    }
}
