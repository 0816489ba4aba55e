// src/client/finance_repo.rs

use async_trait::async_trait;

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::{EntityId, Page, PageRequest},
        finance::{DevelopmentQuota, QuotaInput},
    },
};

const QUOTAS_PATH: &str = "/development-quotas";

/// Criação de cuotas, usada pelo gerador de planos.
#[async_trait]
pub trait QuotaGateway: Send + Sync {
    async fn create_quota(&self, input: &QuotaInput) -> Result<DevelopmentQuota, AppError>;
}

#[derive(Clone)]
pub struct QuotaRepository {
    client: BackendClient,
}

impl QuotaRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<DevelopmentQuota>, AppError> {
        self.client
            .get_list(&format!("{}{}", QUOTAS_PATH, page.to_query()))
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<DevelopmentQuota>, AppError> {
        self.client.get_all(QUOTAS_PATH).await
    }

    pub async fn list_by_unit(&self, unit_id: &EntityId) -> Result<Vec<DevelopmentQuota>, AppError> {
        self.client.get_all(&format!("/development-units/{}/quotas", unit_id.segment()?)).await
    }

    pub async fn create(&self, input: &QuotaInput) -> Result<DevelopmentQuota, AppError> {
        self.client.post_json(QUOTAS_PATH, input).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", QUOTAS_PATH, id.segment()?)).await
    }
}

#[async_trait]
impl QuotaGateway for QuotaRepository {
    async fn create_quota(&self, input: &QuotaInput) -> Result<DevelopmentQuota, AppError> {
        self.create(input).await
    }
}
