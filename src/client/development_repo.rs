// src/client/development_repo.rs

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::EntityId,
        developments::{Development, DevelopmentInput},
    },
};

const DEVELOPMENTS_PATH: &str = "/developments";

#[derive(Clone)]
pub struct DevelopmentRepository {
    client: BackendClient,
}

impl DevelopmentRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Development>, AppError> {
        self.client.get_all(DEVELOPMENTS_PATH).await
    }

    pub async fn get(&self, id: &EntityId) -> Result<Development, AppError> {
        self.client.get_json(&format!("{}/{}", DEVELOPMENTS_PATH, id.segment()?)).await
    }

    pub async fn create(&self, input: &DevelopmentInput) -> Result<Development, AppError> {
        self.client.post_json(DEVELOPMENTS_PATH, input).await
    }

    pub async fn update(&self, id: &EntityId, input: &DevelopmentInput) -> Result<Development, AppError> {
        self.client.put_json(&format!("{}/{}", DEVELOPMENTS_PATH, id.segment()?), input).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", DEVELOPMENTS_PATH, id.segment()?)).await
    }
}
