// src/client/catalog_repo.rs

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::catalog::{Agency, Amenity, Currency},
};

#[derive(Clone)]
pub struct CatalogRepository {
    client: BackendClient,
}

impl CatalogRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn currencies(&self) -> Result<Vec<Currency>, AppError> {
        self.client.get_all("/currencies").await
    }

    pub async fn amenities(&self) -> Result<Vec<Amenity>, AppError> {
        self.client.get_all("/amenities").await
    }

    pub async fn agencies(&self) -> Result<Vec<Agency>, AppError> {
        self.client.get_all("/agencies").await
    }
}
