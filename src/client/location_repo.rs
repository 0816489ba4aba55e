// src/client/location_repo.rs

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::EntityId,
        locations::{City, Country, Neighborhood},
    },
};

#[derive(Clone)]
pub struct LocationRepository {
    client: BackendClient,
}

impl LocationRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        self.client.get_all("/countries").await
    }

    pub async fn cities_by_country(&self, country_id: &EntityId) -> Result<Vec<City>, AppError> {
        self.client.get_all(&format!("/countries/{}/cities", country_id.segment()?)).await
    }

    pub async fn neighborhoods_by_city(&self, city_id: &EntityId) -> Result<Vec<Neighborhood>, AppError> {
        self.client.get_all(&format!("/cities/{}/neighborhoods", city_id.segment()?)).await
    }

    pub async fn all_cities(&self) -> Result<Vec<City>, AppError> {
        self.client.get_all("/cities").await
    }

    pub async fn all_neighborhoods(&self) -> Result<Vec<Neighborhood>, AppError> {
        self.client.get_all("/neighborhoods").await
    }
}
