// src/client/operations_repo.rs

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::{EntityId, Page, PageRequest},
        operations::{DevelopmentReservation, ReservationInput},
    },
};

const RESERVATIONS_PATH: &str = "/development-reservations";

#[derive(Clone)]
pub struct ReservationRepository {
    client: BackendClient,
}

impl ReservationRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<DevelopmentReservation>, AppError> {
        self.client
            .get_list(&format!("{}{}", RESERVATIONS_PATH, page.to_query()))
            .await
    }

    pub async fn list_all(&self) -> Result<Vec<DevelopmentReservation>, AppError> {
        self.client.get_all(RESERVATIONS_PATH).await
    }

    pub async fn get(&self, id: &EntityId) -> Result<DevelopmentReservation, AppError> {
        self.client.get_json(&format!("{}/{}", RESERVATIONS_PATH, id.segment()?)).await
    }

    pub async fn create(&self, input: &ReservationInput) -> Result<DevelopmentReservation, AppError> {
        self.client.post_json(RESERVATIONS_PATH, input).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", RESERVATIONS_PATH, id.segment()?)).await
    }
}
