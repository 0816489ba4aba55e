// src/client/crm_repo.rs

use async_trait::async_trait;

use crate::{
    client::BackendClient,
    common::error::AppError,
    models::{
        common::{EntityId, Page, PageRequest},
        crm::{Contact, ContactInput},
    },
};

const CONTACTS_PATH: &str = "/contacts";

/// Criação de contatos. Separado para a importação CSV poder ser testada sem HTTP.
#[async_trait]
pub trait ContactGateway: Send + Sync {
    async fn create_contact(&self, input: &ContactInput) -> Result<Contact, AppError>;
}

#[derive(Clone)]
pub struct ContactRepository {
    client: BackendClient,
}

impl ContactRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: &PageRequest) -> Result<Page<Contact>, AppError> {
        self.client
            .get_list(&format!("{}{}", CONTACTS_PATH, page.to_query()))
            .await
    }

    /// Todos os contatos, página por página. Base das estatísticas.
    pub async fn list_all(&self) -> Result<Vec<Contact>, AppError> {
        self.client.get_all(CONTACTS_PATH).await
    }

    pub async fn get(&self, id: &EntityId) -> Result<Contact, AppError> {
        self.client.get_json(&format!("{}/{}", CONTACTS_PATH, id.segment()?)).await
    }

    pub async fn create(&self, input: &ContactInput) -> Result<Contact, AppError> {
        self.client.post_json(CONTACTS_PATH, input).await
    }

    pub async fn update(&self, id: &EntityId, input: &ContactInput) -> Result<Contact, AppError> {
        self.client.put_json(&format!("{}/{}", CONTACTS_PATH, id.segment()?), input).await
    }

    pub async fn delete(&self, id: &EntityId) -> Result<(), AppError> {
        self.client.delete(&format!("{}/{}", CONTACTS_PATH, id.segment()?)).await
    }
}

#[async_trait]
impl ContactGateway for ContactRepository {
    async fn create_contact(&self, input: &ContactInput) -> Result<Contact, AppError> {
        self.create(input).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_for(server: &MockServer) -> ContactRepository {
        let client = BackendClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        ContactRepository::new(client)
    }

    #[tokio::test]
    async fn traversal_id_never_reaches_the_backend() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let repo = repo_for(&server);
        for raw in ["../developments/5", "1?hard=true", "1#frag"] {
            let result = repo.delete(&EntityId::parse(raw)).await;
            assert!(matches!(result, Err(AppError::BusinessRule(_))), "aceitou {:?}", raw);
        }

        let received = server.received_requests().await.unwrap_or_default();
        assert!(received.is_empty());
    }

    #[tokio::test]
    async fn numeric_id_is_sent_as_a_single_segment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/contacts/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        repo_for(&server).delete(&EntityId::parse("7")).await.unwrap();
    }

    #[tokio::test]
    async fn list_all_collects_contacts_across_pages() {
        let server = MockServer::start().await;
        let contact = |id: i64| json!({ "id": id, "firstName": "Ana", "lastName": "Paz", "email": format!("c{}@x.py", id) });
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [contact(1), contact(2)], "totalElements": 3
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [contact(3)], "totalElements": 3
            })))
            .mount(&server)
            .await;

        let contacts = repo_for(&server).list_all().await.unwrap();
        assert_eq!(contacts.len(), 3);
    }
}
