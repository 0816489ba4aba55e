// src/client/backend_client.rs

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::{
    common::error::{AppError, GENERIC_BACKEND_MESSAGE},
    models::common::{Page, PageRequest},
};

// Tamanho de página usado ao percorrer listagens inteiras
const WALK_PAGE_SIZE: u32 = 100;
const MAX_WALK_PAGES: u32 = 500;

/// Cliente da API REST do backend. Barato de clonar (o reqwest já usa Arc por dentro).
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> Result<Self, AppError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("backoffice/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // Envia e devolve o corpo em texto; qualquer status não-2xx vira AppError::Backend
    async fn send(&self, builder: RequestBuilder, method: &Method, path: &str) -> Result<String, AppError> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("🔥 {} {} falhou: {}", method, path, e);
            AppError::Http(e)
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let extracted = extract_error_message(&body);
            if status == StatusCode::NOT_FOUND && extracted.is_none() {
                tracing::warn!("⚠️ {} {} -> 404", method, path);
                return Err(AppError::NotFound);
            }
            let message = extracted.unwrap_or_else(|| GENERIC_BACKEND_MESSAGE.to_string());
            tracing::error!("🔥 {} {} -> {}: {}", method, path, status.as_u16(), message);
            return Err(AppError::Backend { status: status.as_u16(), message });
        }

        tracing::debug!("{} {} -> {}", method, path, status.as_u16());
        Ok(body)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let body = self.send(self.request(Method::GET, path), &Method::GET, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// GET de uma listagem, normalizando o envelope para `Page<T>`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Page<T>, AppError> {
        let body = self.send(self.request(Method::GET, path), &Method::GET, path).await?;
        normalize_list(&body)
    }

    /// Percorre a listagem página por página até alcançar o `total` informado.
    /// Arrays puros chegam completos na primeira chamada.
    pub async fn get_all<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let mut items = Vec::new();
        let mut page = 0;

        loop {
            let request = PageRequest { page: Some(page), size: Some(WALK_PAGE_SIZE) };
            let chunk: Page<T> = self.get_list(&format!("{}{}", path, request.to_query())).await?;
            let received = chunk.items.len();
            items.extend(chunk.items);

            if received == 0 || items.len() as u64 >= chunk.total {
                break;
            }
            page += 1;
            if page >= MAX_WALK_PAGES {
                tracing::warn!("⚠️ {} parou em {} páginas ({} de {} itens)", path, page, items.len(), chunk.total);
                break;
            }
        }

        Ok(items)
    }

    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::POST, path).json(payload);
        let body = self.send(builder, &Method::POST, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn put_json<B, T>(&self, path: &str, payload: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(payload);
        let body = self.send(builder, &Method::PUT, path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path), &Method::DELETE, path).await?;
        Ok(())
    }
}

// ---
// Envelopes de listagem
// ---
// O backend devolve às vezes um array puro, às vezes uma página
// { content, totalElements, ... } e às vezes { data: [...] }.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Bare(Vec<T>),
    #[serde(rename_all = "camelCase")]
    Paged {
        content: Vec<T>,
        total_elements: Option<u64>,
        number: Option<u32>,
        size: Option<u32>,
    },
    Wrapped {
        data: Vec<T>,
        total: Option<u64>,
    },
}

impl<T> ListEnvelope<T> {
    fn into_page(self) -> Page<T> {
        match self {
            ListEnvelope::Bare(items) => Page::from_items(items),
            ListEnvelope::Paged { content, total_elements, number, size } => {
                let len = content.len();
                Page {
                    items: content,
                    total: total_elements.unwrap_or(len as u64),
                    page: number.unwrap_or(0),
                    page_size: size.unwrap_or(len as u32),
                }
            }
            ListEnvelope::Wrapped { data, total } => {
                let mut page = Page::from_items(data);
                if let Some(total) = total {
                    page.total = total;
                }
                page
            }
        }
    }
}

pub(crate) fn normalize_list<T: DeserializeOwned>(body: &str) -> Result<Page<T>, AppError> {
    let body = body.trim();
    if body.is_empty() || body == "null" {
        return Ok(Page::empty());
    }
    let envelope: ListEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.into_page())
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error", "detail"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    fn client_for(server: &MockServer) -> BackendClient {
        BackendClient::new(&server.uri(), Duration::from_secs(5), Some("secret".into())).unwrap()
    }

    #[test]
    fn normalizes_every_list_shape() {
        let bare: Page<Item> = normalize_list(r#"[{"id":1},{"id":2}]"#).unwrap();
        assert_eq!(bare.items.len(), 2);
        assert_eq!(bare.total, 2);

        let paged: Page<Item> = normalize_list(
            r#"{"content":[{"id":3}],"totalElements":40,"totalPages":40,"number":2,"size":1}"#,
        )
        .unwrap();
        assert_eq!(paged.items, vec![Item { id: 3 }]);
        assert_eq!(paged.total, 40);
        assert_eq!(paged.page, 2);
        assert_eq!(paged.page_size, 1);

        let wrapped: Page<Item> = normalize_list(r#"{"data":[{"id":4}]}"#).unwrap();
        assert_eq!(wrapped.items, vec![Item { id: 4 }]);

        let empty: Page<Item> = normalize_list("  ").unwrap();
        assert!(empty.items.is_empty());
        let null: Page<Item> = normalize_list("null").unwrap();
        assert_eq!(null.total, 0);
    }

    #[test]
    fn rejects_bodies_that_are_not_lists() {
        let result: Result<Page<Item>, _> = normalize_list(r#"{"id":1}"#);
        assert!(matches!(result, Err(AppError::Decode(_))));
    }

    #[test]
    fn error_message_is_taken_from_the_payload() {
        assert_eq!(extract_error_message(r#"{"message":"Unidad no existe"}"#).as_deref(), Some("Unidad no existe"));
        assert_eq!(extract_error_message(r#"{"error":"Conflicto"}"#).as_deref(), Some("Conflicto"));
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message(r#"{"message":"  "}"#), None);
    }

    #[tokio::test]
    async fn get_list_sends_the_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [{"id": 9}], "totalElements": 1 })))
            .mount(&server)
            .await;

        let page: Page<Item> = client_for(&server).get_list("/contacts").await.unwrap();
        assert_eq!(page.items, vec![Item { id: 9 }]);
    }

    #[tokio::test]
    async fn non_success_status_becomes_backend_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/development-quotas"))
            .and(body_json(json!({ "amount": 10 })))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({ "message": "Cuota duplicada" })))
            .mount(&server)
            .await;

        let result: Result<Item, _> = client_for(&server)
            .post_json("/development-quotas", &json!({ "amount": 10 }))
            .await;

        match result {
            Err(AppError::Backend { status, message }) => {
                assert_eq!(status, 409);
                assert_eq!(message, "Cuota duplicada");
            }
            other => panic!("esperava erro do backend, veio {:?}", other),
        }
    }

    #[tokio::test]
    async fn server_error_without_payload_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/contacts/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server).delete("/contacts/1").await.unwrap_err();
        assert_eq!(err.user_message(), GENERIC_BACKEND_MESSAGE);
    }

    #[tokio::test]
    async fn get_all_walks_every_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("page", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"id": 1}, {"id": 2}], "totalElements": 3, "number": 0, "size": 2
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"id": 3}], "totalElements": 3, "number": 1, "size": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let items: Vec<Item> = client_for(&server).get_all("/contacts").await.unwrap();
        assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }, Item { id: 3 }]);
    }

    #[tokio::test]
    async fn get_all_stops_after_a_bare_array() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
            .expect(1)
            .mount(&server)
            .await;

        let items: Vec<Item> = client_for(&server).get_all("/currencies").await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn bare_not_found_becomes_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/developments/99"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/developments/98"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Desarrollo no existe" })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let missing: Result<Item, _> = client.get_json("/developments/99").await;
        let err = missing.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
        assert_eq!(err.to_api_error().status, axum::http::StatusCode::NOT_FOUND);

        let explained: Result<Item, _> = client.get_json("/developments/98").await;
        assert_eq!(explained.unwrap_err().user_message(), "Desarrollo no existe");
    }
}
