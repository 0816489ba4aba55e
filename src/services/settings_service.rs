// src/services/settings_service.rs

use std::sync::Arc;

use chrono::Utc;

use crate::{
    client::{CatalogRepository, LocationRepository, PropertyTypeRepository},
    common::error::AppError,
    db::SettingsStore,
    models::{
        catalog::{Agency, Amenity},
        inventory::PropertyType,
        locations::{City, Neighborhood},
        settings::{AppSettings, CompanyInfo, ContactSettings, SettingsCatalogs},
    },
    services::grouping::compare_names,
};

#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn SettingsStore>,
    locations: LocationRepository,
    catalog: CatalogRepository,
    property_types: PropertyTypeRepository,
}

impl SettingsService {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        locations: LocationRepository,
        catalog: CatalogRepository,
        property_types: PropertyTypeRepository,
    ) -> Self {
        Self { store, locations, catalog, property_types }
    }

    /// Configurações salvas ou, na primeira carga, os padrões montados a partir do backend.
    pub async fn load(&self) -> Result<AppSettings, AppError> {
        if let Some(settings) = self.store.load().await? {
            return Ok(settings);
        }

        let fetched = tokio::try_join!(
            self.locations.all_cities(),
            self.locations.all_neighborhoods(),
            self.catalog.amenities(),
            self.property_types.list(),
            self.catalog.agencies(),
        );

        match fetched {
            Ok((cities, zones, amenities, property_types, agencies)) => {
                let defaults = build_default_settings(&cities, &zones, &amenities, &property_types, &agencies);
                self.store.save(&defaults).await?;
                tracing::info!("⚙️ Configurações iniciais criadas a partir do backend");
                Ok(defaults)
            }
            Err(e) => {
                // Não persiste: na próxima carga tenta de novo
                tracing::warn!("⚠️ Não foi possível montar os padrões de configuração: {}", e);
                Ok(AppSettings::default())
            }
        }
    }

    pub async fn save(&self, mut settings: AppSettings) -> Result<AppSettings, AppError> {
        settings.updated_at = Some(Utc::now());
        self.store.save(&settings).await?;
        tracing::info!("💾 Configurações salvas");
        Ok(settings)
    }
}

fn sorted_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = names
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    out.sort_by(|a, b| compare_names(a, b));
    out.dedup();
    out
}

pub fn build_default_settings(
    cities: &[City],
    zones: &[Neighborhood],
    amenities: &[Amenity],
    property_types: &[PropertyType],
    agencies: &[Agency],
) -> AppSettings {
    let agency = agencies.iter().find(|a| a.active != Some(false));

    let company = agency
        .map(|a| CompanyInfo {
            name: a.name.clone(),
            address: a.address.clone(),
            phone: a.phone.clone(),
            email: a.email.clone(),
            agency_id: Some(a.id.clone()),
            ..Default::default()
        })
        .unwrap_or_default();

    let mut contacts = Vec::new();
    if let Some(phone) = agency.and_then(|a| a.phone.clone()) {
        contacts.push(ContactSettings { channel: "phone".into(), value: phone, label: None, primary: true });
    }
    if let Some(email) = agency.and_then(|a| a.email.clone()) {
        let primary = contacts.is_empty();
        contacts.push(ContactSettings { channel: "email".into(), value: email, label: None, primary });
    }

    AppSettings {
        company,
        contacts,
        properties: Default::default(),
        catalogs: SettingsCatalogs {
            cities: sorted_names(cities.iter().map(|c| c.name.as_str())),
            zones: sorted_names(zones.iter().map(|z| z.name.as_str())),
            amenities: sorted_names(amenities.iter().map(|a| a.name.as_str())),
            property_types: sorted_names(
                property_types
                    .iter()
                    .filter(|t| t.active != Some(false))
                    .map(|t| t.name.as_str()),
            ),
        },
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{client::BackendClient, db::InMemorySettingsStore};

    fn service(server: &MockServer, store: Arc<InMemorySettingsStore>) -> SettingsService {
        let client = BackendClient::new(&server.uri(), Duration::from_secs(5), None).unwrap();
        SettingsService::new(
            store,
            LocationRepository::new(client.clone()),
            CatalogRepository::new(client.clone()),
            PropertyTypeRepository::new(client),
        )
    }

    async fn mount_catalogs(server: &MockServer) {
        let lists = [
            ("/cities", json!([{"id": 1, "name": "Luque"}, {"id": 2, "name": "Asunción"}])),
            ("/neighborhoods", json!({"data": [{"id": 5, "name": "Villa Morra"}]})),
            ("/amenities", json!([{"id": 1, "name": "Piscina"}, {"id": 2, "name": "Gimnasio"}])),
            ("/property-types", json!({"content": [
                {"id": 1, "name": "Casa", "active": true},
                {"id": 2, "name": "Galpón", "active": false}
            ], "totalElements": 2})),
            ("/agencies", json!([
                {"id": 9, "name": "Cerrada", "active": false},
                {"id": 3, "name": "Inmobiliaria del Este", "email": "info@este.com.py", "active": true}
            ])),
        ];
        for (route, body) in lists {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn first_load_builds_and_persists_defaults() {
        let server = MockServer::start().await;
        mount_catalogs(&server).await;

        let store = Arc::new(InMemorySettingsStore::new());
        let service = service(&server, store.clone());

        let settings = service.load().await.unwrap();
        assert_eq!(settings.catalogs.cities, vec!["Asunción".to_string(), "Luque".to_string()]);
        assert_eq!(settings.catalogs.zones, vec!["Villa Morra".to_string()]);
        assert_eq!(settings.catalogs.amenities, vec!["Gimnasio".to_string(), "Piscina".to_string()]);
        assert_eq!(settings.catalogs.property_types, vec!["Casa".to_string()]);
        assert_eq!(settings.company.name, "Inmobiliaria del Este");
        assert_eq!(settings.contacts[0].channel, "email");
        assert!(settings.contacts[0].primary);
        assert_eq!(settings.properties.featured.max_items, 6);

        assert_eq!(store.load().await.unwrap(), Some(settings.clone()));

        // segunda carga vem do store: os mocks esperam uma chamada só
        let again = service.load().await.unwrap();
        assert_eq!(again, settings);
    }

    #[tokio::test]
    async fn upstream_failure_falls_back_without_saving() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = Arc::new(InMemorySettingsStore::new());
        let service = service(&server, store.clone());

        let settings = service.load().await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_stamps_and_overwrites() {
        let server = MockServer::start().await;
        let store = Arc::new(InMemorySettingsStore::new());
        let service = service(&server, store.clone());

        let mut settings = AppSettings::default();
        settings.company.name = "Nueva".into();
        let saved = service.save(settings).await.unwrap();

        assert!(saved.updated_at.is_some());
        assert_eq!(service.load().await.unwrap().company.name, "Nueva");
    }
}
