// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Settings ---
        handlers::settings::get_settings,
        handlers::settings::update_settings,

        // --- CRM ---
        handlers::crm::list_contacts,
        handlers::crm::create_contact,
        handlers::crm::get_contact,
        handlers::crm::update_contact,
        handlers::crm::delete_contact,
        handlers::crm::import_contacts,
        handlers::crm::contact_stats,

        // --- INVENTORY ---
        handlers::inventory::list_property_types,
        handlers::inventory::grouped_property_types,
        handlers::inventory::create_property_type,
        handlers::inventory::update_property_type,
        handlers::inventory::delete_property_type,
        handlers::inventory::list_units,
        handlers::inventory::grouped_units,
        handlers::inventory::create_unit,
        handlers::inventory::update_unit,
        handlers::inventory::delete_unit,
        handlers::inventory::unit_stats,

        // --- Developments ---
        handlers::developments::list_developments,
        handlers::developments::get_development,
        handlers::developments::create_development,
        handlers::developments::update_development,
        handlers::developments::delete_development,
        handlers::developments::development_stats,

        // --- OPERATIONS ---
        handlers::operations::list_reservations,
        handlers::operations::get_reservation,
        handlers::operations::create_reservation,
        handlers::operations::delete_reservation,
        handlers::operations::reservation_stats,

        // --- FINANCE ---
        handlers::finance::list_quotas,
        handlers::finance::create_quota,
        handlers::finance::delete_quota,
        handlers::finance::quota_stats,
        handlers::finance::preview_plan,
        handlers::finance::generate_plan,

        // --- Locations / Catálogos ---
        handlers::locations::list_countries,
        handlers::locations::list_cities,
        handlers::locations::list_neighborhoods,
        handlers::locations::list_currencies,
        handlers::locations::list_amenities,

        // --- Dashboard ---
        handlers::dashboard::get_overview,
    ),
    components(
        schemas(
            // --- Comuns ---
            models::common::EntityId,
            models::common::BatchItemResult,
            models::common::ImportSummary,

            // --- DASHBOARD ---
            models::dashboard::TypeStat,
            models::dashboard::DevelopmentSummary,
            models::dashboard::UnitSummary,
            models::dashboard::ReservationSummary,
            models::dashboard::QuotaSummary,
            models::dashboard::ContactSummary,
            models::dashboard::DashboardOverview,

            // --- Settings ---
            models::settings::AppSettings,
            models::settings::CompanyInfo,
            models::settings::ContactSettings,
            models::settings::PropertySettings,
            models::settings::FeaturedCriteria,
            models::settings::PremiumCriteria,
            models::settings::SettingsCatalogs,

            // --- CRM ---
            models::crm::ContactType,
            models::crm::ContactStatus,
            models::crm::Budget,
            models::crm::AreaRange,
            models::crm::ContactPreferences,
            models::crm::Contact,
            models::crm::ContactInput,

            // --- Inventory ---
            models::inventory::PropertyType,
            models::inventory::PropertyTypeInput,
            models::inventory::GroupRole,
            models::inventory::PropertyTypeRow,
            models::inventory::UnitType,
            models::inventory::UnitStatus,
            models::inventory::DevelopmentUnit,
            models::inventory::UnitInput,
            models::inventory::UnitGroup,

            // --- Developments ---
            models::developments::DevelopmentType,
            models::developments::DevelopmentStatus,
            models::developments::Development,
            models::developments::DevelopmentInput,

            // --- Operations ---
            models::operations::ReservationStatus,
            models::operations::DevelopmentReservation,
            models::operations::CreateReservationPayload,
            models::operations::ReservationInput,

            // --- FINANCE ---
            models::finance::QuotaType,
            models::finance::QuotaStatus,
            models::finance::DevelopmentQuota,
            models::finance::QuotaInput,
            models::finance::CreateQuotaPayload,
            models::finance::AmountType,
            models::finance::PlanFrequency,
            models::finance::PlanRequest,
            models::finance::PlanPreview,
            models::finance::PlanReport,

            // --- Locations / Catálogos ---
            models::locations::Country,
            models::locations::City,
            models::locations::Neighborhood,
            models::catalog::Currency,
            models::catalog::Amenity,
        )
    ),
    tags(
        (name = "Settings", description = "Configurações da aplicação"),
        (name = "CRM", description = "Contatos e importação CSV"),
        (name = "Inventory", description = "Tipos de imóvel e unidades"),
        (name = "Developments", description = "Empreendimentos"),
        (name = "Operations", description = "Reservas de unidades"),
        (name = "Finance", description = "Cuotas e planos de pagamento"),
        (name = "Locations", description = "País, cidade e bairro"),
        (name = "Catalogs", description = "Moedas e amenidades"),
        (name = "Dashboard", description = "Indicadores gerenciais")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

// O token configurado é repassado ao backend; o esquema fica documentado para o Swagger
impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "backend_token",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_the_plan_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/quotas/plan"));
        assert!(doc.paths.paths.contains_key("/api/property-types/grouped"));
        assert!(doc.paths.paths.contains_key("/api/contacts/import"));
    }
}
