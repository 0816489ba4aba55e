pub mod backend_client;
pub use backend_client::BackendClient;
pub mod crm_repo;
pub use crm_repo::{ContactGateway, ContactRepository};
pub mod inventory_repo;
pub use inventory_repo::{PropertyTypeRepository, UnitRepository};
pub mod development_repo;
pub use development_repo::DevelopmentRepository;
pub mod operations_repo;
pub use operations_repo::ReservationRepository;
pub mod finance_repo;
pub use finance_repo::{QuotaGateway, QuotaRepository};
pub mod location_repo;
pub use location_repo::LocationRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
