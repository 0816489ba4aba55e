pub mod grouping;
pub mod stats;

pub mod crm_service;
pub use crm_service::CrmService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod operation_service;
pub use operation_service::OperationService;
pub mod finance_service;
pub use finance_service::FinanceService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod settings_service;
pub use settings_service::SettingsService;
