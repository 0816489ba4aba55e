pub mod crm;
pub mod dashboard;
pub mod developments;
pub mod finance;
pub mod inventory;
pub mod locations;
pub mod operations;
pub mod settings;
