pub mod common;
pub mod crm;
pub mod inventory;
pub mod developments;
pub mod operations;
pub mod finance;
pub mod locations;
pub mod catalog;
pub mod settings;
pub mod dashboard;
