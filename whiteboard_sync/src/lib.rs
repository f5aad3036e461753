pub mod configuration;
pub mod domain;
pub mod repositories;
pub mod startup;
pub mod sync_client;
