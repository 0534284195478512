// Catalog module - liquor records and the embedded review/store collections.

pub mod catalog_models;
pub mod catalog_mutation;
pub mod catalog_service;

pub use catalog_models::*;
pub use catalog_mutation::EmbeddedMutation;
pub use catalog_service::{CatalogError, CatalogService, LiquorStore, MAX_PAGE_SIZE};
