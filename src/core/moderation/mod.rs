// Core moderation module - review text filtering and the filter dictionaries.

pub mod moderation_models;
pub mod moderation_service;

pub use moderation_models::*;
pub use moderation_service::*;
