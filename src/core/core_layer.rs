// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "catalog/mod.rs"]
pub mod catalog;

#[path = "moderation/mod.rs"]
pub mod moderation;

pub mod failure;
pub mod ids;
