// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

pub mod database;

#[path = "catalog/mod.rs"]
pub mod catalog;

#[path = "moderation/mod.rs"]
pub mod moderation;
