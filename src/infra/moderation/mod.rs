// Implementations for the moderation dictionaries.

#[cfg(test)]
mod in_memory;
mod sqlite_filter_store;

#[cfg(test)]
pub use in_memory::InMemoryFilterStore;
pub use sqlite_filter_store::SqliteFilterStore;
