#[cfg(test)]
mod in_memory;
mod sqlite_liquor_store;

#[cfg(test)]
pub use in_memory::InMemoryLiquorStore;
pub use sqlite_liquor_store::SqliteLiquorStore;
