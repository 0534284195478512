// Console commands module.
// Each feature gets its own command file.

pub mod liquor;

pub mod review;

pub mod store;

pub mod filter;
