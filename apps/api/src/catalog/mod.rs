// Dorm catalog: domain models, store access and row-to-model resolution.

pub mod models;
pub mod resolver;
pub mod store;
