pub mod catalog;
pub mod models;

pub use catalog::{Catalog, CatalogError};
pub use models::{format_clock, Track};
