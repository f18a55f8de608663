// Service exports
pub mod catalog;

pub use catalog::{parse_catalog, validate_destination, CatalogError, CatalogStore};
