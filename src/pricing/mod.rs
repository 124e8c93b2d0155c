pub mod catalog;
pub mod estimator;

pub use catalog::{Catalog, CatalogVariant, Category};
pub use estimator::{estimate, ComplexityInput, Selection};
