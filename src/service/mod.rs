//! Catalog rules and request validation, independent of HTTP.

mod catalog;
mod validation;
pub use catalog::CatalogService;
pub use validation::{FieldKind, FieldRule, RequestValidator, PEOPLE_FIELDS, PLANET_FIELDS, USER_FIELDS};
