//! Request extractors.

mod body;
mod path;

pub use body::JsonObject;
pub use path::PathIds;
