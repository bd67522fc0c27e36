//! Entity catalog: raw JSON types, loading, validation, and the resolved runtime model.

pub mod loader;
pub mod resolved;
pub mod types;
pub mod validator;

pub use loader::{bookstore_model, load_catalog, load_catalog_from_str, resolve};
pub use resolved::{ColumnInfo, ResolvedEntity, ResolvedModel};
pub use types::*;
pub use validator::validate;
