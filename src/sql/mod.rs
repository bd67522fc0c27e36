//! Safe SQL builder for SQLite: identifiers from the catalog only, values as parameters.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
