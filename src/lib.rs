//! Cutting plans for fixed-length rods of window-frame profile.
//!
//! Configurations are expanded into pieces, grouped by (code, vendor), and
//! packed greedily into rods. Leftovers are pooled per material code and
//! reused by later groups of the same code within one run.

pub mod catalog;
pub mod config;
pub mod error;
pub mod expander;
pub mod packer;
pub mod pricing;
pub mod remnant;
pub mod render;
pub mod session;
pub mod types;

pub use catalog::{Catalog, Product, ProductCatalog};
pub use error::{CatalogError, OptimizeError, Result};
pub use remnant::RemnantPool;
pub use session::Optimizer;
pub use types::{Configuration, OptimizeRequest, ProjectSummary};
