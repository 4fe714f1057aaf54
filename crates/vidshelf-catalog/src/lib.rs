//! Video catalog service implementation.
//!
//! Core types are re-exported from `vidshelf_core`.

pub mod service;

pub use service::CatalogService;
pub use vidshelf_core::{Catalog, CatalogError, NewVideo, VideoPatch};
