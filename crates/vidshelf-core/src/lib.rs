//! Core types and traits for the vidshelf video catalog.
//!
//! This crate provides the video record, the repository contract
//! implemented by the storage backends and the catalog contract that
//! the HTTP gateway talks to.

pub mod catalog;
pub mod error;
pub mod repository;
pub mod video;

pub use catalog::{Catalog, NewVideo, VideoPatch};
pub use error::{CatalogError, StorageError};
pub use repository::{ReadRepository, Repository};
pub use video::Video;
