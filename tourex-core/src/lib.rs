//! # Tourex Core
//!
//! Core library for the Tourex booking platform, providing the tour record
//! store abstraction and the tour image lifecycle.
//!
//! ## Overview
//!
//! `tourex-core` is the foundation of the Tourex server:
//!
//! - **Tour Records**: Repository port and PostgreSQL adapter for tour
//!   records, including partial updates with presence semantics
//! - **Image Store**: A single-directory file store with path confinement
//!   and durable writes
//! - **Image Lifecycle**: The replacement coordinator that transcodes
//!   uploads, updates the record, and cleans up orphaned files in an order
//!   that never leaves a record pointing at a missing file
//!
//! ## Architecture
//!
//! - [`database`]: repository ports and the PostgreSQL implementation
//! - [`image`]: image store, transcoder, and the replacement coordinator
//! - [`error`]: the crate-wide error taxonomy

pub mod database;
pub mod error;
pub mod image;

pub use database::{PostgresDatabase, PostgresTourRepository, TourRepository};
pub use error::{Result, TourError};
pub use image::{ImageStore, StoredImages, TourImageService, TourUploads, UploadedImage};
