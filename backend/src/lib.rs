//! Image Gateway service
//!
//! Accepts image uploads, fits them into a fixed box and stores them in an S3
//! bucket, then hands out time-limited links to read them back.

/// S3-backed object storage
pub mod media_storage;

/// HTTP routes
pub mod routes;

/// Server startup
pub mod server;

/// Image resizing
pub mod transcoder;

/// Shared types: configuration, errors, extractors
pub mod types;
