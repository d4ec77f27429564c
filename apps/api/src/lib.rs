//! Masonry layout engine for the photo gallery, plus the HTTP service that serves it.
//!
//! The engine in [`masonry`] is pure and synchronous. The remaining modules wrap
//! it in an Axum service so renderers can fetch a validated layout per collection.

pub mod config;
pub mod errors;
pub mod masonry;
pub mod routes;
pub mod state;
