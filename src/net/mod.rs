//! Networking modules for the auth backend and the movie catalog.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs signup/login with the offline fallback policy, `tmdb`
//! wraps the catalog REST endpoints, `transport` is the injectable HTTP
//! seam, `error` is the auth failure taxonomy, and `types` defines the
//! wire schema.

pub mod api;
pub mod error;
pub mod tmdb;
pub mod transport;
pub mod types;
