//! # cineverse
//!
//! Leptos + WASM single-page movie browser. Renders a hero banner and
//! horizontally scrolling rows fetched from the TMDB catalog, gated behind
//! a login/signup flow that falls back to local-only offline accounts when
//! the auth backend is unreachable.
//!
//! This crate contains pages, components, application state, the network
//! clients, and the persisted session service. Browser-only glue is gated
//! behind the `csr` feature so the core logic stays testable on native
//! targets.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;
