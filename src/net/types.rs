//! Wire DTOs for the auth backend and the TMDB catalog API.
//!
//! DESIGN
//! ======
//! Auth payloads mirror the backend's JSON schema; `AuthResult` tolerates
//! missing optional fields because the server never sends `offline` (it is
//! a client-side tag) and may omit `username` on failure replies.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/auth/signup`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

/// Outcome of a signup or login attempt.
///
/// `offline` is true only for results synthesized by the local fallback;
/// callers update the session from `success` + `username` and never from
/// the message text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub offline: bool,
}

/// A movie record as returned by the TMDB list endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB movie identifier.
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    /// Poster image path fragment, if the movie has one.
    pub poster_path: Option<String>,
    /// Backdrop image path fragment, if the movie has one.
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

/// One page of movie results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoviesResponse {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}
