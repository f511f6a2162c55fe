//! Build-time configuration.
//!
//! Values are baked in at compile time (`option_env!`), the trunk
//! equivalent of the original deployment's bundler env vars. A missing
//! TMDB key is a configuration error the home page turns into a setup
//! screen, not a runtime failure.

/// Auth backend base URL when `CINEVERSE_API_URL` is unset at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Base URL of the auth backend.
pub fn api_base_url() -> String {
    option_env!("CINEVERSE_API_URL")
        .unwrap_or(DEFAULT_API_BASE)
        .to_owned()
}

/// TMDB API key, if one was provided at build time.
pub fn tmdb_api_key() -> Option<String> {
    option_env!("TMDB_API_KEY").map(str::to_owned)
}
