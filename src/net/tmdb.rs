//! REST helpers for the TMDB movie catalog.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: stubs returning errors since the catalog is only
//! reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Thin wrappers with no retry or backoff: a non-success status becomes a
//! `TMDB API error: <status>` string and the page decides what to show.

#[cfg(test)]
#[path = "tmdb_test.rs"]
mod tmdb_test;

use super::types::MoviesResponse;

/// TMDB REST API base.
pub const TMDB_API_BASE: &str = "https://api.themoviedb.org/3";
/// TMDB image CDN base.
pub const TMDB_IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Title searched for the hero banner backdrop.
pub const HERO_SEARCH_QUERY: &str = "Marty Supreme";

/// Time window for the trending list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrendingWindow {
    Day,
    #[default]
    Week,
}

impl TrendingWindow {
    fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
        }
    }
}

/// Poster render sizes offered by the image CDN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PosterSize {
    W342,
    #[default]
    W500,
    W780,
}

impl PosterSize {
    fn as_str(self) -> &'static str {
        match self {
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
        }
    }
}

/// Backdrop render sizes offered by the image CDN.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackdropSize {
    W780,
    #[default]
    W1280,
    Original,
}

impl BackdropSize {
    fn as_str(self) -> &'static str {
        match self {
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

/// Full poster image URL for a TMDB poster path, `None` without one.
pub fn poster_url(path: Option<&str>, size: PosterSize) -> Option<String> {
    path.map(|path| format!("{TMDB_IMAGE_BASE}/{}{path}", size.as_str()))
}

/// Full backdrop image URL for a TMDB backdrop path, `None` without one.
pub fn backdrop_url(path: Option<&str>, size: BackdropSize) -> Option<String> {
    path.map(|path| format!("{TMDB_IMAGE_BASE}/{}{path}", size.as_str()))
}

fn endpoint_url(path: &str, api_key: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{TMDB_API_BASE}{path}{separator}api_key={api_key}")
}

fn trending_path(window: TrendingWindow) -> String {
    format!("/trending/movie/{}?language=en-US", window.as_str())
}

fn popular_path(page: u32) -> String {
    format!("/movie/popular?language=en-US&page={page}")
}

fn now_playing_path(page: u32) -> String {
    format!("/movie/now_playing?language=en-US&page={page}")
}

fn top_rated_path(page: u32) -> String {
    format!("/movie/top_rated?language=en-US&page={page}")
}

fn upcoming_path(page: u32) -> String {
    format!("/movie/upcoming?language=en-US&page={page}")
}

fn search_path(query: &str) -> String {
    format!("/search/movie?language=en-US&query={}", urlencoding::encode(query))
}

#[cfg(any(test, feature = "csr"))]
fn tmdb_error_message(status: u16) -> String {
    format!("TMDB API error: {status}")
}

#[cfg(feature = "csr")]
async fn fetch_movies(url: String) -> Result<MoviesResponse, String> {
    let response = gloo_net::http::Request::get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(tmdb_error_message(response.status()));
    }
    response.json::<MoviesResponse>().await.map_err(|e| e.to_string())
}

#[cfg(not(feature = "csr"))]
async fn fetch_movies(url: String) -> Result<MoviesResponse, String> {
    let _ = url;
    Err("not available outside the browser".to_owned())
}

/// Fetch the trending movie list for a time window.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn trending_movies(
    api_key: &str,
    window: TrendingWindow,
) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&trending_path(window), api_key)).await
}

/// Fetch a page of the popular movie list.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn popular_movies(api_key: &str, page: u32) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&popular_path(page), api_key)).await
}

/// Fetch a page of the now-playing movie list.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn now_playing_movies(api_key: &str, page: u32) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&now_playing_path(page), api_key)).await
}

/// Fetch a page of the top-rated movie list.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn top_rated_movies(api_key: &str, page: u32) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&top_rated_path(page), api_key)).await
}

/// Fetch a page of the upcoming movie list.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn upcoming_movies(api_key: &str, page: u32) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&upcoming_path(page), api_key)).await
}

/// Search movies by title.
///
/// # Errors
///
/// Returns an error string on transport failure or a non-success status.
pub async fn search_movies(api_key: &str, query: &str) -> Result<MoviesResponse, String> {
    fetch_movies(endpoint_url(&search_path(query), api_key)).await
}

/// Backdrop URL for the hero banner: the first search hit for
/// [`HERO_SEARCH_QUERY`], at original resolution. `None` when the movie or
/// its backdrop is missing.
///
/// # Errors
///
/// Returns an error string when the search request itself fails.
pub async fn hero_backdrop_url(api_key: &str) -> Result<Option<String>, String> {
    let found = search_movies(api_key, HERO_SEARCH_QUERY).await?;
    Ok(found
        .results
        .first()
        .and_then(|movie| backdrop_url(movie.backdrop_path.as_deref(), BackdropSize::Original)))
}
