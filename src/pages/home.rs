//! Authenticated catalog page: hero banner plus the five movie rows.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the guarded landing route. The five list fetches and the hero
//! backdrop lookup are issued together and the page renders only when all
//! of them succeed — a single failure shows the page-level error state,
//! never a partial catalog. A missing TMDB key short-circuits to a setup
//! screen before any request is made.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::hero::Hero;
use crate::components::movie_row::MovieRow;
use crate::net::types::Movie;
use crate::state::session::{SessionState, SessionStore};

#[cfg(feature = "csr")]
use crate::net::tmdb::{self, TrendingWindow};
#[cfg(feature = "csr")]
use crate::util::config;

/// Header anchor links, in row order.
const NAV_LINKS: [(&str, &str); 5] = [
    ("#trending", "Trending"),
    ("#popular", "Popular"),
    ("#now-playing", "Now Playing"),
    ("#top-rated", "Top Rated"),
    ("#upcoming", "Upcoming"),
];

/// Everything the page shows once the batch load completes.
#[derive(Clone, Debug, Default, PartialEq)]
struct Catalog {
    hero_backdrop: Option<String>,
    trending: Vec<Movie>,
    popular: Vec<Movie>,
    now_playing: Vec<Movie>,
    top_rated: Vec<Movie>,
    upcoming: Vec<Movie>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum CatalogStatus {
    #[default]
    Loading,
    MissingApiKey,
    Failed(String),
    Ready,
}

fn offline_banner_visible(session: &SessionState) -> bool {
    session.is_offline()
}

/// The authenticated CineVerse view.
#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let store = StoredValue::new(expect_context::<SessionStore>());

    let status = RwSignal::new(CatalogStatus::default());
    let catalog = RwSignal::new(Catalog::default());
    load_catalog(status, catalog);

    view! {
        <Show
            when=move || session.get().is_authenticated()
            fallback=|| {
                view! {
                    <div class="app">
                        <p class="redirecting">"Redirecting to login..."</p>
                    </div>
                }
            }
        >
            <div
                class="app"
                class=("with-offline-banner", move || offline_banner_visible(&session.get()))
            >
                <Show when=move || offline_banner_visible(&session.get())>
                    <div class="app-offline-banner">
                        "Using offline mode — start the backend to save to the database."
                    </div>
                </Show>
                <header class="app-header scrolled">
                    <span class="logo">"CineVerse"</span>
                    <nav class="nav">
                        {NAV_LINKS
                            .iter()
                            .map(|(anchor, label)| view! { <a href=*anchor>{*label}</a> })
                            .collect::<Vec<_>>()}
                    </nav>
                    <div class="app-header-user">
                        <span class="app-header-username">
                            {move || {
                                session.get().username().map(str::to_owned).unwrap_or_default()
                            }}
                        </span>
                        <button
                            type="button"
                            class="app-header-logout"
                            on:click=move |_| store.with_value(SessionStore::clear_session)
                        >
                            "Logout"
                        </button>
                    </div>
                </header>
                {move || match status.get() {
                    CatalogStatus::Loading => {
                        view! {
                            <div class="loading">
                                <div class="loading-spinner"></div>
                                <p>"Loading movies…"</p>
                            </div>
                        }
                            .into_any()
                    }
                    CatalogStatus::MissingApiKey => view! { <ApiKeyPrompt/> }.into_any(),
                    CatalogStatus::Failed(message) => {
                        view! {
                            <div class="error">
                                <p>{message}</p>
                            </div>
                        }
                            .into_any()
                    }
                    CatalogStatus::Ready => {
                        let data = catalog.get();
                        view! {
                            <Hero backdrop_url=data.hero_backdrop/>
                            <div class="rows">
                                <div id="trending">
                                    <MovieRow title="Trending Now" movies=data.trending/>
                                </div>
                                <div id="popular">
                                    <MovieRow title="Popular on CineVerse" movies=data.popular/>
                                </div>
                                <div id="now-playing">
                                    <MovieRow title="Now Playing" movies=data.now_playing/>
                                </div>
                                <div id="top-rated">
                                    <MovieRow title="Top Rated" movies=data.top_rated/>
                                </div>
                                <div id="upcoming">
                                    <MovieRow title="Upcoming" movies=data.upcoming/>
                                </div>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </div>
        </Show>
    }
}

/// Setup instructions shown when no TMDB key was baked into the build.
#[component]
fn ApiKeyPrompt() -> impl IntoView {
    view! {
        <div class="api-key-prompt">
            <h2>"TMDB API key required"</h2>
            <p>
                "Get a free API key from "
                <a
                    href="https://www.themoviedb.org/settings/api"
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    "The Movie Database"
                </a> ", then rebuild with the key in the environment:"
            </p>
            <code>"TMDB_API_KEY=your_api_key_here trunk serve"</code>
            <p class="api-key-prompt-note">"Restart the dev server after adding the key."</p>
        </div>
    }
}

/// Kick off the batched catalog load, resolving `status` exactly once.
fn load_catalog(status: RwSignal<CatalogStatus>, catalog: RwSignal<Catalog>) {
    #[cfg(feature = "csr")]
    {
        let Some(api_key) = config::tmdb_api_key() else {
            status.set(CatalogStatus::MissingApiKey);
            return;
        };
        leptos::task::spawn_local(async move {
            let (trending, popular, now_playing, top_rated, upcoming, hero) = futures::join!(
                tmdb::trending_movies(&api_key, TrendingWindow::Week),
                tmdb::popular_movies(&api_key, 1),
                tmdb::now_playing_movies(&api_key, 1),
                tmdb::top_rated_movies(&api_key, 1),
                tmdb::upcoming_movies(&api_key, 1),
                tmdb::hero_backdrop_url(&api_key),
            );
            match (trending, popular, now_playing, top_rated, upcoming, hero) {
                (
                    Ok(trending),
                    Ok(popular),
                    Ok(now_playing),
                    Ok(top_rated),
                    Ok(upcoming),
                    Ok(hero_backdrop),
                ) => {
                    catalog.set(Catalog {
                        hero_backdrop,
                        trending: trending.results,
                        popular: popular.results,
                        now_playing: now_playing.results,
                        top_rated: top_rated.results,
                        upcoming: upcoming.results,
                    });
                    status.set(CatalogStatus::Ready);
                }
                (trending, popular, now_playing, top_rated, upcoming, hero) => {
                    let message = trending
                        .err()
                        .or_else(|| popular.err())
                        .or_else(|| now_playing.err())
                        .or_else(|| top_rated.err())
                        .or_else(|| upcoming.err())
                        .or_else(|| hero.err())
                        .unwrap_or_else(|| "Failed to load movies".to_owned());
                    log::error!("catalog load failed: {message}");
                    status.set(CatalogStatus::Failed(message));
                }
            }
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (status, catalog);
    }
}
