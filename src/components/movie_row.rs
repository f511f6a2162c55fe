//! Horizontally scrolling poster row.

#[cfg(test)]
#[path = "movie_row_test.rs"]
mod movie_row_test;

use leptos::prelude::*;

use crate::net::tmdb::{PosterSize, poster_url};
use crate::net::types::Movie;

/// Shown when a movie has no poster image.
const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/160x240/333/666?text=No+Image";

fn movie_page_url(id: u64) -> String {
    format!("https://www.themoviedb.org/movie/{id}")
}

fn card_poster_url(movie: &Movie) -> String {
    poster_url(movie.poster_path.as_deref(), PosterSize::default())
        .unwrap_or_else(|| PLACEHOLDER_POSTER_URL.to_owned())
}

/// Titled row of poster cards; renders nothing for an empty list.
#[component]
pub fn MovieRow(title: &'static str, movies: Vec<Movie>) -> impl IntoView {
    (!movies.is_empty()).then(|| {
        view! {
            <section class="row">
                <h2 class="row-title">{title}</h2>
                <div class="row-slider">
                    {movies
                        .into_iter()
                        .map(|movie| {
                            let poster = card_poster_url(&movie);
                            view! {
                                <article class="poster-card">
                                    <a
                                        href=movie_page_url(movie.id)
                                        target="_blank"
                                        rel="noopener noreferrer"
                                    >
                                        <img src=poster alt=movie.title.clone() loading="lazy"/>
                                        <figcaption>{movie.title}</figcaption>
                                    </a>
                                </article>
                            }
                        })
                        .collect::<Vec<_>>()}
                </div>
            </section>
        }
    })
}
