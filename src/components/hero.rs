//! Hero banner above the movie rows.

use leptos::prelude::*;

const HERO_TITLE: &str = "MARTY SUPREME";
const HERO_DESCRIPTION: &str =
    "An epic tale of ambition and power. Experience the story that defines a generation.";

/// Full-width banner with the featured title over its fetched backdrop.
#[component]
pub fn Hero(backdrop_url: Option<String>) -> impl IntoView {
    view! {
        <section class="hero">
            {backdrop_url.map(|url| {
                view! {
                    <div
                        class="hero-backdrop"
                        style:background-image=format!("url({url})")
                    ></div>
                }
            })}
            <div class="hero-content">
                <span class="hero-trending-label">"TRENDING NOW"</span>
                <h1 class="hero-title">{HERO_TITLE}</h1>
                <p class="hero-overview">{HERO_DESCRIPTION}</p>
                <div class="hero-buttons">
                    <button type="button" class="btn btn-primary">
                        "▶ Play Now"
                    </button>
                    <button type="button" class="btn btn-secondary">
                        "ℹ More Info"
                    </button>
                </div>
            </div>
        </section>
    }
}
