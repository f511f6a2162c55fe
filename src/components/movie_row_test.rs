use super::*;

fn movie(poster_path: Option<&str>) -> Movie {
    Movie {
        id: 42,
        title: "Test".to_owned(),
        overview: String::new(),
        poster_path: poster_path.map(str::to_owned),
        backdrop_path: None,
        release_date: String::new(),
        vote_average: 0.0,
        vote_count: 0,
    }
}

#[test]
fn card_uses_poster_when_present() {
    assert_eq!(
        card_poster_url(&movie(Some("/p.jpg"))),
        "https://image.tmdb.org/t/p/w500/p.jpg"
    );
}

#[test]
fn card_falls_back_to_placeholder_without_poster() {
    assert_eq!(card_poster_url(&movie(None)), PLACEHOLDER_POSTER_URL);
}

#[test]
fn cards_deep_link_to_tmdb() {
    assert_eq!(movie_page_url(42), "https://www.themoviedb.org/movie/42");
}
