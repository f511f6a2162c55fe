//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use leptos_router::hooks::use_navigate;

use crate::pages::{auth::AuthPage, home::HomePage};
use crate::state::auth_form::AuthFormState;
use crate::state::session::{SessionState, SessionStore};
use crate::util::auth::install_route_guard;
use crate::util::storage::default_storage;

/// Root application component.
///
/// Builds the session service, bridges its change notifications into a
/// reactive signal, provides both via context, and sets up client-side
/// routing. Route-level redirects live in [`crate::util::auth`]; the
/// guard component below applies them to whatever path is current, so an
/// unrecognized path falls through to root and re-resolves from there.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let store = SessionStore::new(default_storage());
    let session = RwSignal::new(store.session_state());
    let subscription = store.subscribe(move |state| session.set(state.clone()));
    {
        let store = store.clone();
        on_cleanup(move || store.unsubscribe(subscription));
    }

    provide_context(store);
    provide_context(session);
    provide_context(RwSignal::new(AuthFormState::default()));

    view! {
        <Title text="CineVerse"/>

        <Router>
            <RouteGuard/>
            <Routes fallback=|| view! { <RedirectingView/> }>
                <Route path=StaticSegment("") view=RedirectingView/>
                <Route path=StaticSegment("login") view=AuthPage/>
                <Route path=StaticSegment("signup") view=AuthPage/>
                <Route path=StaticSegment("cineverse") view=HomePage/>
            </Routes>
        </Router>
    }
}

/// Applies the session redirect policy to the current location for routes
/// that carry no view of their own (root, unrecognized paths).
#[component]
fn RouteGuard() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let navigate = use_navigate();
    install_route_guard(session, navigate);
}

/// Placeholder rendered while a guard redirect is in flight.
#[component]
fn RedirectingView() -> impl IntoView {
    view! {
        <div class="app">
            <p class="redirecting">"Redirecting..."</p>
        </div>
    }
}
