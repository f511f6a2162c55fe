//! Shared auth routing helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route applies the same session-based redirect policy, and a
//! login/logout anywhere in the app must re-route mounted views without a
//! reload. The policy is a pure function over (path, session state); the
//! installer wires it to the router reactively.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_location;

use crate::state::session::SessionState;

/// Where a navigation should land.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the requested path.
    Stay,
    /// Redirect to another path.
    Redirect(&'static str),
}

/// Resolve a path against the session state.
///
/// Root re-resolves to the app or the login form; authenticated users
/// cannot reach the auth forms; the app view requires a session; anything
/// unrecognized bounces to root (which re-resolves in turn).
pub fn resolve_route(path: &str, session: &SessionState) -> RouteDecision {
    let authenticated = session.is_authenticated();
    match path {
        "/" => RouteDecision::Redirect(if authenticated { "/cineverse" } else { "/login" }),
        "/login" | "/signup" if authenticated => RouteDecision::Redirect("/cineverse"),
        "/login" | "/signup" => RouteDecision::Stay,
        "/cineverse" if !authenticated => RouteDecision::Redirect("/login"),
        "/cineverse" => RouteDecision::Stay,
        _ => RouteDecision::Redirect("/"),
    }
}

/// Re-resolve the current location whenever it or the session changes,
/// navigating (with replace) when the decision is a redirect.
pub fn install_route_guard<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        if let RouteDecision::Redirect(target) = resolve_route(&path, &session.get()) {
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}
