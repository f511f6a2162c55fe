//! Combined login/signup page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Serves both `/login` and `/signup`; the active tab derives from the
//! path. Submit handlers talk to the auth backend through
//! [`crate::net::api::AuthClient`] and update the session store on
//! success — the store notification then re-routes every mounted view, so
//! no handler navigates to the app directly.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

#[cfg(feature = "csr")]
use crate::net::api::AuthClient;
#[cfg(feature = "csr")]
use crate::net::error::AuthError;
#[cfg(feature = "csr")]
use crate::net::transport::GlooTransport;
use crate::components::icons::{IconEmail, IconLock, IconPhone, IconUser};
use crate::net::types::{LoginPayload, SignupPayload};
use crate::state::auth_form::{AuthFormState, FormErrors};
use crate::state::session::SessionStore;
#[cfg(feature = "csr")]
use crate::util::config;

/// Pause before bouncing an unknown offline user to the signup tab, long
/// enough to read the message.
#[cfg(feature = "csr")]
const SIGNUP_REDIRECT_DELAY_MS: u64 = 1500;

/// Which form the page is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AuthTab {
    Login,
    Signup,
}

pub(crate) fn tab_for_path(path: &str) -> AuthTab {
    if path == "/signup" {
        AuthTab::Signup
    } else {
        AuthTab::Login
    }
}

pub(crate) fn validate_login(username: &str, password: &str) -> FormErrors {
    let mut errors = FormErrors::default();
    if username.trim().is_empty() {
        errors.username = Some("Username is required");
    }
    if password.is_empty() {
        errors.password = Some("Password is required");
    }
    errors
}

pub(crate) fn validate_signup(
    username: &str,
    email: &str,
    phone: &str,
    password: &str,
    confirm_password: &str,
) -> FormErrors {
    let mut errors = FormErrors::default();
    if username.trim().is_empty() {
        errors.username = Some("Username is required");
    }
    if email.trim().is_empty() {
        errors.email = Some("Email is required");
    }
    if phone.trim().is_empty() {
        errors.phone = Some("Phone is required");
    }
    if password.is_empty() {
        errors.password = Some("Password is required");
    } else if password.len() < 6 {
        errors.password = Some("Password must be at least 6 characters");
    }
    if password != confirm_password {
        errors.confirm_password = Some("Passwords must match");
    }
    errors
}

/// Deferred redirect target: `(path, replace)`. Submit handlers request
/// navigation through this signal because the router's `navigate` handle
/// cannot be carried into async work.
type PendingRedirect = RwSignal<Option<(&'static str, bool)>>;

/// Login/signup page with tabbed forms.
#[component]
pub fn AuthPage() -> impl IntoView {
    let form = expect_context::<RwSignal<AuthFormState>>();
    let store = expect_context::<SessionStore>();

    let navigate = use_navigate();
    let location = use_location();
    let tab = Memo::new(move |_| tab_for_path(&location.pathname.get()));

    let redirect: PendingRedirect = RwSignal::new(None);
    Effect::new(move || {
        if let Some((target, replace)) = redirect.get() {
            redirect.set(None);
            navigate(
                target,
                NavigateOptions {
                    replace,
                    ..Default::default()
                },
            );
        }
    });

    let switch_to = move |target: &'static str| {
        form.update(AuthFormState::clear_feedback);
        redirect.set(Some((target, false)));
    };

    let login_store = store.clone();
    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        if snapshot.submitting {
            return;
        }
        let errors = validate_login(&snapshot.login_username, &snapshot.login_password);
        let valid = errors.is_empty();
        form.update(|f| {
            f.errors = errors;
            f.submit_error = None;
            f.submit_success = None;
        });
        if !valid {
            return;
        }
        form.update(|f| f.submitting = true);
        start_login(
            login_store.clone(),
            form,
            redirect,
            LoginPayload {
                username: snapshot.login_username.clone(),
                password: snapshot.login_password.clone(),
            },
        );
    };

    let signup_store = store;
    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let snapshot = form.get_untracked();
        if snapshot.submitting {
            return;
        }
        let errors = validate_signup(
            &snapshot.signup_username,
            &snapshot.signup_email,
            &snapshot.signup_phone,
            &snapshot.signup_password,
            &snapshot.signup_confirm_password,
        );
        let valid = errors.is_empty();
        form.update(|f| {
            f.errors = errors;
            f.submit_error = None;
            f.submit_success = None;
        });
        if !valid {
            return;
        }
        form.update(|f| f.submitting = true);
        start_signup(
            signup_store.clone(),
            form,
            redirect,
            SignupPayload {
                username: snapshot.signup_username.clone(),
                email: snapshot.signup_email.clone(),
                phone: snapshot.signup_phone.clone(),
                password: snapshot.signup_password.clone(),
            },
        );
    };

    view! {
        <div class="auth-container">
            <div class="auth-card">
                <div class="auth-card-inner">
                    <div class="auth-card-left">
                        <div class="auth-visual">
                            <div class="auth-visual-shape auth-visual-circle"></div>
                            <div class="auth-visual-shape auth-visual-wave"></div>
                            <div class="auth-visual-shape auth-visual-reel"></div>
                        </div>
                        <div class="auth-welcome-overlay">
                            <p class="auth-welcome-title">"Welcome to CineVerse!"</p>
                            <p class="auth-welcome-sub">"Login to explore"</p>
                        </div>
                    </div>

                    <div class="auth-card-right">
                        <h1 class="auth-heading">
                            {move || {
                                if tab.get() == AuthTab::Login {
                                    "Login your account!"
                                } else {
                                    "Create your account!"
                                }
                            }}
                        </h1>

                        <Show when=move || form.get().submit_error.is_some()>
                            <p class="auth-submit-error" role="alert">
                                {move || form.get().submit_error.unwrap_or_default()}
                            </p>
                        </Show>
                        <Show when=move || form.get().submit_success.is_some()>
                            <p class="auth-submit-success" role="status">
                                {move || form.get().submit_success.unwrap_or_default()}
                            </p>
                        </Show>

                        <div class="tabs">
                            <div
                                role="button"
                                tabindex="0"
                                class="tab"
                                class=("active", move || tab.get() == AuthTab::Login)
                                on:click=move |_| switch_to("/login")
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Enter" || ev.key() == " " {
                                        switch_to("/login");
                                    }
                                }
                            >
                                "Login"
                            </div>
                            <div
                                role="button"
                                tabindex="0"
                                class="tab"
                                class=("active", move || tab.get() == AuthTab::Signup)
                                on:click=move |_| switch_to("/signup")
                                on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                                    if ev.key() == "Enter" || ev.key() == " " {
                                        switch_to("/signup");
                                    }
                                }
                            >
                                "Sign up"
                            </div>
                        </div>

                        <div class="auth-forms">
                            <form
                                class="auth-form auth-form--login"
                                class=("auth-form--visible", move || tab.get() == AuthTab::Login)
                                on:submit=on_login
                                novalidate=true
                            >
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconUser/>
                                        <input
                                            type="text"
                                            placeholder="Username"
                                            autocomplete="username"
                                            prop:value=move || form.get().login_username
                                            on:input=move |ev| {
                                                form.update(|f| f.login_username = event_target_value(&ev));
                                            }
                                            on:focus=move |_| form.update(|f| f.errors.username = None)
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .username
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconLock/>
                                        <input
                                            type="password"
                                            placeholder="Password"
                                            autocomplete="current-password"
                                            prop:value=move || form.get().login_password
                                            on:input=move |ev| {
                                                form.update(|f| f.login_password = event_target_value(&ev));
                                            }
                                            on:focus=move |_| form.update(|f| f.errors.password = None)
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .password
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <a href="#" class="auth-forgot">"Forgot password?"</a>
                                <button
                                    type="submit"
                                    class="auth-btn"
                                    disabled=move || form.get().submitting
                                >
                                    {move || if form.get().submitting { "Signing in…" } else { "Continue" }}
                                </button>
                            </form>

                            <form
                                class="auth-form auth-form--signup"
                                class=("auth-form--visible", move || tab.get() == AuthTab::Signup)
                                on:submit=on_signup
                                novalidate=true
                            >
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconUser/>
                                        <input
                                            type="text"
                                            placeholder="Username"
                                            autocomplete="username"
                                            prop:value=move || form.get().signup_username
                                            on:input=move |ev| {
                                                form.update(|f| f.signup_username = event_target_value(&ev));
                                            }
                                            on:focus=move |_| form.update(|f| f.errors.username = None)
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .username
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconEmail/>
                                        <input
                                            type="email"
                                            placeholder="Email"
                                            autocomplete="email"
                                            prop:value=move || form.get().signup_email
                                            on:input=move |ev| {
                                                form.update(|f| f.signup_email = event_target_value(&ev));
                                            }
                                            on:focus=move |_| form.update(|f| f.errors.email = None)
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .email
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconPhone/>
                                        <input
                                            type="tel"
                                            placeholder="Phone"
                                            autocomplete="tel"
                                            prop:value=move || form.get().signup_phone
                                            on:input=move |ev| {
                                                form.update(|f| f.signup_phone = event_target_value(&ev));
                                            }
                                            on:focus=move |_| form.update(|f| f.errors.phone = None)
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .phone
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconLock/>
                                        <input
                                            type="password"
                                            placeholder="Password"
                                            autocomplete="new-password"
                                            prop:value=move || form.get().signup_password
                                            on:input=move |ev| {
                                                form.update(|f| f.signup_password = event_target_value(&ev));
                                            }
                                            on:focus=move |_| {
                                                form.update(|f| {
                                                    f.errors.password = None;
                                                    f.errors.confirm_password = None;
                                                });
                                            }
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .password
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <div class="auth-field">
                                    <div class="auth-input-wrap">
                                        <IconLock/>
                                        <input
                                            type="password"
                                            placeholder="Confirm Password"
                                            autocomplete="new-password"
                                            prop:value=move || form.get().signup_confirm_password
                                            on:input=move |ev| {
                                                form.update(|f| {
                                                    f.signup_confirm_password = event_target_value(&ev);
                                                });
                                            }
                                            on:focus=move |_| {
                                                form.update(|f| f.errors.confirm_password = None)
                                            }
                                        />
                                    </div>
                                    {move || {
                                        form.get()
                                            .errors
                                            .confirm_password
                                            .map(|msg| view! { <span class="auth-error">{msg}</span> })
                                    }}
                                </div>
                                <button
                                    type="submit"
                                    class="auth-btn"
                                    disabled=move || form.get().submitting
                                >
                                    {move || {
                                        if form.get().submitting { "Creating account…" } else { "Sign up" }
                                    }}
                                </button>
                            </form>
                        </div>

                        <p class="auth-switch">
                            {move || {
                                if tab.get() == AuthTab::Login {
                                    view! {
                                        "Don't have an account? "
                                        <button
                                            type="button"
                                            class="auth-link"
                                            on:click=move |_| switch_to("/signup")
                                        >
                                            "Sign up"
                                        </button>
                                    }
                                        .into_any()
                                } else {
                                    view! {
                                        "Already have an account? "
                                        <button
                                            type="button"
                                            class="auth-link"
                                            on:click=move |_| switch_to("/login")
                                        >
                                            "Login"
                                        </button>
                                    }
                                        .into_any()
                                }
                            }}
                        </p>
                    </div>
                </div>
            </div>
        </div>
    }
}

/// Run the login request off the render path and fold the outcome back
/// into the form and session.
fn start_login(
    store: SessionStore,
    form: RwSignal<AuthFormState>,
    redirect: PendingRedirect,
    payload: LoginPayload,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let client = AuthClient::new(config::api_base_url(), GlooTransport, store.clone());
            match client.login(&payload).await {
                Ok(result) => {
                    if result.success && let Some(username) = result.username.as_deref() {
                        if !result.offline {
                            store.clear_offline_flag();
                        }
                        // The store notification re-routes to /cineverse.
                        store.set_session(username);
                    }
                }
                Err(error) => {
                    let unknown_offline_user = matches!(error, AuthError::UnknownOfflineUser);
                    form.update(|f| f.submit_error = Some(error.to_string()));
                    if unknown_offline_user {
                        gloo_timers::future::sleep(std::time::Duration::from_millis(
                            SIGNUP_REDIRECT_DELAY_MS,
                        ))
                        .await;
                        redirect.set(Some(("/signup", false)));
                    }
                }
            }
            form.update(|f| f.submitting = false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (store, redirect, payload);
        form.update(|f| f.submitting = false);
    }
}

/// Run the signup request off the render path. Success never logs the new
/// account in; it prefills the login form and switches tabs.
fn start_signup(
    store: SessionStore,
    form: RwSignal<AuthFormState>,
    redirect: PendingRedirect,
    payload: SignupPayload,
) {
    #[cfg(feature = "csr")]
    {
        leptos::task::spawn_local(async move {
            let client = AuthClient::new(config::api_base_url(), GlooTransport, store.clone());
            match client.signup(&payload).await {
                Ok(result) => {
                    if result.success && let Some(username) = result.username {
                        if !result.offline {
                            store.clear_offline_flag();
                        }
                        form.update(|f| {
                            f.submit_success = Some("Account created. Please log in.".to_owned());
                            f.login_username = username;
                            f.login_password = String::new();
                        });
                        redirect.set(Some(("/login", true)));
                    }
                }
                Err(error) => {
                    form.update(|f| f.submit_error = Some(error.to_string()));
                }
            }
            form.update(|f| f.submitting = false);
        });
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (store, redirect, payload);
        form.update(|f| f.submitting = false);
    }
}
