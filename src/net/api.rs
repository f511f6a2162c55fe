//! Remote auth client with local offline fallback.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signup and login go to the backend; when the backend is unreachable the
//! client falls back to the local offline-account registry. Signup always
//! recovers offline. Login recovers only for usernames registered by an
//! earlier offline signup on this device. Server rejections (duplicate
//! username, bad password) are hard failures and never fall back.
//!
//! Neither operation touches the session itself: the auth page sets it
//! after inspecting the returned [`AuthResult`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::state::session::SessionStore;

use super::error::{AuthError, classify_fetch_failure, connection_error_message};
use super::transport::{AuthTransport, HttpReply};
use super::types::{AuthResult, LoginPayload, SignupPayload};

const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
const LOGIN_ENDPOINT: &str = "/api/auth/login";

const OFFLINE_SIGNUP_MESSAGE: &str = "Account created (offline mode).";
const OFFLINE_LOGIN_MESSAGE: &str = "Signed in (offline mode).";

/// Auth client bound to an API base, a transport, and the session store
/// that owns the offline-account registry.
pub struct AuthClient<T> {
    api_base: String,
    transport: T,
    store: SessionStore,
}

impl<T: AuthTransport> AuthClient<T> {
    pub fn new(api_base: impl Into<String>, transport: T, store: SessionStore) -> Self {
        Self {
            api_base: api_base.into(),
            transport,
            store,
        }
    }

    /// Create an account. Falls back to an offline account when the backend
    /// is unreachable; that path never fails.
    ///
    /// # Errors
    ///
    /// Returns the taxonomy error for server rejections, unparseable
    /// replies, and non-connectivity transport failures.
    pub async fn signup(&self, payload: &SignupPayload) -> Result<AuthResult, AuthError> {
        let body = serde_json::json!({
            "username": payload.username,
            "email": payload.email,
            "phone": payload.phone,
            "password": payload.password,
        });
        match self.post(SIGNUP_ENDPOINT, &body, "Signup failed").await {
            Err(error) if error.is_connectivity() => {
                let username = payload.username.trim().to_owned();
                self.store.register_offline_user(&username);
                Ok(AuthResult {
                    success: true,
                    message: OFFLINE_SIGNUP_MESSAGE.to_owned(),
                    username: Some(username),
                    offline: true,
                })
            }
            outcome => outcome,
        }
    }

    /// Log in. Under a connectivity failure, succeeds offline only for a
    /// username present in the offline registry.
    ///
    /// # Errors
    ///
    /// [`AuthError::UnknownOfflineUser`] when the backend is unreachable
    /// and the username was never registered offline; otherwise the same
    /// taxonomy as [`AuthClient::signup`].
    pub async fn login(&self, payload: &LoginPayload) -> Result<AuthResult, AuthError> {
        let body = serde_json::json!({
            "username": payload.username,
            "password": payload.password,
        });
        match self.post(LOGIN_ENDPOINT, &body, "Login failed").await {
            Err(error) if error.is_connectivity() => {
                let username = payload.username.trim().to_owned();
                if self.store.is_registered_offline_user(&username) {
                    self.store.set_offline_flag();
                    Ok(AuthResult {
                        success: true,
                        message: OFFLINE_LOGIN_MESSAGE.to_owned(),
                        username: Some(username),
                        offline: true,
                    })
                } else {
                    Err(AuthError::UnknownOfflineUser)
                }
            }
            outcome => outcome,
        }
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
        default_failure: &str,
    ) -> Result<AuthResult, AuthError> {
        let url = format!("{}{endpoint}", self.api_base);
        match self.transport.post_json(&url, body).await {
            Ok(reply) => parse_reply(&reply, &self.api_base, default_failure),
            Err(failure) => Err(classify_fetch_failure(&failure, &self.api_base)),
        }
    }
}

/// Interpret a completed auth exchange.
///
/// An empty 2xx body is success with a generic `OK`; an empty error body
/// synthesizes `Request failed`. A body that is not payload-shaped is
/// `InvalidResponse` on 2xx, but a connectivity error otherwise, so that
/// malformed error bodies served during an outage still reach the
/// caller's fallback branch.
pub(crate) fn parse_reply(
    reply: &HttpReply,
    api_base: &str,
    default_failure: &str,
) -> Result<AuthResult, AuthError> {
    let text = reply.body.trim();
    if text.is_empty() {
        return if reply.ok() {
            Ok(AuthResult {
                success: true,
                message: "OK".to_owned(),
                username: None,
                offline: false,
            })
        } else {
            Err(AuthError::Status {
                code: reply.status,
                message: "Request failed".to_owned(),
            })
        };
    }
    match serde_json::from_str::<AuthResult>(text) {
        Ok(result) if reply.ok() => Ok(result),
        Ok(result) => Err(AuthError::Status {
            code: reply.status,
            message: if result.message.is_empty() {
                default_failure.to_owned()
            } else {
                result.message
            },
        }),
        Err(_) if reply.ok() => Err(AuthError::InvalidResponse),
        Err(_) => Err(AuthError::Connectivity(connection_error_message(api_base))),
    }
}
