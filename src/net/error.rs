//! Closed error taxonomy for auth requests.
//!
//! ERROR HANDLING
//! ==============
//! Only [`AuthError::Connectivity`] triggers the offline fallback. Server
//! rejections, unparseable success bodies, and non-connectivity transport
//! failures all propagate to the form as plain messages. The connectivity
//! classification is a fixed substring table applied to fetch-level failure
//! messages; `"Network"` is matched case-sensitively.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use thiserror::Error;

use super::transport::FetchFailure;

/// Why an auth request failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend could not be reached at all.
    #[error("{0}")]
    Connectivity(String),
    /// The fetch itself failed for a non-connectivity reason.
    #[error("{0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("{message}")]
    Status { code: u16, message: String },
    /// The backend answered success but the body was not a valid payload.
    #[error("Invalid response")]
    InvalidResponse,
    /// Offline login attempted for a username never registered offline.
    #[error("No account found. Please sign up.")]
    UnknownOfflineUser,
}

impl AuthError {
    /// Whether this failure is eligible for the offline fallback.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

/// Substrings marking a fetch failure as connectivity-related. `"fetch"`
/// subsumes the browser's generic `Failed to fetch`.
pub(crate) const CONNECTION_MESSAGE_MARKERS: [&str; 4] = ["connect", "server", "Network", "fetch"];

pub(crate) fn is_connection_message(message: &str) -> bool {
    CONNECTION_MESSAGE_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Diagnostic shown (and re-classified) for unreachable-backend failures.
pub fn connection_error_message(api_base: &str) -> String {
    format!(
        "Can't connect to the server. Make sure the backend is running and reachable at {api_base}."
    )
}

/// Map a fetch-level failure into the taxonomy.
pub(crate) fn classify_fetch_failure(failure: &FetchFailure, api_base: &str) -> AuthError {
    if is_connection_message(&failure.message) {
        AuthError::Connectivity(connection_error_message(api_base))
    } else {
        AuthError::Transport(failure.message.clone())
    }
}
