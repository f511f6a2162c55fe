use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;

use futures::executor::block_on;

use super::*;
use crate::net::transport::FetchFailure;
use crate::util::storage::MemoryStorage;

#[derive(Default)]
struct FakeInner {
    replies: RefCell<VecDeque<Result<HttpReply, FetchFailure>>>,
    requests: RefCell<Vec<(String, serde_json::Value)>>,
}

/// Scripted transport: hands out queued replies and records every request.
#[derive(Clone, Default)]
struct FakeTransport {
    inner: Rc<FakeInner>,
}

impl FakeTransport {
    fn push(&self, reply: Result<HttpReply, FetchFailure>) {
        self.inner.replies.borrow_mut().push_back(reply);
    }

    fn requests(&self) -> Vec<(String, serde_json::Value)> {
        self.inner.requests.borrow().clone()
    }
}

impl AuthTransport for FakeTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<HttpReply, FetchFailure> {
        self.inner
            .requests
            .borrow_mut()
            .push((url.to_owned(), body.clone()));
        self.inner.replies.borrow_mut().pop_front().unwrap_or(Err(FetchFailure {
            message: "no scripted reply".to_owned(),
        }))
    }
}

const BASE: &str = "http://localhost:8080";

fn client() -> (AuthClient<FakeTransport>, FakeTransport, SessionStore) {
    let transport = FakeTransport::default();
    let store = SessionStore::new(Arc::new(MemoryStorage::default()));
    let client = AuthClient::new(BASE, transport.clone(), store.clone());
    (client, transport, store)
}

fn unreachable() -> Result<HttpReply, FetchFailure> {
    Err(FetchFailure {
        message: "Failed to fetch".to_owned(),
    })
}

fn reply(status: u16, body: &str) -> Result<HttpReply, FetchFailure> {
    Ok(HttpReply {
        status,
        body: body.to_owned(),
    })
}

fn signup_payload(username: &str) -> SignupPayload {
    SignupPayload {
        username: username.to_owned(),
        email: "bob@example.com".to_owned(),
        phone: "555-0100".to_owned(),
        password: "hunter22".to_owned(),
    }
}

fn login_payload(username: &str) -> LoginPayload {
    LoginPayload {
        username: username.to_owned(),
        password: "hunter22".to_owned(),
    }
}

// =============================================================
// Signup: offline fallback
// =============================================================

#[test]
fn signup_under_connectivity_failure_creates_offline_account() {
    let (client, transport, store) = client();
    transport.push(unreachable());

    let result = block_on(client.signup(&signup_payload("bob"))).expect("offline signup");

    assert!(result.success);
    assert!(result.offline);
    assert_eq!(result.username.as_deref(), Some("bob"));
    assert_eq!(result.message, "Account created (offline mode).");
    assert!(store.is_registered_offline_user("bob"));
    assert!(store.is_offline_mode());
}

#[test]
fn signup_trims_username_before_registering() {
    let (client, transport, store) = client();
    transport.push(unreachable());

    let result = block_on(client.signup(&signup_payload("  bob  "))).expect("offline signup");

    assert_eq!(result.username.as_deref(), Some("bob"));
    assert!(store.is_registered_offline_user("bob"));
    assert!(!store.is_registered_offline_user("  bob  "));
}

#[test]
fn signup_fallback_triggers_on_malformed_error_body() {
    // A proxy serving an HTML 502 page during an outage must still reach
    // the offline branch.
    let (client, transport, store) = client();
    transport.push(reply(502, "<html>Bad Gateway</html>"));

    let result = block_on(client.signup(&signup_payload("bob"))).expect("offline signup");

    assert!(result.offline);
    assert!(store.is_registered_offline_user("bob"));
}

// =============================================================
// Signup: hard failures
// =============================================================

#[test]
fn signup_rejection_is_not_offline_fallback() {
    let (client, transport, store) = client();
    transport.push(reply(
        400,
        "{\"success\":false,\"message\":\"Username already exists\"}",
    ));

    let error = block_on(client.signup(&signup_payload("bob"))).expect_err("rejection");

    assert_eq!(
        error,
        AuthError::Status {
            code: 400,
            message: "Username already exists".to_owned(),
        }
    );
    assert!(!store.is_registered_offline_user("bob"));
    assert!(!store.is_offline_mode());
}

#[test]
fn signup_non_connectivity_transport_failure_propagates() {
    let (client, transport, store) = client();
    transport.push(Err(FetchFailure {
        message: "request aborted".to_owned(),
    }));

    let error = block_on(client.signup(&signup_payload("bob"))).expect_err("transport failure");

    assert_eq!(error, AuthError::Transport("request aborted".to_owned()));
    assert!(!store.is_registered_offline_user("bob"));
}

#[test]
fn signup_invalid_success_body_is_not_offline_fallback() {
    let (client, transport, store) = client();
    transport.push(reply(201, "not json"));

    let error = block_on(client.signup(&signup_payload("bob"))).expect_err("invalid body");

    assert_eq!(error, AuthError::InvalidResponse);
    assert!(!store.is_registered_offline_user("bob"));
}

// =============================================================
// Signup: server success
// =============================================================

#[test]
fn signup_success_passes_server_result_through() {
    let (client, transport, _store) = client();
    transport.push(reply(
        201,
        "{\"success\":true,\"message\":\"Signup successful\",\"username\":\"bob\"}",
    ));

    let result = block_on(client.signup(&signup_payload("bob"))).expect("signup");

    assert!(result.success);
    assert!(!result.offline);
    assert_eq!(result.message, "Signup successful");
}

#[test]
fn signup_posts_all_fields_to_signup_endpoint() {
    let (client, transport, _store) = client();
    transport.push(unreachable());

    let _ = block_on(client.signup(&signup_payload("bob")));

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, "http://localhost:8080/api/auth/signup");
    assert_eq!(requests[0].1["username"], "bob");
    assert_eq!(requests[0].1["email"], "bob@example.com");
    assert_eq!(requests[0].1["phone"], "555-0100");
    assert_eq!(requests[0].1["password"], "hunter22");
}

// =============================================================
// Login: offline fallback
// =============================================================

#[test]
fn login_unregistered_user_under_connectivity_failure_instructs_signup() {
    let (client, transport, store) = client();
    transport.push(unreachable());

    let error = block_on(client.login(&login_payload("bob"))).expect_err("unknown offline user");

    assert_eq!(error, AuthError::UnknownOfflineUser);
    assert!(!store.is_offline_mode());
}

#[test]
fn login_registered_user_under_connectivity_failure_succeeds_offline() {
    let (client, transport, store) = client();
    transport.push(unreachable());
    let _ = block_on(client.signup(&signup_payload("bob")));
    store.clear_offline_flag();

    transport.push(unreachable());
    let result = block_on(client.login(&login_payload("bob"))).expect("offline login");

    assert!(result.success);
    assert!(result.offline);
    assert_eq!(result.username.as_deref(), Some("bob"));
    assert_eq!(result.message, "Signed in (offline mode).");
    assert!(store.is_offline_mode());
}

#[test]
fn login_trims_username_before_registry_lookup() {
    let (client, transport, _store) = client();
    transport.push(unreachable());
    let _ = block_on(client.signup(&signup_payload("bob")));

    transport.push(unreachable());
    let result = block_on(client.login(&login_payload(" bob "))).expect("offline login");

    assert_eq!(result.username.as_deref(), Some("bob"));
}

// =============================================================
// Login: hard failures and success
// =============================================================

#[test]
fn login_rejection_surfaces_server_message_verbatim() {
    let (client, transport, store) = client();
    transport.push(reply(401, "{\"success\":false,\"message\":\"bad password\"}"));

    let error = block_on(client.login(&login_payload("alice"))).expect_err("rejection");

    assert_eq!(error.to_string(), "bad password");
    assert!(matches!(error, AuthError::Status { code: 401, .. }));
    assert!(!store.is_offline_mode());
}

#[test]
fn login_rejection_without_message_synthesizes_default() {
    let (client, transport, _store) = client();
    transport.push(reply(401, "{\"success\":false}"));

    let error = block_on(client.login(&login_payload("alice"))).expect_err("rejection");

    assert_eq!(error.to_string(), "Login failed");
}

#[test]
fn login_success_passes_server_result_through() {
    let (client, transport, store) = client();
    transport.push(reply(
        200,
        "{\"success\":true,\"message\":\"Login successful\",\"username\":\"alice\"}",
    ));

    let result = block_on(client.login(&login_payload("alice"))).expect("login");

    assert!(result.success);
    assert!(!result.offline);
    assert_eq!(result.username.as_deref(), Some("alice"));
    // The client itself leaves the session and flag untouched.
    assert_eq!(store.get_session(), None);
    assert!(!store.is_offline_mode());
}

#[test]
fn login_posts_to_login_endpoint() {
    let (client, transport, _store) = client();
    transport.push(reply(200, ""));

    let _ = block_on(client.login(&login_payload("alice")));

    let requests = transport.requests();
    assert_eq!(requests[0].0, "http://localhost:8080/api/auth/login");
    assert_eq!(requests[0].1["username"], "alice");
}

// =============================================================
// Reply parsing
// =============================================================

#[test]
fn empty_success_body_is_generic_ok() {
    let parsed = parse_reply(
        &HttpReply {
            status: 200,
            body: "  ".to_owned(),
        },
        BASE,
        "Login failed",
    )
    .expect("empty body");
    assert!(parsed.success);
    assert_eq!(parsed.message, "OK");
    assert_eq!(parsed.username, None);
}

#[test]
fn empty_error_body_synthesizes_request_failed() {
    let error = parse_reply(
        &HttpReply {
            status: 503,
            body: String::new(),
        },
        BASE,
        "Login failed",
    )
    .expect_err("empty error body");
    assert_eq!(
        error,
        AuthError::Status {
            code: 503,
            message: "Request failed".to_owned(),
        }
    );
}

#[test]
fn unparseable_error_body_classifies_as_connectivity() {
    let error = parse_reply(
        &HttpReply {
            status: 502,
            body: "<html></html>".to_owned(),
        },
        BASE,
        "Login failed",
    )
    .expect_err("unparseable error body");
    assert!(error.is_connectivity());
}

#[test]
fn unparseable_success_body_is_invalid_response() {
    let error = parse_reply(
        &HttpReply {
            status: 200,
            body: "not a payload".to_owned(),
        },
        BASE,
        "Login failed",
    )
    .expect_err("unparseable success body");
    assert_eq!(error, AuthError::InvalidResponse);
}

#[test]
fn non_payload_shaped_json_is_invalid_response() {
    let error = parse_reply(
        &HttpReply {
            status: 200,
            body: "{\"unexpected\":1}".to_owned(),
        },
        BASE,
        "Login failed",
    )
    .expect_err("non-payload json");
    assert_eq!(error, AuthError::InvalidResponse);
}
