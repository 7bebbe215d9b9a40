// crates/shelter-gate-client/tests/http_client.rs
// ============================================================================
// Module: BackendClient HTTP Tests
// Description: Login and logout against a local tiny_http server.
// ============================================================================

//! HTTP client tests for shelter-gate-client.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;

use shelter_gate_client::BackendClient;
use shelter_gate_client::ClientError;
use shelter_gate_config::BackendConfig;
use shelter_gate_core::Authenticator;
use shelter_gate_core::Capability;
use shelter_gate_core::Credentials;
use shelter_gate_core::InMemorySessionStore;
use shelter_gate_core::LoginError;
use shelter_gate_core::NoopAuditSink;
use shelter_gate_core::Role;
use shelter_gate_core::SessionBackend;
use shelter_gate_core::SessionStore;
use shelter_gate_core::SessionToken;
use shelter_gate_core::sign_in;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// What the server observed for one request.
struct Observed {
    method: String,
    url: String,
    body: String,
    authorization: Option<String>,
}

/// Serves exactly one request with the given status and body.
fn serve_once(
    status: u16,
    body: &'static str,
) -> (String, mpsc::Receiver<Observed>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr().to_ip().expect("ip addr");
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        if let Ok(mut request) = server.recv() {
            let mut content = String::new();
            let _ = request.as_reader().read_to_string(&mut content);
            let authorization = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("Authorization"))
                .map(|header| header.value.to_string());
            let _ = tx.send(Observed {
                method: request.method().to_string(),
                url: request.url().to_string(),
                body: content,
                authorization,
            });
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(Header::from_bytes("Content-Type", "application/json").unwrap());
            request.respond(response).expect("respond");
        }
    });
    (format!("http://{addr}"), rx, handle)
}

fn client_for(base_url: &str) -> BackendClient {
    BackendClient::from_config(&BackendConfig::new(base_url)).expect("backend client")
}

fn credentials() -> Credentials {
    Credentials::new("ana@refugio.org", "clave-secreta")
}

// ============================================================================
// SECTION: Construction
// ============================================================================

#[test]
fn endpoints_keep_base_path_prefix() {
    let client = client_for("https://api.refugio.org/v1/");
    assert_eq!(client.login_url().as_str(), "https://api.refugio.org/v1/login");
    assert_eq!(client.logout_url().as_str(), "https://api.refugio.org/v1/logout");
}

#[test]
fn invalid_config_is_rejected() {
    let err = BackendClient::from_config(&BackendConfig::new("file:///etc/passwd")).unwrap_err();
    assert!(matches!(err, ClientError::Config(_)));
}

// ============================================================================
// SECTION: Login
// ============================================================================

#[test]
fn login_posts_credentials_and_parses_session() {
    let (base, rx, handle) = serve_once(
        200,
        r#"{"tipo":"funcionario","nombre":"Ana","token":"jwt-9","permisos":["CrearProducto","Desconocido"]}"#,
    );
    let sign_in = client_for(&base).login(&credentials()).expect("login");
    handle.join().expect("server thread");

    let observed = rx.recv().expect("observed request");
    assert_eq!(observed.method, "POST");
    assert_eq!(observed.url, "/login");
    let sent: serde_json::Value = serde_json::from_str(&observed.body).expect("json body");
    assert_eq!(sent["email"], "ana@refugio.org");
    assert_eq!(sent["password"], "clave-secreta");

    assert_eq!(sign_in.session.actor.role, Role::Staff);
    assert!(sign_in.session.actor.granted.contains(Capability::CrearProducto));
    assert_eq!(sign_in.session.token, Some(SessionToken::new("jwt-9")));
    assert_eq!(sign_in.unrecognized, vec!["Desconocido".to_string()]);
}

#[test]
fn rejected_login_reports_status_and_message() {
    let (base, _rx, handle) = serve_once(401, r#"{"mensaje":"Credenciales incorrectas"}"#);
    let err = client_for(&base).login(&credentials()).unwrap_err();
    handle.join().expect("server thread");
    match err {
        LoginError::Rejected {
            status,
            message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Credenciales incorrectas"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn redirect_is_not_followed() {
    let (base, _rx, handle) = serve_once(302, "{}");
    let err = client_for(&base).login(&credentials()).unwrap_err();
    handle.join().expect("server thread");
    assert!(matches!(err, LoginError::Rejected { status: 302, .. }));
}

#[test]
fn oversized_response_is_malformed() {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr().to_ip().expect("ip addr");
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let body = format!(r#"{{"tipo":"persona","nombre":"{}"}}"#, "a".repeat(4096));
            request.respond(Response::from_string(body)).expect("respond");
        }
    });
    let mut config = BackendConfig::new(format!("http://{addr}"));
    config.max_response_bytes = 1024;
    let err = BackendClient::from_config(&config).unwrap().login(&credentials()).unwrap_err();
    handle.join().expect("server thread");
    assert!(matches!(err, LoginError::MalformedResponse(message) if message.contains("1024")));
}

#[test]
fn unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let err = client_for(&format!("http://{addr}")).login(&credentials()).unwrap_err();
    assert!(matches!(err, LoginError::Transport(_)));
    assert!(!err.to_string().contains("clave-secreta"));
}

#[test]
fn failed_login_leaves_store_untouched() {
    let (base, _rx, handle) = serve_once(500, "{}");
    let store = InMemorySessionStore::new();
    let result = sign_in(&store, &client_for(&base), &credentials(), &NoopAuditSink);
    handle.join().expect("server thread");
    assert!(result.is_err());
    assert_eq!(store.current().unwrap(), None);
}

// ============================================================================
// SECTION: Logout
// ============================================================================

#[test]
fn logout_sends_bearer_token() {
    let (base, rx, handle) = serve_once(204, "");
    client_for(&base).invalidate(Some(&SessionToken::new("jwt-9"))).expect("logout");
    handle.join().expect("server thread");
    let observed = rx.recv().expect("observed request");
    assert_eq!(observed.url, "/logout");
    assert_eq!(observed.authorization.as_deref(), Some("Bearer jwt-9"));
}

#[test]
fn logout_failure_status_is_reported() {
    let (base, _rx, handle) = serve_once(503, "");
    let err = client_for(&base).invalidate(Some(&SessionToken::new("jwt-9"))).unwrap_err();
    handle.join().expect("server thread");
    assert!(err.to_string().contains("503"));
}

#[test]
fn logout_without_token_makes_no_request() {
    let client = client_for("http://127.0.0.1:9");
    client.invalidate(None).expect("no-op logout");
}
