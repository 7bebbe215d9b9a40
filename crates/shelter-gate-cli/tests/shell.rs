// crates/shelter-gate-cli/tests/shell.rs
// ============================================================================
// Module: Session Shell Tests
// Description: Shell command flows over in-memory input and output.
// ============================================================================

//! Session shell tests for shelter-gate-cli. Output uses the default
//! Spanish catalog.

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

use std::sync::Mutex;

use shelter_gate_cli::shell::Shell;
use shelter_gate_cli::shell::ShellCommand;
use shelter_gate_core::ActorSession;
use shelter_gate_core::AuthenticatedSession;
use shelter_gate_core::Authenticator;
use shelter_gate_core::BackendError;
use shelter_gate_core::Capability;
use shelter_gate_core::CapabilitySet;
use shelter_gate_core::Credentials;
use shelter_gate_core::GateAuditEvent;
use shelter_gate_core::GateAuditSink;
use shelter_gate_core::InMemorySessionStore;
use shelter_gate_core::LoginError;
use shelter_gate_core::MenuTree;
use shelter_gate_core::Role;
use shelter_gate_core::SessionBackend;
use shelter_gate_core::SessionStore;
use shelter_gate_core::SessionToken;
use shelter_gate_core::SignIn;
use shelter_gate_core::Target;

// ============================================================================
// SECTION: Doubles
// ============================================================================

/// Authenticator answering every login with a fixed role and grants.
struct FixedAuthenticator {
    role: Role,
    granted: Vec<Capability>,
    unrecognized: Vec<String>,
    reject: Option<(u16, Option<&'static str>)>,
    emails: Mutex<Vec<String>>,
}

impl FixedAuthenticator {
    fn new(role: Role, granted: &[Capability]) -> Self {
        Self {
            role,
            granted: granted.to_vec(),
            unrecognized: Vec::new(),
            reject: None,
            emails: Mutex::new(Vec::new()),
        }
    }

    fn rejecting(status: u16, message: Option<&'static str>) -> Self {
        let mut authenticator = Self::new(Role::Person, &[]);
        authenticator.reject = Some((status, message));
        authenticator
    }
}

impl Authenticator for FixedAuthenticator {
    fn login(&self, credentials: &Credentials) -> Result<SignIn, LoginError> {
        self.emails.lock().unwrap().push(credentials.email.clone());
        if let Some((status, message)) = self.reject {
            return Err(LoginError::Rejected {
                status,
                message: message.map(str::to_string),
            });
        }
        let actor =
            ActorSession::new("Ana", self.role, self.granted.iter().copied().collect::<CapabilitySet>());
        Ok(SignIn {
            session: AuthenticatedSession::new(actor, Some(SessionToken::new("tok-shell"))),
            unrecognized: self.unrecognized.clone(),
        })
    }
}

/// Backend recording invalidated tokens.
#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<Option<String>>>,
    fail: bool,
}

impl SessionBackend for RecordingBackend {
    fn invalidate(&self, token: Option<&SessionToken>) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(token.map(|token| token.expose().to_string()));
        if self.fail {
            Err(BackendError::Request("logout returned status 503".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Audit sink collecting event names.
#[derive(Default)]
struct RecordingAudit {
    events: Mutex<Vec<&'static str>>,
}

impl GateAuditSink for RecordingAudit {
    fn record(&self, event: &GateAuditEvent) {
        self.events.lock().unwrap().push(event.event);
    }
}

/// Runs `input` through a fresh shell and returns the output text.
fn run_shell(
    store: &InMemorySessionStore,
    authenticator: &FixedAuthenticator,
    backend: &RecordingBackend,
    audit: &RecordingAudit,
    input: &str,
) -> (String, Option<Target>) {
    let shell = Shell::new(store, authenticator, backend, audit, MenuTree::standard());
    let mut output = Vec::new();
    shell.run(input.as_bytes(), &mut output).unwrap();
    (String::from_utf8(output).unwrap(), shell.location())
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn parses_commands_case_insensitively() {
    assert_eq!(ShellCommand::parse("  "), ShellCommand::Empty);
    assert_eq!(
        ShellCommand::parse("LOGIN ana@refugio.org"),
        ShellCommand::Login(Some("ana@refugio.org".to_string()))
    );
    assert_eq!(ShellCommand::parse("open"), ShellCommand::Open(None));
    assert_eq!(ShellCommand::parse("Exit"), ShellCommand::Quit);
    assert_eq!(ShellCommand::parse("borrar todo"), ShellCommand::Unknown("borrar".to_string()));
}

// ============================================================================
// SECTION: Flows
// ============================================================================

#[test]
fn staff_sign_in_then_denied_and_permitted_clicks() {
    let store = InMemorySessionStore::new();
    let authenticator =
        FixedAuthenticator::new(Role::Staff, &[Capability::CrearProducto, Capability::ListarProductos]);
    let backend = RecordingBackend::default();
    let audit = RecordingAudit::default();
    let (output, location) = run_shell(
        &store,
        &authenticator,
        &backend,
        &audit,
        "login ana@refugio.org\nclave\nopen /inventario/categorias/nueva\nopen \
         /inventario/productos/nuevo\nquit\n",
    );

    assert!(output.contains("Bienvenido, Ana (staff)."));
    assert!(output.contains("-> /dashboard (como Ana)"));
    assert!(output.contains("No tienes permiso para abrir \"Nueva categoría\"."));
    assert!(output.contains("-> /inventario/productos/nuevo (como Ana)"));
    assert!(output.ends_with("Hasta luego.\n"));
    assert_eq!(location, Some(Target::new("/inventario/productos/nuevo")));
    assert_eq!(authenticator.emails.lock().unwrap().as_slice(), ["ana@refugio.org"]);
    let events = audit.events.lock().unwrap();
    assert_eq!(
        events.as_slice(),
        ["session_sign_in", "gate_decision", "gate_decision"]
    );
}

#[test]
fn password_line_is_never_echoed() {
    let store = InMemorySessionStore::new();
    let authenticator = FixedAuthenticator::new(Role::Person, &[]);
    let (output, _) = run_shell(
        &store,
        &authenticator,
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login ana@refugio.org\nsuper-secreta\n",
    );
    assert!(!output.contains("super-secreta"));
    assert!(output.contains("Contraseña (visible al escribir):"));
    assert!(output.contains("-> /mascotas (como Ana)"));
}

#[test]
fn open_without_session_asks_to_sign_in() {
    let store = InMemorySessionStore::new();
    let (output, location) = run_shell(
        &store,
        &FixedAuthenticator::new(Role::Staff, &[]),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "open /roles\nopen /dashboard\n",
    );
    assert!(output.contains("Inicia sesión para abrir \"Roles\"."));
    assert!(output.contains("Inicia sesión para abrir \"Dashboard\"."));
    assert_eq!(location, None);
}

#[test]
fn logout_clears_session_and_returns_to_login() {
    let store = InMemorySessionStore::new();
    let backend = RecordingBackend::default();
    let (output, location) = run_shell(
        &store,
        &FixedAuthenticator::new(Role::Foundation, &[]),
        &backend,
        &RecordingAudit::default(),
        "login ana@refugio.org\nclave\nopen /roles\nlogout\nwhoami\nopen /roles\n",
    );
    assert!(output.contains("-> /roles (como Ana)"));
    assert!(output.contains("Sesión cerrada."));
    assert!(output.contains("-> /login\n"));
    assert!(output.contains("No hay sesión activa."));
    assert!(output.contains("Inicia sesión para abrir \"Roles\"."));
    assert_eq!(location, Some(Target::new("/login")));
    assert_eq!(store.current().unwrap(), None);
    assert_eq!(backend.calls.lock().unwrap().as_slice(), [Some("tok-shell".to_string())]);
}

#[test]
fn backend_failure_on_logout_is_a_warning() {
    let store = InMemorySessionStore::new();
    let backend = RecordingBackend {
        calls: Mutex::new(Vec::new()),
        fail: true,
    };
    let (output, _) = run_shell(
        &store,
        &FixedAuthenticator::new(Role::Staff, &[]),
        &backend,
        &RecordingAudit::default(),
        "login ana@refugio.org\nclave\nlogout\n",
    );
    assert!(output.contains("Aviso: el backend no confirmó el cierre"));
    assert!(output.contains("Sesión cerrada."));
    assert_eq!(store.current().unwrap(), None);
}

#[test]
fn logout_without_session_reports_none() {
    let (output, _) = run_shell(
        &InMemorySessionStore::new(),
        &FixedAuthenticator::new(Role::Staff, &[]),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "logout\n",
    );
    assert!(output.contains("No había sesión activa."));
}

#[test]
fn rejected_login_leaves_shell_signed_out() {
    let store = InMemorySessionStore::new();
    let (output, location) = run_shell(
        &store,
        &FixedAuthenticator::rejecting(401, Some("Credenciales incorrectas")),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login ana@refugio.org\nmala\nwhoami\n",
    );
    assert!(output.contains("Inicio de sesión rechazado (HTTP 401): Credenciales incorrectas"));
    assert!(output.contains("No hay sesión activa."));
    assert_eq!(location, None);
    assert_eq!(store.current().unwrap(), None);
}

#[test]
fn unrecognized_capabilities_are_reported() {
    let mut authenticator = FixedAuthenticator::new(Role::Staff, &[Capability::VerReportes]);
    authenticator.unrecognized = vec!["VerTodo".to_string()];
    let (output, _) = run_shell(
        &InMemorySessionStore::new(),
        &authenticator,
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login ana@refugio.org\nclave\nwhoami\n",
    );
    assert!(output.contains("Permisos desconocidos ignorados: VerTodo"));
    assert!(output.contains("Ana (staff); permisos: VerReportes"));
}

#[test]
fn menu_marks_disabled_destinations() {
    let (output, _) = run_shell(
        &InMemorySessionStore::new(),
        &FixedAuthenticator::new(Role::Staff, &[Capability::ListarProductos]),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login ana@refugio.org\nclave\nmenu\n",
    );
    assert!(output.contains("+ Dashboard (/dashboard)"));
    assert!(output.contains("  + Productos (/inventario/productos)"));
    assert!(output.contains("    - Nuevo producto (/inventario/productos/nuevo) [sin permiso]"));
    assert!(output.contains("# Inventario"));
    assert!(!output.contains("CrearProducto"));
    assert!(!output.contains("falta el permiso"));
}

#[test]
fn usage_and_unknown_commands_are_explained() {
    let (output, _) = run_shell(
        &InMemorySessionStore::new(),
        &FixedAuthenticator::new(Role::Staff, &[]),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login\nopen\nbailar\nhelp\nopen /no-existe\n",
    );
    assert!(output.contains("Uso: login <email>"));
    assert!(output.contains("Uso: open <ruta>"));
    assert!(output.contains("Comando desconocido: bailar"));
    assert!(output.contains("Comandos: login <email>"));
    assert!(output.contains("queda visible en pantalla"));
    assert!(output.contains("/no-existe no es un destino navegable."));
}

#[test]
fn missing_password_cancels_login() {
    let store = InMemorySessionStore::new();
    let authenticator = FixedAuthenticator::new(Role::Staff, &[]);
    let (output, _) = run_shell(
        &store,
        &authenticator,
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "login ana@refugio.org",
    );
    assert!(output.contains("Falta la contraseña"));
    assert!(authenticator.emails.lock().unwrap().is_empty());
    assert_eq!(store.current().unwrap(), None);
}

#[test]
fn header_route_is_not_dispatchable() {
    let (output, _) = run_shell(
        &InMemorySessionStore::new(),
        &FixedAuthenticator::new(Role::Foundation, &[]),
        &RecordingBackend::default(),
        &RecordingAudit::default(),
        "open Inventario\n",
    );
    assert!(output.contains("Inventario no es un destino navegable."));
}
