// crates/shelter-gate-cli/src/shell.rs
// ============================================================================
// Module: Session Shell
// Description: Line-oriented console front end for the authorization gate.
// Purpose: Drive sign-in, menu rendering, navigation, and sign-out from text input.
// Dependencies: shelter-gate-core
// ============================================================================

//! ## Overview
//! [`Shell`] reads one command per line and routes every navigation through
//! [`NavigationDispatcher`], so the console obeys the same decisions as any
//! other front end. [`ConsoleSurface`] plays both the navigator and the
//! denial notifier, collecting lines until the shell flushes them.
//!
//! Commands: `login <email>` (password on the next line, read as plain text),
//! `whoami`, `menu`, `open <route>`, `logout`, `help`, `quit` / `exit`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cell::RefCell;
use std::io;
use std::io::BufRead;
use std::io::Write;

use shelter_gate_core::Authenticator;
use shelter_gate_core::Credentials;
use shelter_gate_core::DenialNotice;
use shelter_gate_core::DenialNotifier;
use shelter_gate_core::DispatchOutcome;
use shelter_gate_core::GateAuditSink;
use shelter_gate_core::LoginError;
use shelter_gate_core::MenuTree;
use shelter_gate_core::NavigationDispatcher;
use shelter_gate_core::NavigationRequest;
use shelter_gate_core::Navigator;
use shelter_gate_core::SessionBackend;
use shelter_gate_core::SessionStore;
use shelter_gate_core::SignInError;
use shelter_gate_core::Target;
use shelter_gate_core::sign_in;
use shelter_gate_core::sign_out;

use crate::render::capability_list;
use crate::render::denial_text;
use crate::render::render_actor_menu;
use crate::t;

// ============================================================================
// SECTION: Console Surface
// ============================================================================

/// Console navigator and denial notifier.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    /// Lines produced since the last drain.
    lines: RefCell<Vec<String>>,
    /// Current destination.
    location: RefCell<Option<Target>>,
}

impl ConsoleSurface {
    /// Creates an empty surface with no location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current destination, if any navigation happened.
    #[must_use]
    pub fn location(&self) -> Option<Target> {
        self.location.borrow().clone()
    }

    /// Removes and returns the pending lines.
    pub fn drain(&self) -> Vec<String> {
        self.lines.borrow_mut().drain(..).collect()
    }
}

impl Navigator for ConsoleSurface {
    fn navigate(&self, request: &NavigationRequest) {
        let line = match &request.display_name {
            Some(name) => t!("shell.navigated_as", route = request.target, name = name),
            None => t!("shell.navigated", route = request.target),
        };
        self.lines.borrow_mut().push(line);
        *self.location.borrow_mut() = Some(request.target.clone());
    }
}

impl DenialNotifier for ConsoleSurface {
    fn notify(&self, notice: &DenialNotice) {
        self.lines.borrow_mut().push(denial_text(notice));
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Blank line.
    Empty,
    /// `login <email>`; `None` when the email is missing.
    Login(Option<String>),
    /// `whoami`.
    WhoAmI,
    /// `menu`.
    Menu,
    /// `open <route>`; `None` when the route is missing.
    Open(Option<String>),
    /// `logout`.
    Logout,
    /// `help`.
    Help,
    /// `quit` or `exit`.
    Quit,
    /// Anything else.
    Unknown(String),
}

impl ShellCommand {
    /// Parses a single input line. Command words are case-insensitive.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Self::Empty;
        };
        let argument = parts.next().map(str::to_string);
        match word.to_ascii_lowercase().as_str() {
            "login" => Self::Login(argument),
            "whoami" => Self::WhoAmI,
            "menu" => Self::Menu,
            "open" => Self::Open(argument),
            "logout" => Self::Logout,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(word.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Shell
// ============================================================================

/// Interactive session shell over arbitrary line input and text output.
pub struct Shell<'a> {
    /// Permission snapshot store.
    store: &'a dyn SessionStore,
    /// Backend login collaborator.
    authenticator: &'a dyn Authenticator,
    /// Backend logout collaborator.
    backend: &'a dyn SessionBackend,
    /// Audit sink for decisions and session events.
    audit: &'a dyn GateAuditSink,
    /// Menu tree used for rendering and route lookup.
    tree: &'a MenuTree,
    /// Console navigator and notifier.
    surface: ConsoleSurface,
}

impl<'a> Shell<'a> {
    /// Creates a shell over the given collaborators.
    #[must_use]
    pub fn new(
        store: &'a dyn SessionStore,
        authenticator: &'a dyn Authenticator,
        backend: &'a dyn SessionBackend,
        audit: &'a dyn GateAuditSink,
        tree: &'a MenuTree,
    ) -> Self {
        Self {
            store,
            authenticator,
            backend,
            audit,
            tree,
            surface: ConsoleSurface::new(),
        }
    }

    /// Returns the current destination.
    #[must_use]
    pub fn location(&self) -> Option<Target> {
        self.surface.location()
    }

    /// Runs the command loop until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when reading input or writing output fails.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<()> {
        writeln!(output, "{}", t!("shell.banner"))?;
        let mut lines = input.lines();
        while let Some(line) = lines.next() {
            let command = ShellCommand::parse(&line?);
            let replies = match command {
                ShellCommand::Empty => Vec::new(),
                ShellCommand::Quit => {
                    writeln!(output, "{}", t!("shell.bye"))?;
                    return Ok(());
                }
                ShellCommand::Login(None) => vec![t!("shell.usage.login")],
                ShellCommand::Login(Some(email)) => {
                    writeln!(output, "{}", t!("shell.password_prompt"))?;
                    match lines.next().transpose()? {
                        Some(password) => self.login(email, password),
                        None => vec![t!("shell.password_missing")],
                    }
                }
                ShellCommand::WhoAmI => self.whoami(),
                ShellCommand::Menu => self.menu(),
                ShellCommand::Open(None) => vec![t!("shell.usage.open")],
                ShellCommand::Open(Some(route)) => self.open(&route),
                ShellCommand::Logout => self.logout(),
                ShellCommand::Help => vec![t!("shell.help")],
                ShellCommand::Unknown(word) => vec![t!("shell.unknown_command", command = word)],
            };
            for reply in replies {
                writeln!(output, "{reply}")?;
            }
        }
        Ok(())
    }

    /// Signs in and moves to the role landing page.
    fn login(&self, email: String, password: String) -> Vec<String> {
        let credentials = Credentials::new(email, password);
        match sign_in(self.store, self.authenticator, &credentials, self.audit) {
            Ok(outcome) => {
                let mut replies = vec![t!(
                    "shell.login.ok",
                    name = outcome.actor.display_name,
                    role = outcome.actor.role.as_str()
                )];
                if !outcome.unrecognized.is_empty() {
                    replies.push(t!("shell.login.ignored", names = outcome.unrecognized.join(", ")));
                }
                self.surface.navigate(&NavigationRequest {
                    target: outcome.landing,
                    display_name: Some(outcome.actor.display_name),
                });
                replies.extend(self.surface.drain());
                replies
            }
            Err(SignInError::Login(LoginError::Rejected {
                status,
                message: Some(message),
            })) => vec![t!("shell.login.rejected_message", status = status, message = message)],
            Err(SignInError::Login(LoginError::Rejected {
                status,
                message: None,
            })) => vec![t!("shell.login.rejected", status = status)],
            Err(err) => vec![t!("shell.login.failed", error = err)],
        }
    }

    /// Describes the active session.
    fn whoami(&self) -> Vec<String> {
        match self.store.current() {
            Ok(Some(actor)) => vec![t!(
                "shell.whoami.session",
                name = actor.display_name,
                role = actor.role.as_str(),
                capabilities = capability_list(&actor.granted)
            )],
            Ok(None) => vec![t!("shell.whoami.none")],
            Err(err) => vec![t!("shell.store_failed", error = err)],
        }
    }

    /// Renders the menu for the active session.
    fn menu(&self) -> Vec<String> {
        // Store failures read as "no session".
        let session = self.store.current().ok().flatten();
        render_actor_menu(&self.tree.view(session.as_ref()))
    }

    /// Dispatches a click on `route`.
    fn open(&self, route: &str) -> Vec<String> {
        let dispatcher =
            NavigationDispatcher::new(self.store, &self.surface, &self.surface, self.audit);
        match dispatcher.dispatch_target(self.tree, &Target::new(route)) {
            DispatchOutcome::NotDispatchable => vec![t!("shell.not_dispatchable", route = route)],
            DispatchOutcome::Navigated(_) | DispatchOutcome::Denied(_) => self.surface.drain(),
        }
    }

    /// Tears down the session and returns to the login screen.
    fn logout(&self) -> Vec<String> {
        match sign_out(self.store, self.backend, &self.surface, self.audit) {
            Ok(report) => {
                let mut replies = Vec::new();
                if let Some(error) = report.backend_error {
                    replies.push(t!("shell.logout.backend_failed", error = error));
                }
                replies.push(if report.had_session {
                    t!("shell.logout.ok")
                } else {
                    t!("shell.logout.none")
                });
                replies.extend(self.surface.drain());
                replies
            }
            Err(err) => vec![t!("shell.store_failed", error = err)],
        }
    }
}
