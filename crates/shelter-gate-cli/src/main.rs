// crates/shelter-gate-cli/src/main.rs
// ============================================================================
// Module: Shelter Gate CLI Entry Point
// Description: Command dispatcher for the session shell and offline previews.
// Purpose: Provide a localized CLI over the client authorization gate.
// Dependencies: clap, shelter-gate-core, shelter-gate-config, shelter-gate-client, thiserror.
// ============================================================================

//! ## Overview
//! The Shelter Gate CLI runs an interactive session shell against the
//! configured backend and offers offline previews of menu state and access
//! decisions for a synthetic session. All user-facing strings are routed
//! through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use shelter_gate_cli::i18n::Locale;
use shelter_gate_cli::i18n::set_locale;
use shelter_gate_cli::render::PreviewError;
use shelter_gate_cli::render::reason_text;
use shelter_gate_cli::render::render_menu;
use shelter_gate_cli::render::synthetic_actor;
use shelter_gate_cli::shell::Shell;
use shelter_gate_cli::t;
use shelter_gate_client::BackendClient;
use shelter_gate_config::SessionStoreKind;
use shelter_gate_config::ShelterGateConfig;
use shelter_gate_core::AccessDecision;
use shelter_gate_core::ActorSession;
use shelter_gate_core::FileAuditSink;
use shelter_gate_core::FileSessionStore;
use shelter_gate_core::GateAuditSink;
use shelter_gate_core::InMemorySessionStore;
use shelter_gate_core::MenuTree;
use shelter_gate_core::NoopAuditSink;
use shelter_gate_core::Role;
use shelter_gate_core::SessionStore;
use shelter_gate_core::StderrAuditSink;
use shelter_gate_core::Target;
use shelter_gate_core::evaluate;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "SHELTER_GATE_LANG";

/// Exit code for an offline check that ends in denial.
const EXIT_DENIED: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "shelter-gate", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `SHELTER_GATE_LANG` and the config file).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the interactive session shell.
    Shell(ShellCommandArgs),
    /// Preview the standard menu for a synthetic session.
    Menu(MenuCommand),
    /// Evaluate one destination for a synthetic session.
    Check(CheckCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for the session shell.
#[derive(Args, Debug)]
struct ShellCommandArgs {
    /// Optional config file path (defaults to shelter-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Synthetic session selection shared by offline commands.
#[derive(Args, Debug)]
struct SessionArgs {
    /// Role of the synthetic session.
    #[arg(long, value_enum)]
    role: RoleArg,
    /// Granted capability wire name (repeatable).
    #[arg(long = "grant", value_name = "NAME")]
    grants: Vec<String>,
}

/// Arguments for the menu preview.
#[derive(Args, Debug)]
struct MenuCommand {
    /// Synthetic session.
    #[command(flatten)]
    session: SessionArgs,
    /// Emit the menu view as JSON.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Arguments for the offline decision check.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Synthetic session.
    #[command(flatten)]
    session: SessionArgs,
    /// Destination route to evaluate.
    #[arg(long, value_name = "ROUTE")]
    target: String,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to shelter-gate.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Role selections for synthetic sessions.
#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
enum RoleArg {
    /// Foundation administrator.
    Foundation,
    /// Staff member.
    Staff,
    /// Adopter account.
    Person,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// Spanish.
    Es,
    /// English.
    En,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    if let Some(locale) = resolve_locale(cli.lang, env_lang.as_deref())? {
        set_locale(locale);
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Shell(command) => command_shell(&command),
        Commands::Menu(command) => command_menu(&command),
        Commands::Check(command) => command_check(&command),
        Commands::Config {
            command,
        } => command_config(command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Shell Command
// ============================================================================

/// Executes the interactive session shell.
fn command_shell(command: &ShellCommandArgs) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let store = build_store(&config);
    let audit = build_audit(&config)?;
    let client = BackendClient::from_config(&config.backend)
        .map_err(|err| CliError::new(t!("client.init_failed", error = err)))?
        .with_fallback_display_name(config.session.fallback_display_name.clone());
    let shell = Shell::new(store.as_ref(), &client, &client, audit.as_ref(), MenuTree::standard());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    shell
        .run(stdin.lock(), &mut stdout)
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the configured session store.
fn build_store(config: &ShelterGateConfig) -> Box<dyn SessionStore> {
    match (config.session.store, config.session.path.as_ref()) {
        (SessionStoreKind::File, Some(path)) => Box::new(FileSessionStore::new(path.clone())),
        _ => Box::new(InMemorySessionStore::new()),
    }
}

/// Builds the configured audit sink.
fn build_audit(config: &ShelterGateConfig) -> CliResult<Box<dyn GateAuditSink>> {
    if !config.audit.enabled {
        return Ok(Box::new(NoopAuditSink));
    }
    match &config.audit.path {
        Some(path) => {
            let sink = FileAuditSink::new(path).map_err(|err| {
                CliError::new(t!("audit.open_failed", path = path.display(), error = err))
            })?;
            Ok(Box::new(sink))
        }
        None => Ok(Box::new(StderrAuditSink)),
    }
}

// ============================================================================
// SECTION: Offline Commands
// ============================================================================

/// Executes the offline menu preview.
fn command_menu(command: &MenuCommand) -> CliResult<ExitCode> {
    let session = preview_session(&command.session)?;
    let view = MenuTree::standard().view(Some(&session));
    if command.json {
        let json = serde_json::to_string_pretty(&view)
            .map_err(|err| CliError::new(t!("menu.json_failed", error = err)))?;
        write_stdout_line(&json).map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }
    for line in render_menu(&view) {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Executes the offline decision check.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let session = preview_session(&command.session)?;
    let target = Target::new(command.target.as_str());
    let node = MenuTree::standard()
        .find(&target)
        .ok_or_else(|| CliError::new(t!("check.unknown_route", route = target)))?;
    match evaluate(node, Some(&session)) {
        AccessDecision::Permitted => {
            write_stdout_line(&t!("check.permitted", label = node.label, route = target))
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::SUCCESS)
        }
        AccessDecision::Denied(reason) => {
            write_stdout_line(&t!(
                "check.denied",
                label = node.label,
                route = target,
                reason = reason_text(reason)
            ))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            Ok(ExitCode::from(EXIT_DENIED))
        }
    }
}

/// Builds the synthetic session for offline commands.
fn preview_session(args: &SessionArgs) -> CliResult<ActorSession> {
    synthetic_actor(args.role.into(), &args.grants)
        .map_err(|PreviewError::UnknownGrant(name)| CliError::new(t!("grant.unknown", name = name)))
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = load_config(command.config.as_deref())?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads configuration and applies its locale when no flag or env var chose one.
fn load_config(path: Option<&Path>) -> CliResult<ShelterGateConfig> {
    let config = ShelterGateConfig::load(path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    set_locale(config.display.locale.into());
    Ok(config)
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Resolves the CLI locale from flags or environment.
///
/// Returns `None` when neither is set so the config file may choose.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Option<Locale>> {
    if let Some(lang) = lang {
        return Ok(Some(lang.into()));
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).map(Some).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(None)
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::Es => Self::Es,
            LangArg::En => Self::En,
        }
    }
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Foundation => Self::Foundation,
            RoleArg::Staff => Self::Staff,
            RoleArg::Person => Self::Person,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
