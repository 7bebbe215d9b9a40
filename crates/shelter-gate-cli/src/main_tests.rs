// crates/shelter-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and locale resolution.
// Purpose: Ensure CLI inputs map onto gate types and fail closed when invalid.
// Dependencies: shelter-gate-cli main helpers
// ============================================================================

//! ## Overview
//! Validates clap argument shapes, locale precedence, role conversion, and
//! the offline preview session builder.

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

// ============================================================================
// SECTION: Imports
// ============================================================================

use clap::Parser;
use shelter_gate_cli::i18n::Locale;
use shelter_gate_config::ShelterGateConfig;
use shelter_gate_core::Capability;
use shelter_gate_core::Role;

use super::Cli;
use super::Commands;
use super::ConfigCommand;
use super::LangArg;
use super::RoleArg;
use super::build_store;
use super::preview_session;
use super::resolve_locale;

// ============================================================================
// SECTION: Locale
// ============================================================================

#[test]
fn flag_overrides_env_locale() {
    let locale = resolve_locale(Some(LangArg::En), Some("es")).unwrap();
    assert_eq!(locale, Some(Locale::En));
}

#[test]
fn env_locale_accepts_region_tags() {
    assert_eq!(resolve_locale(None, Some("es_CO.UTF-8")).unwrap(), Some(Locale::Es));
    assert_eq!(resolve_locale(None, Some("EN-us")).unwrap(), Some(Locale::En));
}

#[test]
fn invalid_env_locale_is_an_error() {
    let err = resolve_locale(None, Some("fr")).unwrap_err();
    assert!(err.to_string().contains("SHELTER_GATE_LANG"));
}

#[test]
fn missing_locale_defers_to_config() {
    assert_eq!(resolve_locale(None, None).unwrap(), None);
}

// ============================================================================
// SECTION: Arguments
// ============================================================================

#[test]
fn check_parses_repeated_grants() {
    let cli = Cli::try_parse_from([
        "shelter-gate",
        "check",
        "--role",
        "staff",
        "--grant",
        "CrearProducto",
        "--grant",
        "ListarProductos",
        "--target",
        "/inventario/productos/nuevo",
    ])
    .unwrap();
    let Some(Commands::Check(command)) = cli.command else {
        panic!("expected check command");
    };
    assert_eq!(command.session.role, RoleArg::Staff);
    assert_eq!(command.session.grants, vec!["CrearProducto", "ListarProductos"]);
    assert_eq!(command.target, "/inventario/productos/nuevo");
}

#[test]
fn check_requires_target() {
    assert!(Cli::try_parse_from(["shelter-gate", "check", "--role", "person"]).is_err());
}

#[test]
fn unknown_role_is_rejected() {
    assert!(Cli::try_parse_from(["shelter-gate", "menu", "--role", "admin"]).is_err());
}

#[test]
fn lang_flag_is_global() {
    let cli = Cli::try_parse_from(["shelter-gate", "config", "validate", "--lang", "en"]).unwrap();
    assert!(matches!(cli.lang, Some(LangArg::En)));
    assert!(matches!(
        cli.command,
        Some(Commands::Config {
            command: ConfigCommand::Validate(_)
        })
    ));
}

#[test]
fn no_subcommand_is_allowed() {
    let cli = Cli::try_parse_from(["shelter-gate"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.show_version);
}

// ============================================================================
// SECTION: Preview Sessions
// ============================================================================

#[test]
fn role_args_map_to_roles() {
    assert_eq!(Role::from(RoleArg::Foundation), Role::Foundation);
    assert_eq!(Role::from(RoleArg::Staff), Role::Staff);
    assert_eq!(Role::from(RoleArg::Person), Role::Person);
}

#[test]
fn preview_session_collects_grants() {
    let cli = Cli::try_parse_from([
        "shelter-gate",
        "menu",
        "--role",
        "staff",
        "--grant",
        "solicitudes-adopcion",
    ])
    .unwrap();
    let Some(Commands::Menu(command)) = cli.command else {
        panic!("expected menu command");
    };
    let actor = preview_session(&command.session).unwrap();
    assert_eq!(actor.role, Role::Staff);
    assert!(actor.granted.contains(Capability::SolicitudesAdopcion));
    assert_eq!(actor.granted.len(), 1);
}

#[test]
fn preview_session_rejects_miscased_grant() {
    let cli =
        Cli::try_parse_from(["shelter-gate", "menu", "--role", "staff", "--grant", "crearproducto"])
            .unwrap();
    let Some(Commands::Menu(command)) = cli.command else {
        panic!("expected menu command");
    };
    let err = preview_session(&command.session).unwrap_err();
    assert!(err.to_string().contains("crearproducto"));
}

// ============================================================================
// SECTION: Store Selection
// ============================================================================

#[test]
fn file_store_is_built_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    let content = format!(
        "[backend]\nbase_url = \"http://127.0.0.1:8080\"\n\n[session]\nstore = \"file\"\npath = \
         \"{}\"\n",
        path.display()
    );
    let config = ShelterGateConfig::from_toml(&content).unwrap();
    let store = build_store(&config);
    assert_eq!(store.current().unwrap(), None);
    assert!(!path.exists());
}

#[test]
fn memory_store_is_default() {
    let config =
        ShelterGateConfig::from_toml("[backend]\nbase_url = \"http://127.0.0.1:8080\"\n").unwrap();
    let store = build_store(&config);
    assert_eq!(store.current().unwrap(), None);
}
