// crates/shelter-gate-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Catalog parity and translation behavior.
// ============================================================================

//! Message catalog tests for shelter-gate-cli.

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

use shelter_gate_cli::i18n::Locale;
use shelter_gate_cli::i18n::MessageArg;
use shelter_gate_cli::i18n::catalog_keys;
use shelter_gate_cli::i18n::translate_in;
use shelter_gate_config::DisplayLocale;

/// Every Spanish key has an English counterpart and vice versa.
#[test]
fn catalogs_have_identical_keys() {
    assert_eq!(catalog_keys(Locale::Es), catalog_keys(Locale::En));
}

/// Placeholders present in one locale are present in the other.
#[test]
fn catalogs_share_placeholders() {
    for key in catalog_keys(Locale::Es) {
        let es = translate_in(Locale::Es, key, Vec::new());
        let en = translate_in(Locale::En, key, Vec::new());
        assert_eq!(placeholders(&es), placeholders(&en), "placeholders differ for {key}");
    }
}

/// Named arguments replace every matching placeholder.
#[test]
fn translate_substitutes_arguments() {
    let args = vec![MessageArg::new("label", "Roles")];
    assert_eq!(
        translate_in(Locale::Es, "denial.missing_capability", args.clone()),
        "No tienes permiso para abrir \"Roles\"."
    );
    assert_eq!(
        translate_in(Locale::En, "denial.missing_capability", args),
        "You do not have permission to open \"Roles\"."
    );
}

/// Unknown keys fall back to the key itself.
#[test]
fn unknown_key_falls_back_to_key() {
    assert_eq!(translate_in(Locale::En, "no.such.key", Vec::new()), "no.such.key");
}

/// Locale parsing tolerates case and region suffixes.
#[test]
fn locale_parse_accepts_variants() {
    assert_eq!(Locale::parse("ES"), Some(Locale::Es));
    assert_eq!(Locale::parse(" en_GB "), Some(Locale::En));
    assert_eq!(Locale::parse("ca"), None);
    assert_eq!(Locale::Es.as_str(), "es");
}

/// Config locales map onto CLI locales.
#[test]
fn display_locale_converts() {
    assert_eq!(Locale::from(DisplayLocale::Es), Locale::Es);
    assert_eq!(Locale::from(DisplayLocale::En), Locale::En);
}

/// Extracts sorted `{placeholder}` names from a template.
fn placeholders(template: &str) -> Vec<String> {
    let mut names: Vec<String> = template
        .split('{')
        .skip(1)
        .filter_map(|part| part.split_once('}').map(|(name, _)| name.to_string()))
        .collect();
    names.sort();
    names
}
