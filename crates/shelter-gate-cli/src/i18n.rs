// crates/shelter-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings in Spanish and English.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Shelter Gate CLI stores user-facing strings in a small translation
//! catalog. All runtime output should be routed through the [`t!`](crate::t)
//! macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to Spanish and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

use shelter_gate_config::DisplayLocale;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// Spanish (default).
    Es,
    /// English.
    En,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

impl From<DisplayLocale> for Locale {
    fn from(value: DisplayLocale) -> Self {
        match value {
            DisplayLocale::Es => Self::Es,
            DisplayLocale::En => Self::En,
        }
    }
}

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"route"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to Spanish).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::Es)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Spanish catalog entries.
const CATALOG_ES: &[(&str, &str)] = &[
    ("main.version", "shelter-gate {version}"),
    ("output.stream.stdout", "salida estándar"),
    ("output.stream.stderr", "salida de errores"),
    ("output.stream.unknown", "salida"),
    ("output.write_failed", "No se pudo escribir en {stream}: {error}"),
    ("i18n.lang.invalid_env", "Valor inválido para {env}: {value}. Se esperaba 'es' o 'en'."),
    ("config.load_failed", "No se pudo cargar la configuración: {error}"),
    ("config.validate.ok", "Configuración válida."),
    ("client.init_failed", "No se pudo inicializar el cliente del backend: {error}"),
    ("audit.open_failed", "No se pudo abrir el registro de auditoría {path}: {error}"),
    ("grant.unknown", "Permiso desconocido: {name}"),
    ("check.unknown_route", "La ruta {route} no es un destino del menú."),
    ("check.permitted", "permitido: {label} ({route})"),
    ("check.denied", "denegado: {label} ({route}) [{reason}]"),
    ("menu.json_failed", "No se pudo serializar el menú: {error}"),
    ("reason.not_authenticated", "sin sesión"),
    ("reason.missing_capability", "falta el permiso {capability}"),
    ("reason.not_permitted", "sin permiso"),
    ("denial.not_authenticated", "Inicia sesión para abrir \"{label}\"."),
    ("denial.missing_capability", "No tienes permiso para abrir \"{label}\"."),
    ("shell.banner", "Shelter Gate. Escribe 'help' para ver los comandos."),
    (
        "shell.help",
        "Comandos: login <email>, whoami, menu, open <ruta>, logout, help, quit. \
         La contraseña se escribe en la línea siguiente y queda visible en pantalla.",
    ),
    ("shell.unknown_command", "Comando desconocido: {command}"),
    ("shell.usage.login", "Uso: login <email> (la contraseña va en la línea siguiente)"),
    ("shell.usage.open", "Uso: open <ruta>"),
    ("shell.password_prompt", "Contraseña (visible al escribir):"),
    ("shell.password_missing", "Falta la contraseña; inicio de sesión cancelado."),
    ("shell.login.ok", "Bienvenido, {name} ({role})."),
    ("shell.login.ignored", "Permisos desconocidos ignorados: {names}"),
    ("shell.login.rejected", "Inicio de sesión rechazado (HTTP {status})."),
    ("shell.login.rejected_message", "Inicio de sesión rechazado (HTTP {status}): {message}"),
    ("shell.login.failed", "No se pudo iniciar sesión: {error}"),
    ("shell.whoami.none", "No hay sesión activa."),
    ("shell.whoami.session", "{name} ({role}); permisos: {capabilities}"),
    ("shell.whoami.no_capabilities", "ninguno"),
    ("shell.store_failed", "Error del almacén de sesión: {error}"),
    ("shell.navigated", "-> {route}"),
    ("shell.navigated_as", "-> {route} (como {name})"),
    ("shell.not_dispatchable", "{route} no es un destino navegable."),
    ("shell.logout.ok", "Sesión cerrada."),
    ("shell.logout.none", "No había sesión activa."),
    ("shell.logout.backend_failed", "Aviso: el backend no confirmó el cierre: {error}"),
    ("shell.bye", "Hasta luego."),
];

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "shelter-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'es' or 'en'."),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("client.init_failed", "Failed to initialize backend client: {error}"),
    ("audit.open_failed", "Failed to open audit log {path}: {error}"),
    ("grant.unknown", "Unknown capability: {name}"),
    ("check.unknown_route", "Route {route} is not a menu destination."),
    ("check.permitted", "permitted: {label} ({route})"),
    ("check.denied", "denied: {label} ({route}) [{reason}]"),
    ("menu.json_failed", "Failed to serialize menu: {error}"),
    ("reason.not_authenticated", "not authenticated"),
    ("reason.missing_capability", "missing capability {capability}"),
    ("reason.not_permitted", "no permission"),
    ("denial.not_authenticated", "Sign in to open \"{label}\"."),
    ("denial.missing_capability", "You do not have permission to open \"{label}\"."),
    ("shell.banner", "Shelter Gate. Type 'help' for commands."),
    (
        "shell.help",
        "Commands: login <email>, whoami, menu, open <route>, logout, help, quit. \
         The password goes on the next line and is shown as typed.",
    ),
    ("shell.unknown_command", "Unknown command: {command}"),
    ("shell.usage.login", "Usage: login <email> (password on the next line)"),
    ("shell.usage.open", "Usage: open <route>"),
    ("shell.password_prompt", "Password (shown as typed):"),
    ("shell.password_missing", "Missing password; sign-in cancelled."),
    ("shell.login.ok", "Welcome, {name} ({role})."),
    ("shell.login.ignored", "Ignored unknown capabilities: {names}"),
    ("shell.login.rejected", "Sign-in rejected (HTTP {status})."),
    ("shell.login.rejected_message", "Sign-in rejected (HTTP {status}): {message}"),
    ("shell.login.failed", "Sign-in failed: {error}"),
    ("shell.whoami.none", "No active session."),
    ("shell.whoami.session", "{name} ({role}); capabilities: {capabilities}"),
    ("shell.whoami.no_capabilities", "none"),
    ("shell.store_failed", "Session store error: {error}"),
    ("shell.navigated", "-> {route}"),
    ("shell.navigated_as", "-> {route} (as {name})"),
    ("shell.not_dispatchable", "{route} is not a navigable destination."),
    ("shell.logout.ok", "Signed out."),
    ("shell.logout.none", "No session was active."),
    ("shell.logout.backend_failed", "Warning: backend did not confirm sign-out: {error}"),
    ("shell.bye", "Goodbye."),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_ES_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::Es => CATALOG_ES_MAP.get_or_init(|| CATALOG_ES.iter().copied().collect()),
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
    }
}

/// Returns every catalog key for `locale`, sorted.
#[must_use]
pub fn catalog_keys(locale: Locale) -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = catalog_for(locale).keys().copied().collect();
    keys.sort_unstable();
    keys
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    translate_in(current_locale(), key, args)
}

/// Translates `key` in an explicit locale while substituting `args`.
#[must_use]
pub fn translate_in(locale: Locale, key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::Es).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
