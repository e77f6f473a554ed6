//! Context-aware error suggestions.
//!
//! Complements the static suggestions in the `codes` module with hints that
//! mention the offending path or identifier.

use serde_json::Value;

use super::codes::ErrorCode;

/// Generate a context-aware suggestion for an error.
pub fn suggest_for_error(code: ErrorCode, context: Option<&Value>) -> String {
    match code {
        ErrorCode::SourceNotFound => suggest_source_not_found(context),
        ErrorCode::SourceUnsupported => suggest_source_unsupported(context),
        ErrorCode::SourceMalformed => suggest_source_malformed(context),
        ErrorCode::InvalidIdentifier => suggest_invalid_identifier(context),
        ErrorCode::ConfigMissingRequired => suggest_config_missing_required(context),
        _ => code.suggestion().to_string(),
    }
}

fn context_str<'a>(context: Option<&'a Value>, key: &str) -> Option<&'a str> {
    context.and_then(|c| c.get(key)).and_then(Value::as_str)
}

fn suggest_source_not_found(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "No file at '{path}'. Pass an existing .json snapshot or SQLite database"
        ),
        None => ErrorCode::SourceNotFound.suggestion().to_string(),
    }
}

fn suggest_source_unsupported(context: Option<&Value>) -> String {
    match context_str(context, "path") {
        Some(path) => format!(
            "Cannot tell the source kind of '{path}' from its extension. Add --source json or --source sqlite"
        ),
        None => ErrorCode::SourceUnsupported.suggestion().to_string(),
    }
}

fn suggest_source_malformed(context: Option<&Value>) -> String {
    match (context_str(context, "path"), context_str(context, "reason")) {
        (Some(path), Some(reason)) => format!(
            "'{path}' could not be read ({reason}). Expected {{\"items\": [...], \"milestones\": [...]}}"
        ),
        _ => ErrorCode::SourceMalformed.suggestion().to_string(),
    }
}

fn suggest_invalid_identifier(context: Option<&Value>) -> String {
    match context_str(context, "identifier") {
        Some(ident) => format!(
            "Identifier '{ident}' is not allowed. Remove quotes/NUL bytes from the [source] table or column names"
        ),
        None => ErrorCode::InvalidIdentifier.suggestion().to_string(),
    }
}

fn suggest_config_missing_required(context: Option<&Value>) -> String {
    match context_str(context, "config_key") {
        Some(key) => format!("Set `{key}` in .hammock/config.toml"),
        None => ErrorCode::ConfigMissingRequired.suggestion().to_string(),
    }
}
