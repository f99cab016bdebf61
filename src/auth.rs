// ABOUTME: Credential discovery with precedence chain
// ABOUTME: CLI flag → environment variable (optionally loaded from .env)

use crate::{Error, Result};
use std::env;

pub const API_KEY_ENV: &str = "NOTION_API_KEY";
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

pub fn resolve_token(cli_token: Option<String>) -> Result<String> {
    resolve_from(cli_token, API_KEY_ENV).ok_or_else(|| {
        Error::Auth(format!(
            "No API key found. Provide via --token or {} env var",
            API_KEY_ENV
        ))
    })
}

pub fn resolve_database_id(cli_database_id: Option<String>) -> Result<String> {
    resolve_from(cli_database_id, DATABASE_ID_ENV).ok_or_else(|| {
        Error::Auth(format!(
            "No database id found. Provide via --database-id or {} env var",
            DATABASE_ID_ENV
        ))
    })
}

fn resolve_from(cli_value: Option<String>, env_var: &str) -> Option<String> {
    // 1. CLI flag
    if let Some(value) = cli_value.filter(|v| !v.trim().is_empty()) {
        return Some(value);
    }

    // 2. Environment variable
    env::var(env_var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_token_cli_precedence() {
        let token = resolve_token(Some("cli_token".into())).unwrap();
        assert_eq!(token, "cli_token");
    }

    #[test]
    fn test_resolve_from_env() {
        env::set_var("NOTION_SYNC_TEST_SETTING", "env_value");
        assert_eq!(
            resolve_from(None, "NOTION_SYNC_TEST_SETTING"),
            Some("env_value".into())
        );
        assert_eq!(
            resolve_from(Some("flag".into()), "NOTION_SYNC_TEST_SETTING"),
            Some("flag".into())
        );
        env::remove_var("NOTION_SYNC_TEST_SETTING");
    }

    #[test]
    fn test_resolve_from_blank_values() {
        assert_eq!(resolve_from(Some("  ".into()), "NOTION_SYNC_TEST_UNSET"), None);
        assert_eq!(resolve_from(None, "NOTION_SYNC_TEST_UNSET"), None);
    }
}
