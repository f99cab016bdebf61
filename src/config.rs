// ABOUTME: Resolved run configuration threaded into client, orchestrator, and writer
// ABOUTME: Built once in main from CLI flags and environment

use crate::auth::{resolve_database_id, resolve_token};
use crate::cli::Cli;
use crate::Result;
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_API_BASE: &str = "https://api.notion.com";

/// Only pages whose select property equals `value` are synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFilter {
    pub property: String,
    pub value: String,
}

impl Default for PageFilter {
    fn default() -> Self {
        PageFilter {
            property: "Status".into(),
            value: "Published".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    /// Abort the run on the first page failure.
    pub fail_fast: bool,
    /// Leave notes whose `last_updated` is not older than the remote page.
    pub skip_unchanged: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub database_id: String,
    pub api_base: String,
    pub output_dir: PathBuf,
    pub filter: PageFilter,
    pub options: SyncOptions,
    pub throttle_ms: Option<(u64, u64)>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let token = resolve_token(cli.token)?;
        let database_id = resolve_database_id(cli.database_id)?;

        // No delay at all when throttling is disabled
        let throttle_ms = if cli.no_throttle {
            Some((0, 0))
        } else {
            cli.throttle_ms
        };

        Ok(Config {
            token,
            database_id,
            api_base: cli.api_base,
            output_dir: cli.output_dir,
            filter: PageFilter {
                property: cli.status_property,
                value: cli.status,
            },
            options: SyncOptions {
                fail_fast: cli.fail_fast,
                skip_unchanged: cli.skip_unchanged,
            },
            throttle_ms,
        })
    }

    pub fn trace_loaded(&self) {
        info!(
            output_dir = %self.output_dir.display(),
            database_id = %self.database_id,
            filter_property = %self.filter.property,
            filter_value = %self.filter.value,
            "Loaded config"
        );
        debug!(options = ?self.options, throttle_ms = ?self.throttle_ms, "Sync options");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_cli_flags() {
        let cli = Cli::parse_from([
            "notion-sync",
            "--token",
            "secret",
            "--database-id",
            "db123",
            "--output-dir",
            "/tmp/site",
            "--status",
            "Ready",
            "--fail-fast",
            "--no-throttle",
        ]);
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.token, "secret");
        assert_eq!(config.database_id, "db123");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.output_dir, PathBuf::from("/tmp/site"));
        assert_eq!(
            config.filter,
            PageFilter {
                property: "Status".into(),
                value: "Ready".into()
            }
        );
        assert!(config.options.fail_fast);
        assert!(!config.options.skip_unchanged);
        assert_eq!(config.throttle_ms, Some((0, 0)));
    }

    #[test]
    fn test_config_defaults() {
        let cli = Cli::parse_from(["notion-sync", "--token", "t", "--database-id", "d"]);
        let config = Config::from_cli(cli).unwrap();

        assert_eq!(config.filter, PageFilter::default());
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.options, SyncOptions::default());
        assert_eq!(config.throttle_ms, None);
    }
}
