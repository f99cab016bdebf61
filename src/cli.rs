// ABOUTME: Command-line interface definitions using clap
// ABOUTME: Defines the single sync invocation and its global flags

use crate::config::DEFAULT_API_BASE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notion-sync")]
#[command(about = "Mirror a Notion database into a tree of Markdown notes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Integration token (overrides NOTION_API_KEY)
    #[arg(long)]
    pub token: Option<String>,

    /// Database to sync (overrides NOTION_DATABASE_ID)
    #[arg(long)]
    pub database_id: Option<String>,

    /// API base URL
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Directory that will contain notes/
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Select property used to pick eligible pages
    #[arg(long, default_value = "Status")]
    pub status_property: String,

    /// Value the status property must equal
    #[arg(long, default_value = "Published")]
    pub status: String,

    /// Stop at the first page that fails
    #[arg(long)]
    pub fail_fast: bool,

    /// Skip pages whose local note is already up to date
    #[arg(long)]
    pub skip_unchanged: bool,

    /// Disable throttling (not recommended)
    #[arg(long)]
    pub no_throttle: bool,

    /// Throttle range in ms (min:max)
    #[arg(long, value_parser = parse_throttle_range)]
    pub throttle_ms: Option<(u64, u64)>,
}

fn parse_throttle_range(s: &str) -> Result<(u64, u64), String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err("Expected format: min:max".into());
    }

    let min = parts[0].parse().map_err(|_| "Invalid min value")?;
    let max = parts[1].parse().map_err(|_| "Invalid max value")?;

    if min > max {
        return Err("min must be <= max".into());
    }

    Ok((min, max))
}
