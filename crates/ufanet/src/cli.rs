//! Clap derive structures for the `ufanet` CLI.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ufanet -- open Ufanet doorphones from the command line
#[derive(Debug, Parser)]
#[command(
    name = "ufanet",
    version,
    about = "Open Ufanet cloud doorphones from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Account profile to use
    #[arg(long, short = 'p', env = "UFANET_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Site root URL (overrides profile)
    #[arg(long, env = "UFANET_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Contract number (overrides profile)
    #[arg(long, short = 'u', env = "UFANET_CONTRACT", global = true)]
    pub contract: Option<String>,

    /// Account password
    #[arg(long, env = "UFANET_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "UFANET_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "UFANET_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "UFANET_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List doorphones shared with the account
    #[command(alias = "dp")]
    Doorphones(DoorphonesArgs),

    /// Open a doorphone
    Open {
        /// Doorphone ID (see `ufanet doorphones list`)
        id: i64,
    },

    /// Check that the configured credentials are accepted
    Login,

    /// Keep polling and print the doorphone list whenever it changes
    Watch {
        /// Refresh interval in seconds (overrides profile)
        #[arg(long, short = 'i')]
        interval: Option<u64>,
    },

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DOORPHONES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DoorphonesArgs {
    #[command(subcommand)]
    pub command: DoorphonesCommand,
}

#[derive(Debug, Subcommand)]
pub enum DoorphonesCommand {
    /// List doorphones
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (passwords masked)
    Show,

    /// Print the config file location
    Path,
}
