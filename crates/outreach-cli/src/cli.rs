//! CLI argument definitions for the guest outreach tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use outreach_cli::logging::LogFormat;

use outreach_core::{MarkAction, StatusFilter};
use outreach_model::{GuestId, MessageSender};

#[derive(Parser)]
#[command(
    name = "outreach",
    version,
    about = "Collect mailing addresses from a wedding guest list",
    long_about = "Collect mailing addresses from a wedding guest list.\n\n\
                  Imports a guest CSV or a published Google Sheet, tracks each guest's\n\
                  address status and builds messenger links with drafted messages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include guest names and addresses in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Directory holding settings, guests and uploaded CSV copies.
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a guest CSV, replacing every guest.
    Import {
        /// Path to the CSV file.
        #[arg(value_name = "CSV")]
        path: PathBuf,
    },

    /// Show which columns a CSV would be imported from.
    Detect {
        /// Path to the CSV file.
        #[arg(value_name = "CSV")]
        path: PathBuf,
    },

    /// Re-import guests from the configured Google Sheet.
    Sync {
        /// Sheet share URL (saved for later syncs).
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },

    /// Show guest counts per status.
    Stats,

    /// List guests.
    List(ListArgs),

    /// Show the outreach queue with drafted messages and messenger links.
    Review(ReviewArgs),

    /// Add a guest by hand.
    Add(AddArgs),

    /// Change one field of a guest (name, address, note, profile, status).
    Edit {
        #[arg(value_name = "ID")]
        id: GuestId,
        #[arg(value_name = "FIELD")]
        field: String,
        /// New value; an empty string clears optional fields.
        #[arg(value_name = "VALUE", allow_hyphen_values = true)]
        value: String,
    },

    /// Mark a guest as requested or not on Facebook.
    Mark {
        #[arg(value_name = "ID")]
        id: GuestId,
        /// `requested` or `not_on_fb`.
        #[arg(value_name = "ACTION")]
        action: MarkAction,
    },

    /// Delete a guest and its history.
    Delete {
        #[arg(value_name = "ID")]
        id: GuestId,
    },

    /// Show the action log of a guest.
    History {
        #[arg(value_name = "ID")]
        id: GuestId,
    },

    /// Show or change settings.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Manage the Ollama text-generation service.
    #[command(subcommand)]
    Ollama(OllamaCommand),

    /// Classify a note and address without storing anything.
    Classify {
        #[arg(long, default_value = "")]
        note: String,
        #[arg(long, default_value = "")]
        address: String,
    },

    /// Build a messenger link without storing anything.
    Link {
        /// Profile URL, numeric id or username.
        #[arg(long)]
        profile: Option<String>,
        /// Message to prefill.
        #[arg(long)]
        message: Option<String>,
        /// Guest name, used when the profile is unusable.
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Status to show, or `all`.
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,

    /// Case-insensitive name search.
    #[arg(long)]
    pub search: Option<String>,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

#[derive(Args)]
pub struct ReviewArgs {
    /// Status to show, or `all`.
    #[arg(long, default_value = "needs_address")]
    pub status: StatusFilter,

    /// Case-insensitive name search.
    #[arg(long)]
    pub search: Option<String>,

    /// Page number, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Use fallback messages without contacting the text-generation service.
    #[arg(long = "no-draft")]
    pub no_draft: bool,
}

#[derive(Args)]
pub struct AddArgs {
    #[arg(value_name = "NAME")]
    pub name: String,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub note: Option<String>,
    /// Profile URL, numeric id or username.
    #[arg(long)]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the current settings.
    Show,
    /// Change settings; only the given values are updated.
    Set(SettingsSetArgs),
}

#[derive(Args)]
pub struct SettingsSetArgs {
    /// Google Sheet share URL; an empty string clears it.
    #[arg(long = "sheet-url")]
    pub sheet_url: Option<String>,
    #[arg(long = "ollama-base")]
    pub ollama_base: Option<String>,
    #[arg(long = "ollama-model")]
    pub ollama_model: Option<String>,
    #[arg(long)]
    pub bride: Option<String>,
    #[arg(long)]
    pub groom: Option<String>,
    #[arg(long = "wedding-date")]
    pub wedding_date: Option<String>,
    /// Who messages are sent as: bride, groom or both.
    #[arg(long)]
    pub sender: Option<MessageSender>,
}

#[derive(Subcommand)]
pub enum OllamaCommand {
    /// Check that the server answers.
    Test,
    /// List installed models.
    Models,
    /// Download a model.
    Pull {
        #[arg(value_name = "MODEL")]
        model: String,
    },
    /// Check that a model generates text, or draft a sample message.
    Try {
        /// Model to test (default: configured model).
        #[arg(long)]
        model: Option<String>,
        /// Draft a message for this guest name instead of a smoke test.
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
