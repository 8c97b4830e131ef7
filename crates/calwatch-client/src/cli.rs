//! Command-line interface definition.

use std::path::PathBuf;

use calwatch_face::Language;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

/// calwatch - the next twelve hours of your calendar on an analog dial
#[derive(Debug, Parser)]
#[command(name = "calwatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "CALWATCH_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    // --- Event source flags ---
    /// Read event rows from this JSON file
    #[arg(long, env = "CALWATCH_EVENTS", global = true, conflicts_with = "demo")]
    pub events: Option<PathBuf>,

    /// Use the built-in demo calendar and clock
    #[arg(long, global = true)]
    pub demo: bool,

    // --- Display flags ---
    /// IANA time zone of the wearer, e.g. Asia/Tokyo
    #[arg(long, global = true)]
    pub timezone: Option<String>,

    /// Language of the face's text
    #[arg(long, value_enum, global = true)]
    pub language: Option<LanguageArg>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one frame
    Render {
        /// Instant to render (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,

        /// Print the draw commands as JSON
        #[arg(long)]
        json: bool,

        /// Render the ambient face
        #[arg(long)]
        ambient: bool,
    },

    /// List the normalized events for the next twelve hours
    Events {
        /// Instant to list from (RFC 3339); defaults to now
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },

    /// Redraw on the face's tick until interrupted
    Run {
        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,

        /// Use the once-a-minute ambient cadence
        #[arg(long)]
        ambient: bool,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    Ja,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Ja => Language::Ja,
        }
    }
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn render_with_offset_instant() {
        let cli = Cli::parse_from(["calwatch", "render", "--at", "2015-05-27T10:08:36+09:00", "--json"]);
        match cli.command {
            Some(Command::Render { at, json, ambient }) => {
                assert_eq!(at, Some(Utc.with_ymd_and_hms(2015, 5, 27, 1, 8, 36).unwrap()));
                assert!(json);
                assert!(!ambient);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["calwatch", "events", "--demo", "--language", "ja"]);
        assert!(cli.demo);
        assert_eq!(cli.language, Some(LanguageArg::Ja));
        assert!(matches!(cli.command, Some(Command::Events { .. })));
    }

    #[test]
    fn demo_conflicts_with_events_file() {
        let result = Cli::try_parse_from(["calwatch", "--demo", "--events", "rows.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn bad_instant_rejected() {
        let result = Cli::try_parse_from(["calwatch", "render", "--at", "tomorrow"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
