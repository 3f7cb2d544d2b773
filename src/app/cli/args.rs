//! Command line arguments
//!
//! Global options select the store, the queue and logging. The subcommand
//! names the queue operation to run.

use crate::core::logging::{LOG_FORMATS, LOG_LEVELS};
use clap::{ArgAction, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "requeues")]
#[command(about = "Plain and deduplicating queues on a Redis-style store")]
#[command(version)]
#[command(after_help = " * can be specified multiple times or as a comma-separated list")]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Store URL, e.g. redis://127.0.0.1/ or memory://
    #[arg(short = 'u', long = "store-url", value_name = "URL", global = true)]
    pub store_url: Option<String>,

    /// Force coloured log output
    #[arg(short = 'g', long = "color", action = ArgAction::SetTrue, global = true)]
    pub color: bool,

    /// Disable coloured log output
    #[arg(long = "no-color", action = ArgAction::SetTrue, conflicts_with = "color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = LOG_LEVELS, global = true)]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = LOG_FORMATS, global = true)]
    pub log_format: Option<String>,

    /// Queue identifier path segments*
    #[arg(
        short = 'q',
        long = "queue",
        value_name = "SEGMENTS",
        value_delimiter = ',',
        action = ArgAction::Append,
        global = true
    )]
    pub queue: Vec<String>,

    /// Element kind tag used in the queue's key
    #[arg(short = 'k', long = "kind", value_name = "KIND", global = true)]
    pub kind: Option<String>,

    /// Use the deduplicating queue
    #[arg(short = 'd', long = "dedup", action = ArgAction::SetTrue, global = true)]
    pub dedup: bool,

    /// Discard existing contents before running the command
    #[arg(long = "fresh", action = ArgAction::SetTrue, global = true)]
    pub fresh: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Push elements, at the back unless --front is given
    Push {
        #[arg(value_name = "ELEMENT", required = true)]
        elements: Vec<String>,

        /// Push at the front of the queue
        #[arg(long = "front", action = ArgAction::SetTrue)]
        front: bool,

        /// Elements per store command for batch pushes
        #[arg(short = 'b', long = "block-size", value_name = "N")]
        block_size: Option<NonZeroUsize>,
    },
    /// Pop one element, from the front unless --tail is given
    Pop {
        /// Pop from the back of the queue
        #[arg(long = "tail", action = ArgAction::SetTrue)]
        tail: bool,
    },
    /// Print the number of queued elements
    Len,
    /// Print elements FROM..=TO; negative indices count from the back
    Range {
        #[arg(value_name = "FROM", default_value_t = 0, allow_negative_numbers = true)]
        from: i64,

        #[arg(value_name = "TO", default_value_t = -1, allow_negative_numbers = true)]
        to: i64,
    },
    /// Print the first N elements
    First {
        #[arg(value_name = "N", default_value_t = 10)]
        count: usize,
    },
    /// Delete the queue and, for --dedup, its seen set
    Delete,
    /// Print version and build information
    Version,
}

impl Args {
    /// Parse from the process arguments, exiting with usage on error
    pub fn parse_from_env() -> Self {
        Self::parse()
    }

    /// Colour decision: explicit flags win, otherwise colour on a terminal
    pub fn use_color(&self) -> bool {
        use std::io::IsTerminal;
        if self.no_color {
            false
        } else {
            self.color || std::io::stderr().is_terminal()
        }
    }

    /// Whether the command needs a queue at all
    pub fn needs_queue(&self) -> bool {
        self.command != Command::Version
    }
}
