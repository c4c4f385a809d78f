//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use zbot_database::JobStore;

/// zbot - maintenance tool for the community bot database
#[derive(Parser, Debug)]
#[command(name = "zbot")]
#[command(about = "Maintenance tool for the zbot community bot database", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Connect to the database and report whether it answers
    Ping,

    /// Bot metadata commands
    #[command(subcommand)]
    Metadata(MetadataCommands),

    /// List account anniversaries for a day
    Anniversaries {
        /// Reference day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Ignore accounts created before this day (YYYY-MM-DD)
        #[arg(long, default_value = "2015-05-13")]
        since: NaiveDate,
    },

    /// List pending lotteries or polls keyed by message id
    Jobs {
        /// Job store to read
        #[arg(long, value_enum)]
        store: StoreArg,

        /// Fields to include (message_id is always included)
        #[arg(long, value_delimiter = ',')]
        keys: Vec<String>,
    },
}

/// Metadata subcommands
#[derive(Subcommand, Debug)]
pub enum MetadataCommands {
    /// Print the value stored under a key
    Get {
        /// Metadata key
        key: String,
    },

    /// Store a value under a key (JSON, or a plain string)
    Set {
        /// Metadata key
        key: String,

        /// Value to store
        value: String,
    },
}

/// Job stores selectable from the command line
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreArg {
    /// Pending lotteries
    Lottery,
    /// Pending polls
    Poll,
}

impl From<StoreArg> for JobStore {
    fn from(arg: StoreArg) -> Self {
        match arg {
            StoreArg::Lottery => JobStore::Lottery,
            StoreArg::Poll => JobStore::Poll,
        }
    }
}
