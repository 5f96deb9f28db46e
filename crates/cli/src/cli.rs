use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "taskgate")]
#[command(about = "Host-simulator for the focus-app taskgate redirect flow")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse an inbound deep link and print the task request as JSON
    Parse { url: String },

    /// Drive the full lifecycle: parse, signal ready, deliver, report
    Flow {
        url: String,

        /// Outcome to report back (open | focus | cancelled)
        #[arg(long, default_value = "focus")]
        outcome: String,

        /// Provider identifier included in outbound signals
        #[arg(long)]
        provider_id: Option<String>,
    },
}
