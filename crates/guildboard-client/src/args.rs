#![doc(hidden)]

use clap::{Parser, Subcommand};

/// Arguments for the dashboard CLI
#[derive(Parser, Debug)]
#[command(version = "2.0.0", about = "Query the guild dashboard API")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[clap(
        short = 'u',
        long,
        value_name = "URL",
        env = "GUILDBOARD_URL",
        help = "Dashboard origin that request paths are resolved against",
        default_value = "http://localhost:5000"
    )]
    pub base_url: String,

    #[clap(
        short = 't',
        long,
        value_name = "SECONDS",
        env = "GUILDBOARD_TIMEOUT",
        help = "Seconds to wait for each response [default: no limit]"
    )]
    pub timeout: Option<u64>,

    #[clap(
        long,
        help = "Display dates in UTC [default: local time]",
        default_value_t = false
    )]
    pub utc: bool,

    #[clap(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Don't print any messages except for errors",
        default_value_t = false
    )]
    pub quiet: bool,

    #[clap(
        short = 'v',
        long,
        conflicts_with = "quiet",
        action = clap::ArgAction::Count,
        help = "Output details about requests and responses; specify multiple times for more detail"
    )]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// GET a path and print the JSON reply
    Get {
        #[clap(help = "Path or absolute URL, e.g. /api/guild/42/stats")]
        path: String,
    },
    /// POST a JSON payload to a path and print the JSON reply
    Post {
        #[clap(help = "Path or absolute URL")]
        path: String,
        #[clap(help = "JSON payload, e.g. '{\"prefix\":\"!\"}'")]
        payload: String,
    },
    /// Member, message and moderation totals of a guild
    Stats { guild_id: u64 },
    /// Most active members of a guild
    TopUsers { guild_id: u64 },
    /// Recent moderation actions in a guild
    ModLogs { guild_id: u64 },
    /// Messages per day over the last week
    Activity { guild_id: u64 },
}
