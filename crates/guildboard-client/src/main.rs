//! The dashboard CLI

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use guildboard_client::args::{Args, Command};
use guildboard_client::render::{self, Renderer};
use guildboard_client::{ApiClient, GuildApi};
use guildboard_common::format::DateFormatter;
use guildboard_common::notify::ConsoleNotifier;
use jiff::tz::TimeZone;
use serde_json::Value;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("no data available")]
    NoData,

    #[error("dashboard reported an error: {0}")]
    Remote(String),
}

impl CliError {
    fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Payload(_) => ExitCode::from(2),
            CliError::NoData | CliError::Remote(_) => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    enable_logging(&args);
    debug!("command line: {:?}", args);

    let mut builder = ApiClient::builder()
        .base_url(&args.base_url)
        .notifier(Arc::new(ConsoleNotifier));

    if let Some(secs) = args.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    let client = builder.build();

    let dates = if args.utc {
        DateFormatter::new(TimeZone::UTC)
    } else {
        DateFormatter::system()
    };

    match run(&args.command, &client, &Renderer::new(dates)) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            // a `None` from the client was already logged and notified
            if !matches!(e, CliError::NoData) {
                error!("{e}");
            }
            e.exit_code()
        }
    }
}

fn run(
    command: &Command,
    client: &ApiClient,
    renderer: &Renderer,
) -> Result<Vec<String>, CliError> {
    let guild = GuildApi::new(client);

    let lines = match command {
        Command::Get { path } => pretty(client.retrieve(path))?,
        Command::Post { path, payload } => {
            let payload: Value = serde_json::from_str(payload)?;
            pretty(client.submit(path, &payload))?
        }
        Command::Stats { guild_id } => renderer.stats(&view(guild.stats(*guild_id))?),
        Command::TopUsers { guild_id } => renderer.top_users(&view(guild.top_users(*guild_id))?),
        Command::ModLogs { guild_id } => renderer.mod_logs(&view(guild.mod_logs(*guild_id))?),
        Command::Activity { guild_id } => renderer.activity(&view(guild.activity(*guild_id))?),
    };

    Ok(lines)
}

fn pretty(reply: Option<Value>) -> Result<Vec<String>, CliError> {
    let reply = reply.ok_or(CliError::NoData)?;
    Ok(vec![serde_json::to_string_pretty(&reply)?])
}

fn view(reply: Option<Value>) -> Result<Value, CliError> {
    let reply = reply.ok_or(CliError::NoData)?;
    match render::failure(&reply) {
        Some(reason) => Err(CliError::Remote(reason.to_string())),
        None => Ok(reply),
    }
}

fn enable_logging(args: &Args) {
    let mut builder = tracing_subscriber::fmt().compact().with_writer(std::io::stderr);

    if args.quiet {
        builder = builder.with_max_level(tracing::Level::ERROR);
    } else {
        match args.verbose {
            2.. => builder = builder.with_max_level(tracing::Level::TRACE),
            1 => builder = builder.with_max_level(tracing::Level::DEBUG),
            _ => builder = builder.with_max_level(tracing::Level::INFO),
        }
    }

    builder.init();
}
