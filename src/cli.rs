//! Command-line entry points.
//!
//! `invoke` handles exactly one request and prints the response, which is how
//! the function runtime drives the handler. `serve` exposes the same router
//! over HTTP.

use std::{fs, io, path::PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    configuration::{
        get_configuration, set_configuration, AppState, Config, State,
    },
    error::Error,
    handler::dispatch,
    server,
    types::ApiEvent,
};

/// Uniswap pool day data archiver
#[derive(Parser)]
#[command(name = "pool-etl")]
#[command(about = "Archives recent pool day data as CSV", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP server (default if no command specified)
    Serve,

    /// Handle a single invocation and print the response as JSON
    Invoke {
        /// Request path, e.g. /api/addNewDataset
        #[arg(long, conflicts_with = "event")]
        path: Option<String>,

        /// File holding the invocation event. Read from stdin when neither
        /// --path nor --event is given.
        #[arg(long)]
        event: Option<PathBuf>,
    },
}

pub fn init_config() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

pub async fn run_serve() -> Result<(), Error> {
    let config = init_config()?;
    info!(
        "Starting server on {}:{}",
        &config.server_host, config.port
    );

    let state = State::new(config).await?;
    let app_state = AppState::new(state);

    server::server_task(&app_state).await
}

pub async fn run_invoke(
    path: Option<String>,
    event: Option<PathBuf>,
) -> Result<(), Error> {
    let event = read_event(path, event)?;
    let config = init_config()?;
    let state = State::new(config).await?;

    let response = dispatch(&state, &event).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}

fn read_event(
    path: Option<String>,
    event: Option<PathBuf>,
) -> Result<ApiEvent, Error> {
    match (path, event) {
        (Some(path), _) => Ok(ApiEvent::new(&path)),
        (None, Some(file)) => {
            let data = fs::read_to_string(file)?;
            Ok(serde_json::from_str(&data)?)
        },
        (None, None) => {
            let data = io::read_to_string(io::stdin())?;
            Ok(serde_json::from_str(&data)?)
        },
    }
}
