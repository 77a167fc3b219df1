#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod commands;
mod config;

use std::process;

use anyhow::Context;
use pinecone_client::Pinecone;

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "pinecone_cli::startup";
pub const TRACING_TARGET_COMMAND: &str = "pinecone_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_COMMAND,
            error = %format!("{error:#}"),
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    Cli::init_tracing();
    let cli = Cli::init();

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        command = ?cli.command,
        controller_host = ?cli.client.controller_host,
        "parsed arguments"
    );

    let pinecone =
        Pinecone::with_options(cli.api_key, cli.client).context("failed to create client")?;

    commands::execute(&pinecone, cli.command).await
}
