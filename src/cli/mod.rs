//! CLI module
//!
//! A single `serve` subcommand runs the HTTP service.

pub mod serve;

use clap::{Parser, Subcommand};

/// Answer Gateway - search-grounded query answering service
#[derive(Parser)]
#[command(name = "answer-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,
}
