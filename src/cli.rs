// Command-line interface definition
//
// Numan Thabit 2025 Nov

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Cheapest multi-offer fill routes for P2P marketplaces", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "ROUTER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the best route for a target amount over a catalog file
    Route {
        /// JSON or YAML offer catalog
        #[arg(long)]
        catalog: PathBuf,
        /// Asset amount to fill
        #[arg(long)]
        amount: f64,
        /// Maximum offers combined per route (defaults to the configured value)
        #[arg(long)]
        max_offers: Option<usize>,
        /// Case-insensitive bank or rail filter
        #[arg(long)]
        bank: Option<String>,
        /// Print the full result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the distinct banks and rails in a catalog file
    Banks {
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Serve the HTTP API
    Serve {
        /// Listen address (defaults to the configured value)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_route_command() {
        let cli = Cli::try_parse_from([
            "p2p-router", "route", "--catalog", "c.json", "--amount", "120", "--bank", "Banesco",
        ])
        .unwrap();
        match cli.command {
            Command::Route { amount, bank, max_offers, json, .. } => {
                assert_eq!(amount, 120.0);
                assert_eq!(bank.as_deref(), Some("Banesco"));
                assert_eq!(max_offers, None);
                assert!(!json);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
