//! Run bridge discovery and a bridge connection against a printing host.
//!
//! This example demonstrates:
//! - The simulated discovery loop advertising a fixed bridge
//! - Starting a connection for the advertised bridge
//! - A live SSDP search for bridges on the local network
//!
//! Run with: cargo run --example simulate -- --help

use std::time::Duration;

use clap::{Parser, Subcommand};
use hue_bridge_rs::{
    BridgeApi, BridgeClient, BridgeConfiguration, BridgeConnection, BridgeDescriptor,
    BridgeDiscovery, DiscoveryConfig, Error, FullState, Host, OperationalState, RawGroup,
    search_bridges,
};

#[derive(Parser)]
#[command(name = "hue-simulate")]
#[command(about = "Exercise the Hue bridge lifecycle without a protocol client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulated discovery loop and connect to what it advertises
    Simulate {
        /// Seconds between simulated advertisements
        #[arg(short, long, default_value = "2")]
        interval: u64,

        /// Seconds to keep the loop running
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },

    /// Search the local network for bridges
    Search {
        /// Search window in seconds
        #[arg(short, long, default_value = "5")]
        timeout: u64,
    },
}

/// Host printing everything it is told.
#[derive(Clone)]
struct PrintingHost;

impl Host for PrintingHost {
    fn report_operational_state(&self, state: &OperationalState) {
        println!("  state: {} ({})", state.status, state.message);
    }

    fn advertise_device(&self, descriptor: BridgeDescriptor) {
        println!(
            "  advertised bridge {} at {} with {} actor(s)",
            descriptor.unique_id,
            descriptor.address,
            descriptor.actors.len()
        );
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Protocol stand-in; never used on the simulated paths.
#[derive(Clone)]
struct NoProtocol;

struct NoClient(String);

impl BridgeApi for NoProtocol {
    type Client = NoClient;

    async fn register_user(&self, address: &str, _: &str, _: &str) -> Result<String, Error> {
        Err(Error::unreachable(address, "no protocol client in this demo"))
    }

    fn connect(&self, configuration: &BridgeConfiguration) -> NoClient {
        NoClient(configuration.host.clone())
    }
}

impl BridgeClient for NoClient {
    async fn full_state(&self) -> Result<FullState, Error> {
        Err(Error::unreachable(&self.0, "no protocol client in this demo"))
    }

    async fn groups(&self) -> Result<Vec<RawGroup>, Error> {
        Err(Error::unreachable(&self.0, "no protocol client in this demo"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { interval, duration } => {
            println!("Starting simulated discovery...");
            let mut discovery = BridgeDiscovery::new(NoProtocol, PrintingHost);
            discovery.start(DiscoveryConfig {
                simulated_interval: Duration::from_secs(interval),
                ..DiscoveryConfig::default()
            });
            tokio::time::sleep(Duration::from_secs(duration)).await;
            discovery.stop();

            println!("\nConnecting to the simulated bridge...");
            let configuration = BridgeDescriptor::simulated().configuration();
            let mut bridge = BridgeConnection::new(NoProtocol, PrintingHost, configuration);
            bridge.start().await?;
            bridge.stop().await?;
        }
        Commands::Search { timeout } => {
            println!("Searching for Hue bridges...");
            let candidates = search_bridges(Duration::from_secs(timeout)).await?;
            if candidates.is_empty() {
                println!("No bridges found on the network.");
            }
            for candidate in candidates {
                println!(
                    "  - {} ({})",
                    candidate.address,
                    candidate.bridge_id.as_deref().unwrap_or("unknown id")
                );
            }
        }
    }

    println!("\nDone!");
    Ok(())
}
