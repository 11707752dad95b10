use clap::Parser;

/// Gas Estimate Tracker CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "gas-estimate-tracker",
    version,
    about = "Polls a gas-price oracle and serves tiered estimate history and averages"
)]
pub struct Cli {
    /// Gas-price oracle endpoint URL
    #[arg(long)]
    pub oracle_url: Option<String>,

    /// Ingestion polling interval in seconds
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// "Last N records" window served by the read endpoints
    #[arg(long)]
    pub window_records: Option<usize>,

    /// HTTP listen port
    #[arg(long)]
    pub port: Option<u16>,
}
