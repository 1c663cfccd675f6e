pub mod backfill_effects;
pub mod config;
pub mod entities;
pub mod events;
pub mod loading;
#[cfg(test)]
mod test_support;

use backfill_effects::generate_backfill_effects;
use config::{open_log_file, Config};
use loading::read_impacted_records;
use reqwest::Client;
use simple_error::simple_error;
use std::sync::Mutex;
use tracing::{event, Level};
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

const CSV_FILENAME: &str = "AtomicRescheduleimpact.csv";
const LOG_FILENAME: &str = "reschedule_backfill.log";
const ENDPOINT_URL: &str =
    "https://api2-private.east.zocdoccloud.com/synchronizer-updates/v1/reschedule-events";
const JWT_TOKEN: &str = "your-jwt-token-here";

pub async fn handler(config: &Config, client: &Client) -> Result<(), Error> {
    let impacted_records = read_impacted_records(&config.csv_path)
        .map_err(|e| Box::new(simple_error!(format!("{:?}", e))))?;
    let processed_count = generate_backfill_effects(&impacted_records, config, client).await?;
    event!(
        Level::INFO,
        "Backfill finished, {} records processed",
        processed_count
    );
    Ok(())
}

/// Runs the backfill; a failure is logged as the final line before it is returned.
async fn run(config: &Config, client: &Client) -> Result<(), Error> {
    handler(config, client).await.map_err(|e| {
        event!(Level::ERROR, "{}", e);
        e
    })
}

fn setup_logging(config: &Config) -> Result<(), Error> {
    let log_file = open_log_file(&config.log_path)
        .map_err(|e| Box::new(simple_error!(format!("{:?}", e))))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        .with_writer(std::io::stdout.and(Mutex::new(log_file)))
        .init();
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Error> {
    let config = Config::new(CSV_FILENAME, LOG_FILENAME, ENDPOINT_URL, JWT_TOKEN)
        .map_err(|e| Box::new(simple_error!(format!("{:?}", e))))?;
    setup_logging(&config)?;
    let client = Client::new();
    run(&config, &client).await
}
