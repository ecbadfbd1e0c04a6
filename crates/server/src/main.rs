//! PrankWeb Artifact Server - HTTP access to precomputed pocket predictions
//!
//! This binary serves structures, scored sequences and pocket tables from the
//! configured artifact directories.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env before reading PRANK_SERVER__* variables
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
