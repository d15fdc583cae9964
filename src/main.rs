use anyhow::Result;
use hkplanner::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
