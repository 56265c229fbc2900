use anyhow::Result;
use promptdesk::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
