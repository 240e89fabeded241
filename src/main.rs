use anyhow::Result;
use timesheet::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
