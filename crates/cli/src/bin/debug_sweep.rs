use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    sweep_cli::main_entry().await
}
