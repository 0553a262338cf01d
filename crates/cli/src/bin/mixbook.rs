use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    mixbook_cli::main_entry().await
}
