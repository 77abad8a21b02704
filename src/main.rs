use rask_log_enricher::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    app::main().await
}
