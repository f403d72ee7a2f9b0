use feast_mock::{MockConfig, logger, serve};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = MockConfig::from_env();
    logger::init_logger(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(port = config.http_port, "Feast mock backend starting...");

    if let Err(e) = serve(config).await {
        tracing::error!("Server error: {e:#}");
        return Err(e);
    }
    Ok(())
}
