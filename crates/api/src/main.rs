use procura_directory::DirectorySeed;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    procura_observability::init();

    let seed = match std::env::var("DIRECTORY_SEED") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str::<DirectorySeed>(&raw)?
        }
        Err(_) => {
            tracing::warn!("DIRECTORY_SEED not set; starting with an empty directory");
            DirectorySeed::default()
        }
    };

    let app = procura_api::app::build_app(seed);

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
