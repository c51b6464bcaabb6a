use std::sync::Arc;

use cinematch_api::{
    config::Config,
    routes::{create_router, AppState},
    services::reviews::build_review_store,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let review_store = build_review_store(&config).await?;
    let state = Arc::new(AppState::new(review_store, config.compare_defaults()));
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
