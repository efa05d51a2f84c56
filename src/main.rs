use std::error::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catalog_admin::api::ApiClient;
use catalog_admin::config::Config;
use catalog_admin::storefront::{storefront_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let client = ApiClient::from_config(&config)?;

    let app = storefront_router(AppState::new(client, config.page_size));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, api = %config.api_url, "Storefront listening");
    axum::serve(listener, app).await?;

    Ok(())
}
