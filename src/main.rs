//! Bookstore server: loads settings, opens the SQLite store, provisions tables, and serves the API.

use bookstore_api::{
    app, apply_migrations, bookstore_model, connect, cors_layer, verifier_from_settings, AppState, Settings,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookstore_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let model = bookstore_model()?;
    let pool = connect(&settings.database_url).await?;
    if settings.auto_migrate {
        apply_migrations(&pool, &model).await?;
    }
    let credentials = verifier_from_settings(settings.admin.as_ref())?;
    let state = AppState::new(pool, model, credentials);

    let router = app(state, cors_layer(&settings.cors_allowed_origins));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
