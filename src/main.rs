use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_service::api::{AppState, create_router};
use payroll_service::config::SettingsLoader;
use payroll_service::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = SettingsLoader::from_env()?.into_settings();

    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(
        app_name = %settings.app_name,
        environment = %settings.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting payroll service"
    );

    let store = store::connect(&settings.database_url)?;
    info!(database_url = %settings.database_url, "Store ready");

    let address = settings.server.bind_address();
    let state = AppState::new(store, settings);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Payroll service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server runs until killed.
        std::future::pending::<()>().await;
    }
}
