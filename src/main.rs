use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use carpool_backend::config::database::DatabaseConfig;
use carpool_backend::config::environment::EnvironmentConfig;
use carpool_backend::create_router;
use carpool_backend::database::{create_pool, run_migrations};
use carpool_backend::repositories::Repositories;
use carpool_backend::services::notification_service::run_notification_dispatcher;
use carpool_backend::services::status_catalog::StatusCatalog;
use carpool_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Carpool Backend");
    info!("==================");
    info!("🌍 Entorno: {}", config.environment);

    let db_config = DatabaseConfig::from_env()?;
    let repos = if db_config.is_memory() {
        info!("🧪 Usando almacenamiento en memoria");
        Repositories::in_memory()
    } else {
        let pool = create_pool(&db_config).await?;
        if config.run_migrations {
            run_migrations(&pool).await?;
        }
        Repositories::postgres(pool)
    };

    let catalog = StatusCatalog::load(repos.references.as_ref()).await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let (state, notification_rx) = AppState::new(repos, catalog, config);

    tokio::spawn(run_notification_dispatcher(
        state.repos.notifications.clone(),
        notification_rx,
        state.metrics.clone(),
    ));

    let app = create_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints públicos: /register, /login, /health, /metrics, /job-titles, /departments");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
