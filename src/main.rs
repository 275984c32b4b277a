use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use vehicle_registry::config::database::DatabaseConfig;
use vehicle_registry::config::EnvironmentConfig;
use vehicle_registry::create_app;
use vehicle_registry::database;
use vehicle_registry::repositories::{InMemoryVehicleRepository, PgVehicleRepository, VehicleStore};
use vehicle_registry::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🚗 Vehicle Registry API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if config.is_development() {
        info!("🔧 Modo desarrollo: CORS permisivo si CORS_ORIGINS está vacío");
    }

    // Inicializar store
    let store: Arc<dyn VehicleStore> = match &config.database_url {
        Some(url) => {
            let db_config = DatabaseConfig::from_env(url.clone())?;
            let pool = database::connect(&db_config).await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                e
            })?;
            Arc::new(PgVehicleRepository::new(pool))
        }
        None => {
            warn!("⚠️ DATABASE_URL no definida, usando store en memoria (los datos no persisten)");
            Arc::new(InMemoryVehicleRepository::new())
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server_url()))?;

    let app = create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Health check");
    info!("   GET    /vehicle - Listar vehículos");
    info!("   POST   /vehicle - Crear vehículo");
    info!("   GET    /vehicle/:vin - Obtener vehículo");
    info!("   PUT    /vehicle/:vin - Actualizar vehículo (parcial)");
    info!("   DELETE /vehicle/:vin - Eliminar vehículo");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

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
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
