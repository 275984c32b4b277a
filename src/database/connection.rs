//! Configuración de conexión a PostgreSQL
//!
//! Este módulo abre el pool y aplica las migraciones embebidas.

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos y migrar el schema
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    tracing::info!("🗄️ Conectando a {}", mask_database_url(&config.url));

    let pool = config
        .create_pool()
        .await
        .context("failed to connect to the database")?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    tracing::info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    match url.find("://") {
        Some(scheme_end) if scheme_end + 3 <= at_pos => {
            format!("{}***:***@{}", &url[..scheme_end + 3], &url[at_pos + 1..])
        }
        _ => url.to_string(),
    }
}
