use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

use ecocar_backend::config::{EmissionsConfig, EnvironmentConfig};
use ecocar_backend::routes::create_app;
use ecocar_backend::services::car_catalog::CarCatalog;
use ecocar_backend::services::dataset_loader::{load_dataset, write_enriched_json};
use ecocar_backend::services::enrichment_driver::EnrichmentDriver;
use ecocar_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let env_config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(env_config.log_level)
        .init();

    info!("🚗 EcoCar - Emisiones de ciclo de vida");
    info!("================================================");

    let emissions_config = EmissionsConfig::from_env()?;
    let driver = EnrichmentDriver::new(emissions_config);

    // Cargar y enriquecer el dataset
    let dataset = match load_dataset(&env_config.data_path, &driver) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("❌ Error cargando {}: {}", env_config.data_path.display(), e);
            return Err(anyhow::anyhow!("Error de dataset: {}", e));
        }
    };

    if !dataset.rejected.is_empty() {
        warn!("⚠️ {} filas descartadas por datos inválidos", dataset.rejected.len());
    }
    info!("✅ {} vehículos listos", dataset.records.len());

    if let Some(path) = &env_config.enriched_output_path {
        write_enriched_json(path, &dataset.records)?;
    }

    if env_config.enrich_only {
        info!("👋 Modo solo enriquecimiento, terminado");
        return Ok(());
    }

    let addr: SocketAddr = env_config.server_url().parse()?;
    let app_state = AppState::new(env_config, CarCatalog::new(dataset.records), dataset.baseline);
    let app = create_app(app_state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /cars - Buscar coches (make, model, year, risk, fuel, limit)");
    info!("   GET  /cars/match - Primer coche por make/model/year");
    info!("   GET  /cars/lowest-emissions - Ranking por emisiones de ciclo de vida");
    info!("   GET  /car/:car_id - Coche por posición en el dataset");
    info!("   GET  /makes - Marcas");
    info!("   GET  /models/:make - Modelos de una marca");
    info!("   GET  /years - Años (make, model)");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
