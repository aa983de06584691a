use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use transit_queue::config::environment::EnvironmentConfig;
use transit_queue::database::mask_database_url;
use transit_queue::engine::TransitEngine;
use transit_queue::middleware::cors::cors_middleware;
use transit_queue::routes::create_router;
use transit_queue::services::persistence_service::{EngineStore, PgEngineStore};
use transit_queue::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚌 TransitQ - Terminal de colas y rotación de unidades");
    info!("=====================================================");

    let config = EnvironmentConfig::from_env()?;

    // Conectar la persistencia solo si hay DATABASE_URL
    let store: Option<Arc<dyn EngineStore>> = match &config.database_url {
        Some(url) => match PgEngineStore::connect(url, &config).await {
            Ok(store) => {
                info!("💾 Persistencia en PostgreSQL: {}", mask_database_url(url));
                Some(Arc::new(store))
            }
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {}", e);
                return Err(e);
            }
        },
        None => {
            warn!("⚠️ DATABASE_URL no configurada, la terminal corre en modo memoria");
            None
        }
    };

    // Restaurar estado previo o arrancar de cero
    let engine = match &store {
        Some(store) => match store.load_snapshot().await? {
            Some(snapshot) => {
                let engine = TransitEngine::from_snapshot(config.engine_config(), snapshot);
                info!(
                    "💾 Estado previo restaurado: {} en boletería, {} en pre-abordaje, {} salidas",
                    engine.ticketing().len(),
                    engine.boarding().len(),
                    engine.departures().len()
                );
                engine
            }
            None => TransitEngine::new(config.engine_config()),
        },
        None => TransitEngine::new(config.engine_config()),
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let state = AppState::new(engine, store, config);

    let app = create_router().layer(cors_middleware()).with_state(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Liveness");
    info!("🎫 Pasajeros:");
    info!("   POST /api/passengers - Admitir pasajero a boletería");
    info!("   POST /api/passengers/seed - Sembrar nómina predefinida");
    info!("   GET  /api/passengers/search?q= - Buscar por id o nombre");
    info!("   PUT  /api/passengers/:id - Actualizar pasajero encolado");
    info!("   DELETE /api/passengers/:id - Retirar pasajero de su cola");
    info!("🚶 Colas:");
    info!("   GET  /api/queues - Vista combinada de la terminal");
    info!("   GET  /api/queues/ticketing - Cola de boletería");
    info!("   GET  /api/queues/boarding - Cola de pre-abordaje");
    info!("   GET  /api/queues/served - Bitácora de abordados");
    info!("   POST /api/queues/advance - Verificar pago y avanzar");
    info!("   POST /api/queues/board - Subir a la unidad activa");
    info!("🚌 Flota:");
    info!("   GET  /api/fleet - Estado de la flota");
    info!("   POST /api/fleet/depart - Partida de la unidad activa");
    info!("   PUT  /api/fleet/active - Reasignar unidad activa");
    info!("   GET  /api/fleet/departures?limit= - Historial de partidas");
    info!("💰 Tarifas y reportes:");
    info!("   GET  /api/fares - Tabla de tarifas");
    info!("   GET  /api/reports/operations - Reporte operativo");
    info!("   GET  /api/reports/ledger - Recaudación y verificaciones");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

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
