//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El motor vive detrás de un único RwLock:
//! cada request toma el lock, corre su operación completa y lo suelta, de
//! modo que las operaciones quedan serializadas.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::warn;

use crate::config::environment::EnvironmentConfig;
use crate::engine::TransitEngine;
use crate::services::persistence_service::EngineStore;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<TransitEngine>>,
    /// `None` en modo memoria; el motor funciona igual sin respaldo.
    pub store: Option<Arc<dyn EngineStore>>,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(
        engine: TransitEngine,
        store: Option<Arc<dyn EngineStore>>,
        config: EnvironmentConfig,
    ) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
            store,
            config,
        }
    }

    /// Respalda el estado actual del motor si hay store configurado. El
    /// respaldo es best effort: un fallo se registra y el request sigue,
    /// porque el estado autoritativo ya cambió en memoria.
    pub async fn sync_store(&self) {
        let Some(store) = &self.store else {
            return;
        };
        let snapshot = self.engine.read().await.snapshot();
        if let Err(e) = store.persist_snapshot(&snapshot).await {
            warn!("⚠️ No se pudo respaldar el estado del motor: {}", e);
        }
    }
}
