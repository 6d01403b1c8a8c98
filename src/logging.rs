//! # Logging
//! src/logging.rs
//!
//! Logging estructurado con `tracing`. El nivel se controla con `RUST_LOG`
//! (por defecto `http_server=info`).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filtro usado cuando `RUST_LOG` no está definida
pub const DEFAULT_FILTER: &str = "http_server=info";

/// Instala el subscriber global
///
/// Llamarla más de una vez no hace nada (los tests pueden llamarla libremente).
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
