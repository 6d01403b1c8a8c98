//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_server --directory /tmp/files --workers 8
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_DIRECTORY=/tmp/files HTTP_PORT=4221 ./http_server
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::commands::HandlerContext;
use crate::error::{Result, ServerError};

/// Qué hacer cuando un handler necesita un header que no vino
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MissingHeaderPolicy {
    /// La conexión se cierra sin respuesta
    #[default]
    Fail,

    /// Se responde `400 Bad Request`
    BadRequest,
}

/// Configuración del servidor HTTP
#[derive(Debug, Clone, Parser)]
#[command(name = "http_server")]
#[command(about = "Servidor HTTP/1.1 concurrente: echo, user-agent y archivos estáticos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio base para /files
    #[arg(long, env = "HTTP_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Número de workers (por defecto: min(32, CPUs + 4))
    #[arg(long, env = "HTTP_WORKERS")]
    pub workers: Option<usize>,

    /// Política cuando falta un header requerido (ej: User-Agent)
    #[arg(long = "missing-header", value_enum, default_value = "fail", env = "HTTP_MISSING_HEADER")]
    pub missing_header_policy: MissingHeaderPolicy,

    /// Timeout de lectura del socket en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "0", env = "HTTP_READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Tamaño máximo de un request en bytes
    #[arg(long = "max-request-bytes", default_value = "1048576", env = "HTTP_MAX_REQUEST_BYTES")]
    pub max_request_bytes: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Número efectivo de workers del pool
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            let cpus = std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1);
            (cpus + 4).min(32)
        })
    }

    /// Contexto que reciben los handlers en cada request
    pub fn handler_context(&self) -> HandlerContext {
        HandlerContext {
            directory: self.directory.clone(),
            missing_header_policy: self.missing_header_policy,
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(ServerError::InvalidConfig("workers must be >= 1".to_string()));
        }
        if self.max_request_bytes == 0 {
            return Err(ServerError::InvalidConfig("max request bytes must be >= 1".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto (igual a correr sin argumentos)
    fn default() -> Self {
        Self {
            directory: None,
            host: "127.0.0.1".to_string(),
            port: 4221,
            workers: None,
            missing_header_policy: MissingHeaderPolicy::Fail,
            read_timeout_ms: 0,
            max_request_bytes: 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 4221);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.directory, None);
        assert_eq!(config.missing_header_policy, MissingHeaderPolicy::Fail);
    }

    #[test]
    fn test_address_custom() {
        let mut config = Config::default();
        config.host = "0.0.0.0".to_string();
        config.port = 3000;
        assert_eq!(config.address(), "0.0.0.0:3000");
    }

    #[test]
    fn test_parse_directory_flag() {
        let config = Config::try_parse_from(["http_server", "--directory", "/tmp/files"]).unwrap();
        assert_eq!(config.directory, Some(PathBuf::from("/tmp/files")));
    }

    #[test]
    fn test_parse_missing_header_policy() {
        let config =
            Config::try_parse_from(["http_server", "--missing-header", "bad-request"]).unwrap();
        assert_eq!(config.missing_header_policy, MissingHeaderPolicy::BadRequest);

        let result = Config::try_parse_from(["http_server", "--missing-header", "ignore"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_worker_count() {
        let mut config = Config::default();
        let computed = config.worker_count();
        assert!((5..=32).contains(&computed));

        config.workers = Some(3);
        assert_eq!(config.worker_count(), 3);
    }

    #[test]
    fn test_validate_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_workers() {
        let mut config = Config::default();
        config.workers = Some(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_validate_zero_request_size() {
        let mut config = Config::default();
        config.max_request_bytes = 0;
        assert!(matches!(config.validate(), Err(ServerError::InvalidConfig(_))));
    }

    #[test]
    fn test_handler_context() {
        let mut config = Config::default();
        config.directory = Some(PathBuf::from("/srv"));
        config.missing_header_policy = MissingHeaderPolicy::BadRequest;

        let context = config.handler_context();
        assert_eq!(context.directory, Some(PathBuf::from("/srv")));
        assert_eq!(context.missing_header_policy, MissingHeaderPolicy::BadRequest);
    }
}
