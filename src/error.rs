//! # Errores del Servidor
//! src/error.rs
//!
//! Tipos de error por capa. Ninguno de ellos termina el proceso: un error
//! de conexión se registra y la conexión se cierra sin respuesta.

use thiserror::Error;

use crate::http::ParseError;

/// Errores que un handler no convierte en respuesta HTTP
#[derive(Debug, Error)]
pub enum HandlerError {
    /// El handler necesita un header que el request no trae
    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),

    /// Se pidió un archivo pero el servidor no tiene `--directory`
    #[error("No base directory configured")]
    DirectoryNotConfigured,

    /// Error de I/O leyendo o escribiendo un archivo
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error principal del servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// Error de I/O en el socket o al hacer bind
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// El request no se pudo parsear
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// El handler falló
    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    /// El cliente mandó más bytes de los permitidos
    #[error("Request exceeds {limit} bytes")]
    RequestTooLarge { limit: usize },

    /// Configuración inválida
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result con `ServerError`
pub type Result<T> = std::result::Result<T, ServerError>;
