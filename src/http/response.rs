//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta
//!
//! Sin body la respuesta es solo la status line y una línea vacía:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! \r\n
//! ```
//!
//! Con body se agregan `Content-Type` y `Content-Length`:
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_server::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok).with_body("text/plain", "hi");
//!
//! assert_eq!(
//!     response.to_bytes(),
//!     b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nhi"
//! );
//! ```

use super::StatusCode;

/// Representa una respuesta HTTP completa
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    /// Tipo de contenido del body; siempre se fija junto con el body
    content_type: Option<String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin body
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::http::{Response, StatusCode};
    ///
    /// let response = Response::new(StatusCode::NotFound);
    /// assert_eq!(response.to_bytes(), b"HTTP/1.1 404 Not Found\r\n\r\n");
    /// ```
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }

    /// Establece el body desde un string junto con su tipo de contenido
    pub fn with_body(self, content_type: &str, body: &str) -> Self {
        self.with_body_bytes(content_type, body.as_bytes().to_vec())
    }

    /// Establece el body desde bytes junto con su tipo de contenido
    ///
    /// Útil para archivos que no son texto.
    pub fn with_body_bytes(mut self, content_type: &str, body: Vec<u8>) -> Self {
        self.content_type = Some(content_type.to_string());
        self.body = body;
        self
    }

    /// Respuesta `200 OK` con body `text/plain`
    pub fn text(body: &str) -> Self {
        Self::new(StatusCode::Ok).with_body("text/plain", body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// `Content-Type` y `Content-Length` solo aparecen si el body no está
    /// vacío. `Content-Length` es el largo en bytes, no en caracteres.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(64 + self.body.len());

        // 1. Status line
        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        // 2. Headers, solo si hay body
        if !self.body.is_empty() {
            let content_type = self.content_type.as_deref().unwrap_or("application/octet-stream");
            result.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
            result.extend_from_slice(format!("Content-Length: {}\r\n", self.body.len()).as_bytes());
        }

        // 3. Línea vacía
        result.extend_from_slice(b"\r\n");

        // 4. Body
        result.extend_from_slice(&self.body);

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene el tipo de contenido, si hay body
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
