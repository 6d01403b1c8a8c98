//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que habla el
//! servidor, sin usar librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (request line, headers, body)
//! - Construcción y serialización de responses
//! - Manejo de status codes
//!
//! ## Alcance
//!
//! - Un request por conexión (sin keep-alive)
//! - Sin chunked transfer encoding
//! - El body se delimita por `Content-Length` o por el cierre del mensaje

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
