//! # HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 concurrente implementado desde cero: un request por
//! conexión, enrutado por prefijo y atendido por un pool de workers.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests y serialización de responses
//! - `router`: Enrutamiento por (método, prefijo) a handlers
//! - `commands`: Handlers (`/`, `/echo`, `/user-agent`, `/files`)
//! - `server`: Accept loop y pool de workers
//! - `config`: Argumentos CLI y variables de entorno
//! - `error`: Tipos de error por capa
//! - `logging` y `signals`: Logging estructurado y Ctrl-C
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_server::config::Config;
//! use http_server::server::Server;
//!
//! let server = Server::bind(Config::default()).expect("Error al hacer bind");
//! server.run().expect("Error en el accept loop");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
pub mod signals;
