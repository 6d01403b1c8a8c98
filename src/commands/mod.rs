//! # Comandos del Servidor
//!
//! Este módulo contiene los handlers que el servidor puede ejecutar.
//!
//! ## Categorías de comandos
//!
//! - **basic**: `/`, `/echo/<texto>`, `/user-agent`
//! - **files**: lectura y escritura en el directorio base (`/files/<nombre>`)
//!
//! Cada comando es una función handler que recibe un Request y el
//! `HandlerContext`, y retorna una Response.

use std::path::PathBuf;

use crate::config::MissingHeaderPolicy;
use crate::http::Method;
use crate::router::Router;

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;

/// Datos del servidor que los handlers necesitan además del request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerContext {
    /// Directorio base de `/files` (`--directory`)
    pub directory: Option<PathBuf>,

    /// Qué hacer si falta un header requerido
    pub missing_header_policy: MissingHeaderPolicy,
}

/// Construye la tabla de rutas del servidor
pub fn router() -> Router {
    let mut router = Router::new();

    router.add_route(Method::GET, "/", root_handler);
    router.add_route(Method::GET, "/echo", echo_handler);
    router.add_route(Method::GET, "/user-agent", user_agent_handler);
    router.add_route(Method::GET, "/files", read_file_handler);
    router.add_route(Method::POST, "/files", write_file_handler);

    router
}
