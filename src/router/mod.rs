//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, prefijo) a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! El router solo mira los dos primeros segmentos del path: `/files/a.txt`
//! se enruta como `/files`. Así un handler atiende todo lo que cuelga de su
//! prefijo. Si no hay handler, retorna 404 Not Found sin body.
//!
//! La tabla se llena antes de arrancar el servidor y después se comparte
//! con `Arc<Router>` entre los workers, sin mutarla nunca más.

use std::collections::HashMap;

use crate::commands::HandlerContext;
use crate::error::HandlerError;
use crate::http::{Method, Request, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe el request completo (con el target original) y el
/// contexto del servidor.
pub type Handler = fn(&Request, &HandlerContext) -> Result<Response, HandlerError>;

/// Llave de la tabla de rutas
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub prefix: String,
}

impl RouteKey {
    pub fn new(method: Method, prefix: &str) -> Self {
        Self {
            method,
            prefix: prefix.to_string(),
        }
    }
}

/// Router que mapea (método, prefijo) a handlers
#[derive(Default)]
pub struct Router {
    routes: HashMap<RouteKey, Handler>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Registra una ruta con su handler
    ///
    /// Registrar dos veces el mismo (método, prefijo) reemplaza el handler
    /// anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::commands::HandlerContext;
    /// use http_server::error::HandlerError;
    /// use http_server::http::{Method, Request, Response};
    /// use http_server::router::Router;
    ///
    /// fn hello(_req: &Request, _ctx: &HandlerContext) -> Result<Response, HandlerError> {
    ///     Ok(Response::text("hello"))
    /// }
    ///
    /// let mut router = Router::new();
    /// router.add_route(Method::GET, "/hello", hello);
    /// assert!(router.contains(Method::GET, "/hello"));
    /// ```
    pub fn add_route(&mut self, method: Method, prefix: &str, handler: Handler) {
        self.routes.insert(RouteKey::new(method, prefix), handler);
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn dispatch(
        &self,
        request: &Request,
        context: &HandlerContext,
    ) -> Result<Response, HandlerError> {
        let key = RouteKey {
            method: request.method(),
            prefix: route_prefix(request.target()),
        };

        match self.routes.get(&key) {
            Some(handler) => handler(request, context),
            None => Ok(Response::new(StatusCode::NotFound)),
        }
    }

    /// Indica si hay un handler para (método, prefijo)
    pub fn contains(&self, method: Method, prefix: &str) -> bool {
        self.routes.contains_key(&RouteKey::new(method, prefix))
    }

    /// Número de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Calcula el prefijo de ruta de un target
///
/// Toma la raíz más el primer segmento no vacío del path. Los `/`
/// repetidos y los segmentos `.` se ignoran, incluido un `//` inicial:
/// `//echo/a` cae en `/echo`, no en una raíz `//` aparte.
///
/// # Ejemplo
/// ```
/// use http_server::router::route_prefix;
///
/// assert_eq!(route_prefix("/files/foo.txt"), "/files");
/// assert_eq!(route_prefix("/echo/a/b"), "/echo");
/// assert_eq!(route_prefix("/"), "/");
/// ```
pub fn route_prefix(target: &str) -> String {
    let first_segment = target
        .split('/')
        .find(|segment| !segment.is_empty() && *segment != ".");

    match first_segment {
        Some(segment) => format!("/{}", segment),
        None => "/".to_string(),
    }
}
