//! # Comandos Básicos
//!
//! Handlers sin efectos secundarios:
//! - `/`: health check
//! - `/echo/<texto>`: devuelve el texto
//! - `/user-agent`: devuelve el header `User-Agent`

use crate::commands::HandlerContext;
use crate::config::MissingHeaderPolicy;
use crate::error::HandlerError;
use crate::http::{Request, Response, StatusCode};

/// Handler para GET /
///
/// Siempre `200 OK` sin body.
pub fn root_handler(_req: &Request, _ctx: &HandlerContext) -> Result<Response, HandlerError> {
    Ok(Response::new(StatusCode::Ok))
}

/// Handler para GET /echo/<texto>
///
/// El body es todo lo que sigue al primer `/echo/` del target, sin
/// decodificar.
///
/// # Ejemplo de response
/// ```text
/// GET /echo/abc123 → 200 OK, text/plain, "abc123"
/// ```
pub fn echo_handler(req: &Request, _ctx: &HandlerContext) -> Result<Response, HandlerError> {
    let text = req
        .target()
        .split_once("/echo/")
        .map(|(_, rest)| rest)
        .unwrap_or_default();

    Ok(Response::text(text))
}

/// Handler para GET /user-agent
///
/// Si el header no viene, la `MissingHeaderPolicy` decide entre cortar la
/// conexión o responder 400.
pub fn user_agent_handler(req: &Request, ctx: &HandlerContext) -> Result<Response, HandlerError> {
    const HEADER: &str = "User-Agent";

    match req.header(HEADER) {
        Some(user_agent) => Ok(Response::text(user_agent)),
        None => match ctx.missing_header_policy {
            MissingHeaderPolicy::Fail => Err(HandlerError::MissingHeader(HEADER)),
            MissingHeaderPolicy::BadRequest => Ok(Response::new(StatusCode::BadRequest)),
        },
    }
}
