//! # Comandos de Archivos
//!
//! Lectura y escritura de archivos dentro del directorio base:
//! - GET /files/<nombre>: devuelve el contenido del archivo
//! - POST /files/<nombre>: escribe el body del request en el archivo
//!
//! Dos POST simultáneos al mismo nombre no se sincronizan: gana el último
//! en escribir.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path};

use crate::commands::HandlerContext;
use crate::error::HandlerError;
use crate::http::{Request, Response, StatusCode};

/// Handler para GET /files/<nombre>
///
/// # Responses
/// - `200 OK` con `application/octet-stream` si el archivo existe
/// - `404 Not Found` si no existe
/// - `400 Bad Request` si el nombre sale del directorio base
pub fn read_file_handler(req: &Request, ctx: &HandlerContext) -> Result<Response, HandlerError> {
    let directory = ctx
        .directory
        .as_deref()
        .ok_or(HandlerError::DirectoryNotConfigured)?;

    let name = file_name(req.target());
    if !is_valid_name(name) {
        return Ok(Response::new(StatusCode::BadRequest));
    }

    let path = directory.join(name);
    if !path.is_file() {
        return Ok(Response::new(StatusCode::NotFound));
    }

    match fs::read(&path) {
        Ok(contents) => Ok(Response::new(StatusCode::Ok)
            .with_body_bytes("application/octet-stream", contents)),
        // Lo borraron entre el chequeo y la lectura
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response::new(StatusCode::NotFound)),
        Err(e) => Err(e.into()),
    }
}

/// Handler para POST /files/<nombre>
///
/// # Responses
/// - `201 Created` si se escribió el archivo (se crea o se sobrescribe)
/// - `500 Internal Server Error` si el directorio base no existe
/// - `400 Bad Request` si el nombre sale del directorio base
pub fn write_file_handler(req: &Request, ctx: &HandlerContext) -> Result<Response, HandlerError> {
    let directory = ctx
        .directory
        .as_deref()
        .ok_or(HandlerError::DirectoryNotConfigured)?;

    let name = file_name(req.target());
    if !is_valid_name(name) {
        return Ok(Response::new(StatusCode::BadRequest));
    }

    if !directory.is_dir() {
        return Ok(Response::new(StatusCode::InternalServerError));
    }

    fs::write(directory.join(name), req.body())?;

    Ok(Response::new(StatusCode::Created))
}

/// Todo lo que sigue al primer `/files/` del target
fn file_name(target: &str) -> &str {
    target
        .split_once("/files/")
        .map(|(_, name)| name)
        .unwrap_or_default()
}

/// Un nombre válido tiene al menos un componente normal y ningún `..`,
/// raíz ni prefijo (`.` se tolera, pero no alcanza por sí solo)
fn is_valid_name(name: &str) -> bool {
    let mut has_normal = false;

    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            _ => return false,
        }
    }

    has_normal
}
