//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser HTTP desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/foo.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD /target VERSION` (separados por un espacio)
//! 2. **Headers**: Pares `Name: Value` (uno por línea, el nombre se guarda tal cual)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: Todo lo que sigue a la línea vacía, acotado por `Content-Length`
//!    si el header existe

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// Separador entre el bloque de headers y el body
pub const HEADER_TERMINATOR: &str = "\r\n\r\n";

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
    PATCH,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::CONNECT => "CONNECT",
            Method::OPTIONS => "OPTIONS",
            Method::TRACE => "TRACE",
            Method::PATCH => "PATCH",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    /// Parsea un método HTTP desde un string (sensible a mayúsculas)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            "CONNECT" => Ok(Method::CONNECT),
            "OPTIONS" => Ok(Method::OPTIONS),
            "TRACE" => Ok(Method::TRACE),
            "PATCH" => Ok(Method::PATCH),
            _ => Err(ParseError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos son fatales para la conexión: el servidor la cierra sin responder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Los bytes recibidos no son UTF-8 válido
    #[error("Request is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// La request line no tiene exactamente 3 tokens
    #[error("Malformed request line: {0:?}")]
    MalformedRequestLine(String),

    /// Método HTTP no reconocido
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Content-Length no es un entero válido
    #[error("Invalid Content-Length: {0:?}")]
    InvalidContentLength(String),

    /// Llegaron menos bytes de body que los anunciados
    #[error("Incomplete body: expected {expected} bytes, got {received}")]
    IncompleteRequest { expected: usize, received: usize },
}

/// Representa un request HTTP parseado
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP
    method: Method,

    /// Target completo tal como llegó (ej: "/echo/abc")
    target: String,

    /// Versión del protocolo (no se valida)
    version: String,

    /// Headers HTTP, con el nombre exacto como llave
    headers: HashMap<String, String>,

    /// Body del request (vacío si no hay)
    body: String,
}

impl Request {
    /// Parsea un request HTTP desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_server::http::Request;
    ///
    /// let raw = b"GET /echo/abc HTTP/1.1\r\nUser-Agent: curl/8.0\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.target(), "/echo/abc");
    /// assert_eq!(request.header("User-Agent"), Some("curl/8.0"));
    /// assert!(request.body().is_empty());
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let message = std::str::from_utf8(buffer)?;

        if message.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Sin línea vacía todo el mensaje es head y no hay body
        let (head, body_section) = match message.find(HEADER_TERMINATOR) {
            Some(pos) => (&message[..pos], &message[pos + HEADER_TERMINATOR.len()..]),
            None => (message, ""),
        };

        let mut lines = head.split("\r\n");
        let start_line = lines.next().unwrap_or_default();

        let (method, target, version) = Self::parse_request_line(start_line)?;
        let headers = Self::parse_headers(lines);
        let body = Self::parse_body(head, body_section)?;

        Ok(Request {
            method,
            target,
            version,
            headers,
            body,
        })
    }

    /// Parsea la request line
    ///
    /// Formato: `GET /path HTTP/1.1`, separado por espacios simples.
    fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 || parts[1].is_empty() {
            return Err(ParseError::MalformedRequestLine(line.to_string()));
        }

        let method = parts[0].parse::<Method>()?;

        Ok((method, parts[1].to_string(), parts[2].to_string()))
    }

    /// Parsea los headers HTTP
    ///
    /// Las líneas sin ':' se ignoran. Se separa en el primer ':' y solo
    /// el valor se recorta.
    fn parse_headers<'a>(lines: impl Iterator<Item = &'a str>) -> HashMap<String, String> {
        lines
            .filter_map(|line| line.split_once(':'))
            .map(|(name, value)| (name.to_string(), value.trim().to_string()))
            .collect()
    }

    /// Extrae el body de lo que sigue a la línea vacía
    fn parse_body(head: &str, body_section: &str) -> Result<String, ParseError> {
        let Some(expected) = content_length(head)? else {
            return Ok(body_section.to_string());
        };

        if body_section.len() < expected {
            return Err(ParseError::IncompleteRequest {
                expected,
                received: body_section.len(),
            });
        }

        // Un Content-Length que corta un carácter multibyte no es válido
        body_section
            .get(..expected)
            .map(str::to_string)
            .ok_or_else(|| ParseError::InvalidContentLength(expected.to_string()))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target completo del request
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (el nombre debe coincidir exactamente)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// Obtiene el body del request
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Posición donde empieza el `\r\n\r\n` que cierra los headers
pub fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR.as_bytes())
}

/// Lee `Content-Length` del bloque de headers
///
/// Para el framing el nombre se compara sin distinguir mayúsculas,
/// aunque `Request::header` sí las distingue.
pub fn content_length(head: &str) -> Result<Option<usize>, ParseError> {
    for line in head.split("\r\n").skip(1) {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };

        if name.trim().eq_ignore_ascii_case("Content-Length") {
            let value = value.trim();
            return value
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ParseError::InvalidContentLength(value.to_string()));
        }
    }

    Ok(None)
}
