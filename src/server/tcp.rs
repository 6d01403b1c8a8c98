//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor TCP que atiende múltiples conexiones simultáneas con un pool
//! de workers. El accept loop solo bloquea en `accept`; cada conexión la
//! atiende un único worker de principio a fin:
//!
//! ```text
//! Accepted → Read → Parsed → Dispatched → Serialized → Closed
//! ```
//!
//! Un request por conexión. La conexión se cierra siempre, haya o no
//! respuesta. Sin timeouts por defecto: un cliente lento ocupa su worker
//! hasta que envíe o cierre (ver `--read-timeout-ms`).
//!
//! Sin `Content-Length` la lectura termina apenas llegan los headers: un
//! body que venga en un segmento TCP posterior se pierde.

use crate::commands::{self, HandlerContext};
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::http::request::{content_length, find_header_end, HEADER_TERMINATOR};
use crate::http::Request;
use crate::router::Router;
use crate::server::pool::WorkerPool;
use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Tamaño del buffer de lectura del socket
const READ_CHUNK: usize = 4096;

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    context: Arc<HandlerContext>,
    listener: TcpListener,
    pool: WorkerPool,
}

impl Server {
    /// Hace bind con las rutas por defecto
    pub fn bind(config: Config) -> Result<Self> {
        Self::bind_with_router(config, commands::router())
    }

    /// Hace bind con una tabla de rutas propia
    ///
    /// La tabla queda congelada: después de esto solo se lee.
    pub fn bind_with_router(config: Config, router: Router) -> Result<Self> {
        config.validate()?;

        // En Unix std activa SO_REUSEADDR, así un reinicio puede volver a hacer bind
        let listener = TcpListener::bind(config.address())?;
        let pool = WorkerPool::new(config.worker_count())?;

        tracing::info!(
            address = %listener.local_addr()?,
            workers = pool.size(),
            routes = router.len(),
            directory = ?config.directory,
            "Servidor escuchando"
        );

        Ok(Self {
            context: Arc::new(config.handler_context()),
            router: Arc::new(router),
            config,
            listener,
            pool,
        })
    }

    /// Dirección real del listener (útil con puerto 0)
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop; solo retorna si el listener deja de producir conexiones
    pub fn run(&self) -> Result<()> {
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.spawn_connection(stream),
                Err(e) => {
                    tracing::warn!(error = %e, "Error al aceptar conexión");
                }
            }
        }

        Ok(())
    }

    /// Entrega la conexión al pool y retorna de inmediato
    fn spawn_connection(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        if self.config.read_timeout_ms > 0 {
            let timeout = Duration::from_millis(self.config.read_timeout_ms);
            if let Err(e) = stream.set_read_timeout(Some(timeout)) {
                tracing::warn!(peer = %peer, error = %e, "No se pudo fijar el read timeout");
            }
        }

        tracing::debug!(peer = %peer, pending = self.pool.pending(), "Nueva conexión");

        let router = Arc::clone(&self.router);
        let context = Arc::clone(&self.context);
        let max_request_bytes = self.config.max_request_bytes;

        self.pool.execute(move || {
            if let Err(e) = handle_connection(stream, &router, &context, max_request_bytes) {
                tracing::warn!(peer = %peer, error = %e, "Conexión descartada sin respuesta");
            }
        });
    }
}

/// Atiende una conexión completa: lee, parsea, despacha y responde
///
/// Los errores de parseo y de handler se retornan sin escribir nada; quien
/// llama solo tiene que registrarlos. Al salir el stream se cierra.
pub fn handle_connection<S: Read + Write>(
    mut stream: S,
    router: &Router,
    context: &HandlerContext,
    max_request_bytes: usize,
) -> Result<()> {
    let start = Instant::now();

    let buffer = read_request(&mut stream, max_request_bytes)?;
    if buffer.is_empty() {
        tracing::debug!("Conexión cerrada sin datos");
        return Ok(());
    }

    let request = Request::parse(&buffer)?;
    let response = router.dispatch(&request, context)?;

    stream.write_all(&response.to_bytes())?;
    stream.flush()?;

    tracing::info!(
        method = %request.method(),
        target = request.target(),
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Request atendido"
    );

    Ok(())
}

/// Lee un request completo del stream
///
/// Termina cuando llegaron los headers y los `Content-Length` bytes de
/// body, o cuando el cliente cierra su lado.
pub fn read_request<R: Read>(stream: &mut R, max_bytes: usize) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match stream.read(&mut chunk) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        if n == 0 {
            break;
        }

        buffer.extend_from_slice(&chunk[..n]);

        if buffer.len() > max_bytes {
            return Err(ServerError::RequestTooLarge { limit: max_bytes });
        }

        if is_complete(&buffer) {
            break;
        }
    }

    Ok(buffer)
}

/// Indica si el buffer ya tiene headers completos y todo el body anunciado
fn is_complete(buffer: &[u8]) -> bool {
    let Some(end) = find_header_end(buffer) else {
        return false;
    };

    let body_len = buffer.len() - end - HEADER_TERMINATOR.len();

    // Un head inválido lo reporta el parser; aquí basta con dejar de leer
    let expected = std::str::from_utf8(&buffer[..end])
        .ok()
        .and_then(|head| content_length(head).ok().flatten())
        .unwrap_or(0);

    body_len >= expected
}
