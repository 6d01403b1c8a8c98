//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero y le habla
//! HTTP crudo por TCP.

use http_server::config::Config;
use http_server::server::Server;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Directorio temporal único por test
fn temp_dir() -> PathBuf {
    let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("http_server_it_{}_{}", std::process::id(), n));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Helper: levanta un servidor y retorna su dirección
fn start_server(directory: Option<PathBuf>) -> SocketAddr {
    let mut config = Config::default();
    config.port = 0;
    config.workers = Some(4);
    config.directory = directory;

    start_server_with(config)
}

fn start_server_with(config: Config) -> SocketAddr {
    let server = Server::bind(config).expect("bind");
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run());
    addr
}

/// Helper: envía bytes crudos y retorna todo lo que responda el servidor
fn send_raw(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).expect("connect");
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();

    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

fn send(addr: SocketAddr, raw: &str) -> String {
    String::from_utf8(send_raw(addr, raw.as_bytes())).unwrap()
}

#[test]
fn test_root_endpoint() {
    let addr = start_server(None);
    assert_eq!(send(addr, "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"), "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_echo_endpoint() {
    let addr = start_server(None);
    let response = send(addr, "GET /echo/abc123 HTTP/1.1\r\nHost: localhost\r\n\r\n");

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 6\r\n\r\nabc123"
    );
}

#[test]
fn test_echo_printable_ascii() {
    let addr = start_server(None);

    for text in ["a", "hello-world", "x.y_z~1", "UPPER", "12345"] {
        let response = send(addr, &format!("GET /echo/{} HTTP/1.1\r\n\r\n", text));
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(response.contains("Content-Type: text/plain\r\n"));
        assert!(response.ends_with(&format!("\r\n\r\n{}", text)), "echo of {}", text);
    }
}

#[test]
fn test_user_agent_endpoint() {
    let addr = start_server(None);
    let response = send(
        addr,
        "GET /user-agent HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test-client/1.0\r\n\r\n",
    );

    assert_eq!(
        response,
        "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 15\r\n\r\ntest-client/1.0"
    );
}

#[test]
fn test_missing_user_agent_drops_connection_only() {
    let addr = start_server(None);

    // Sin User-Agent la conexión se cierra sin respuesta
    assert!(send(addr, "GET /user-agent HTTP/1.1\r\nHost: localhost\r\n\r\n").is_empty());

    // El servidor sigue atendiendo
    assert_eq!(send(addr, "GET / HTTP/1.1\r\n\r\n"), "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_malformed_request_drops_connection_only() {
    let addr = start_server(None);

    assert!(send(addr, "NOT-HTTP\r\n\r\n").is_empty());
    assert!(send(addr, "BREW /pot HTTP/1.1\r\n\r\n").is_empty());
    assert!(send_raw(addr, b"GET /\xff HTTP/1.1\r\n\r\n").is_empty());

    assert_eq!(send(addr, "GET / HTTP/1.1\r\n\r\n"), "HTTP/1.1 200 OK\r\n\r\n");
}

#[test]
fn test_not_found() {
    let addr = start_server(None);

    assert_eq!(send(addr, "GET /nonexistent HTTP/1.1\r\n\r\n"), "HTTP/1.1 404 Not Found\r\n\r\n");
    assert_eq!(send(addr, "POST /echo/abc HTTP/1.1\r\n\r\n"), "HTTP/1.1 404 Not Found\r\n\r\n");
    assert_eq!(send(addr, "PUT /files/a HTTP/1.1\r\n\r\n"), "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[test]
fn test_file_round_trip() {
    let dir = temp_dir();
    let addr = start_server(Some(dir.clone()));

    let created = send(
        addr,
        "POST /files/foo.txt HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello",
    );
    assert_eq!(created, "HTTP/1.1 201 Created\r\n\r\n");

    let read = send(addr, "GET /files/foo.txt HTTP/1.1\r\n\r\n");
    assert_eq!(
        read,
        "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: 5\r\n\r\nhello"
    );

    let missing = send(addr, "GET /files/missing.txt HTTP/1.1\r\n\r\n");
    assert_eq!(missing, "HTTP/1.1 404 Not Found\r\n\r\n");

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_file_multiline_body() {
    let dir = temp_dir();
    let addr = start_server(Some(dir.clone()));

    let body = "first line\r\nsecond line\nthird";
    let created = send(
        addr,
        &format!("POST /files/lines.txt HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}", body.len(), body),
    );
    assert_eq!(created, "HTTP/1.1 201 Created\r\n\r\n");
    assert_eq!(std::fs::read_to_string(dir.join("lines.txt")).unwrap(), body);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_file_write_without_base_directory() {
    let dir = temp_dir().join("gone");
    let addr = start_server(Some(dir));

    let response = send(addr, "POST /files/a.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\nx");
    assert_eq!(response, "HTTP/1.1 500 Internal Server Error\r\n\r\n");
}

#[test]
fn test_concurrent_connections_are_independent() {
    let dir = temp_dir();
    std::fs::write(dir.join("shared.txt"), "shared").unwrap();
    let addr = start_server(Some(dir.clone()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            thread::spawn(move || match i % 4 {
                0 => {
                    let text = format!("client{}", i);
                    let response = send(addr, &format!("GET /echo/{} HTTP/1.1\r\n\r\n", text));
                    assert!(response.ends_with(&text), "{}", response);
                }
                1 => {
                    let agent = format!("agent/{}", i);
                    let response = send(
                        addr,
                        &format!("GET /user-agent HTTP/1.1\r\nUser-Agent: {}\r\n\r\n", agent),
                    );
                    assert!(response.ends_with(&agent), "{}", response);
                }
                2 => {
                    let response = send(addr, "GET /files/shared.txt HTTP/1.1\r\n\r\n");
                    assert!(response.ends_with("\r\n\r\nshared"), "{}", response);
                }
                _ => {
                    let response = send(addr, "GET / HTTP/1.1\r\n\r\n");
                    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\n");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn test_stalled_client_does_not_block_others() {
    let addr = start_server(None);

    // Este cliente nunca termina sus headers y ocupa un worker
    let mut stalled = TcpStream::connect(addr).unwrap();
    stalled.write_all(b"GET /echo/slow HTTP/1.1\r\n").unwrap();

    let response = send(addr, "GET /echo/fast HTTP/1.1\r\n\r\n");
    assert!(response.ends_with("\r\n\r\nfast"));

    // Al cerrar su lado, el cliente lento igual recibe respuesta
    stalled.shutdown(std::net::Shutdown::Write).unwrap();
    stalled.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut buf = String::new();
    stalled.read_to_string(&mut buf).unwrap();
    assert!(buf.ends_with("\r\n\r\nslow"));
}

#[test]
fn test_read_timeout_drops_stalled_client() {
    let mut config = Config::default();
    config.port = 0;
    config.workers = Some(2);
    config.read_timeout_ms = 200;
    let addr = start_server_with(config);

    // Headers sin terminar: el worker se rinde al vencer el timeout
    let mut stalled = TcpStream::connect(addr).unwrap();
    stalled.write_all(b"GET / HTTP/1.1\r\n").unwrap();
    stalled.set_read_timeout(Some(Duration::from_secs(5))).unwrap();

    let start = Instant::now();
    let mut buf = Vec::new();
    stalled.read_to_end(&mut buf).unwrap();

    assert!(buf.is_empty());
    assert!(start.elapsed() < Duration::from_millis(1500), "{:?}", start.elapsed());

    assert_eq!(send(addr, "GET / HTTP/1.1\r\n\r\n"), "HTTP/1.1 200 OK\r\n\r\n");
}
