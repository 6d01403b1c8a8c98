//! # HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.

use http_server::config::Config;
use http_server::server::Server;
use http_server::{logging, signals};

fn main() {
    let config = Config::new();
    logging::init();

    println!("=================================");
    println!("  HTTP/1.1 Server");
    println!("=================================\n");

    println!("⚙️  Configuración:");
    println!("   Dirección: {}", config.address());
    match &config.directory {
        Some(dir) => println!("   Directorio: {}", dir.display()),
        None => println!("   Directorio: (sin configurar)"),
    }
    println!("   Workers: {}", config.worker_count());
    println!();

    // Ctrl-C termina el proceso con código 0
    if let Err(e) = signals::on_interrupt(|| {
        println!("Goodbye!");
        std::process::exit(0);
    }) {
        tracing::warn!(error = %e, "Ctrl-C no va a imprimir la despedida");
    }

    let server = match Server::bind(config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal: {}", e);
            std::process::exit(1);
        }
    };

    // Esto bloquea el thread principal
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
