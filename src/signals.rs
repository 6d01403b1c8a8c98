//! # Señales del Sistema
//! src/signals.rs
//!
//! Captura de Ctrl-C (SIGINT). El servidor no tiene cancelación propia:
//! al recibir la señal se ejecuta el callback (que en `main` imprime la
//! despedida y termina el proceso). Las conexiones en curso no se drenan.

use std::thread;

/// Ejecuta `callback` en un thread aparte cuando llega Ctrl-C
///
/// Usa un runtime de tokio de un solo thread dedicado a esperar la señal.
pub fn on_interrupt<F>(callback: F) -> std::io::Result<()>
where
    F: FnOnce() + Send + 'static,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            runtime.block_on(async {
                match tokio::signal::ctrl_c().await {
                    Ok(()) => {
                        tracing::info!("Ctrl-C recibido");
                        callback();
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "No se pudo escuchar Ctrl-C");
                    }
                }
            });
        })?;

    Ok(())
}
