//! # Pool de Workers
//! src/server/pool.rs
//!
//! Pool fijo de threads que procesan conexiones. El accept loop encola
//! una tarea y sigue aceptando; cada worker saca tareas de una cola
//! compartida (Mutex + Condvar) y las ejecuta de principio a fin.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

/// Tarea que ejecuta un worker
type Job = Box<dyn FnOnce() + Send + 'static>;

/// Estado protegido por el mutex
struct State {
    jobs: VecDeque<Job>,
    shutting_down: bool,
}

/// Cola compartida entre el pool y sus workers
struct Shared {
    state: Mutex<State>,

    /// Notifica a los workers cuando hay tareas nuevas o hay que terminar
    available: Condvar,
}

impl Shared {
    // Una tarea que hizo panic no deja la cola inconsistente
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Pool de workers de tamaño fijo
pub struct WorkerPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea un pool con `size` workers (mínimo 1)
    pub fn new(size: usize) -> std::io::Result<Self> {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                jobs: VecDeque::new(),
                shutting_down: false,
            }),
            available: Condvar::new(),
        });

        let workers = (0..size.max(1))
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("worker-{}", i))
                    .spawn(move || Self::worker_loop(shared))
            })
            .collect::<std::io::Result<Vec<_>>>()?;

        tracing::debug!(workers = workers.len(), "Pool de workers iniciado");

        Ok(Self { shared, workers })
    }

    /// Encola una tarea; nunca bloquea esperando a un worker libre
    pub fn execute<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.shared.lock().jobs.push_back(Box::new(job));
        self.shared.available.notify_one();
    }

    /// Número de workers
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Tareas encoladas que ningún worker tomó todavía
    pub fn pending(&self) -> usize {
        self.shared.lock().jobs.len()
    }

    /// Loop principal del worker
    fn worker_loop(shared: Arc<Shared>) {
        loop {
            let job = {
                let mut state = shared.lock();
                loop {
                    if let Some(job) = state.jobs.pop_front() {
                        break job;
                    }
                    if state.shutting_down {
                        return;
                    }
                    state = shared
                        .available
                        .wait(state)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            };

            if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                let current = thread::current();
                tracing::error!(worker = current.name().unwrap_or("?"), "La tarea terminó con panic");
            }
        }
    }
}

impl Drop for WorkerPool {
    /// Termina las tareas encoladas y espera a los workers
    fn drop(&mut self) {
        self.shared.lock().shutting_down = true;
        self.shared.available.notify_all();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}
