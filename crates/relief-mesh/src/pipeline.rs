//! Worker pool that loads and meshes independent surfaces in parallel.
//!
//! Each task owns its source paths and each worker builds into its own buffers,
//! so no state is shared between builds.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

use crate::surface::{Surface, SurfaceError, SurfaceSource};

/// A surface to load and mesh on a worker thread.
#[derive(Debug, Clone)]
pub struct SurfaceTask {
    /// Caller-chosen name used to match results to tasks.
    pub name: String,
    pub source: SurfaceSource,
}

/// The outcome of a [`SurfaceTask`].
#[derive(Debug)]
pub struct SurfaceResult {
    pub name: String,
    pub surface: Result<Surface, SurfaceError>,
}

/// One worker per logical CPU.
pub fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

/// Surface building backed by a thread pool.
///
/// Tasks are submitted with [`submit`](Self::submit); results are collected
/// with [`drain_results`](Self::drain_results) or [`wait_for`](Self::wait_for).
pub struct SurfacePipeline {
    task_sender: Option<crossbeam_channel::Sender<SurfaceTask>>,
    /// Keeps the queue connected when no workers are running.
    _task_receiver: crossbeam_channel::Receiver<SurfaceTask>,
    result_receiver: crossbeam_channel::Receiver<SurfaceResult>,
    worker_handles: Vec<JoinHandle<()>>,
    /// Maximum number of tasks queued or running at once.
    budget: usize,
    in_flight: Arc<AtomicUsize>,
}

impl SurfacePipeline {
    /// Spawn `worker_count` threads accepting up to `budget` in-flight tasks.
    ///
    /// With no workers, submitted tasks stay queued until shutdown.
    pub fn new(worker_count: usize, budget: usize) -> Self {
        let budget = budget.max(1);
        let (task_tx, task_rx) = crossbeam_channel::bounded::<SurfaceTask>(budget);
        let (result_tx, result_rx) = crossbeam_channel::unbounded();
        let in_flight = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let rx = task_rx.clone();
            let tx = result_tx.clone();
            let flight = Arc::clone(&in_flight);

            handles.push(std::thread::spawn(move || {
                while let Ok(task) = rx.recv() {
                    log::debug!("Building surface '{}'", task.name);
                    let surface = Surface::load(&task.source);
                    // The slot is free before the result is observable.
                    flight.fetch_sub(1, Ordering::Relaxed);
                    let _ = tx.send(SurfaceResult {
                        name: task.name,
                        surface,
                    });
                }
            }));
        }

        Self {
            task_sender: Some(task_tx),
            _task_receiver: task_rx,
            result_receiver: result_rx,
            worker_handles: handles,
            budget,
            in_flight,
        }
    }

    /// Submit a task. Returns `false` if the budget is exhausted or the
    /// pipeline has been shut down.
    pub fn submit(&self, task: SurfaceTask) -> bool {
        let Some(sender) = &self.task_sender else {
            return false;
        };
        if self.in_flight.load(Ordering::Relaxed) >= self.budget {
            return false;
        }
        self.in_flight.fetch_add(1, Ordering::Relaxed);
        if sender.send(task).is_err() {
            self.in_flight.fetch_sub(1, Ordering::Relaxed);
            return false;
        }
        true
    }

    /// Collect every result that is already available, without blocking.
    pub fn drain_results(&self) -> Vec<SurfaceResult> {
        self.result_receiver.try_iter().collect()
    }

    /// Block until `count` results have arrived or every worker has exited.
    pub fn wait_for(&self, count: usize) -> Vec<SurfaceResult> {
        let mut results = Vec::with_capacity(count);
        while results.len() < count {
            match self.result_receiver.recv() {
                Ok(result) => results.push(result),
                Err(_) => break,
            }
        }
        results
    }

    /// Number of tasks queued or being built.
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Stop accepting tasks and join all workers once the queue is empty.
    pub fn shutdown(&mut self) {
        self.task_sender.take();
        for handle in self.worker_handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for SurfacePipeline {
    fn drop(&mut self) {
        self.shutdown();
    }
}
