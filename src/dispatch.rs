//! Background execution of optimization jobs.
//!
//! Solvers are synchronous; callers that re-optimize periodically or handle
//! several batches at once submit them to an [`OptimizationPool`]. Each
//! submission returns a [`JobHandle`] through which completion, cancellation
//! and failure are observable.
//!
//! # Examples
//!
//! ```
//! use u_logistics::config::DispatchConfig;
//! use u_logistics::dispatch::OptimizationPool;
//! use u_logistics::flow::{solve_max_flow, FlowEdge};
//!
//! let pool = OptimizationPool::new(&DispatchConfig { worker_threads: 2 }).unwrap();
//! let edges = vec![FlowEdge::new(0, 1, 4), FlowEdge::new(1, 2, 3)];
//! let handle = pool.submit("nightly-flow", move || solve_max_flow(&edges, 0, 2));
//!
//! let summary = handle.wait().unwrap().unwrap();
//! assert_eq!(summary.flow, 3);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::DispatchConfig;
use crate::error::{LogisticsError, Result};

/// Worker pool running optimization jobs off the caller's thread.
#[derive(Debug)]
pub struct OptimizationPool {
    pool: rayon::ThreadPool,
}

impl OptimizationPool {
    /// Builds the pool; `worker_threads == 0` uses rayon's default count.
    ///
    /// # Errors
    ///
    /// [`LogisticsError::Pool`] if the threads cannot be spawned.
    pub fn new(config: &DispatchConfig) -> Result<Self> {
        let mut builder = rayon::ThreadPoolBuilder::new()
            .thread_name(|i| format!("u-logistics-worker-{i}"))
            .panic_handler(|payload| {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "non-string panic payload".to_string());
                warn!(%message, "optimization job panicked");
            });
        if config.worker_threads > 0 {
            builder = builder.num_threads(config.worker_threads);
        }
        let pool = builder.build()?;
        debug!(workers = pool.current_num_threads(), "optimization pool started");
        Ok(Self { pool })
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Queues `job` and returns a handle to its result.
    pub fn submit<T, F>(&self, label: impl Into<String>, job: F) -> JobHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let label = label.into();
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let started = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&cancelled);
        let running = Arc::clone(&started);
        let job_label = label.clone();
        self.pool.spawn(move || {
            if flag.load(Ordering::SeqCst) {
                debug!(job = %job_label, "cancelled job skipped");
                return;
            }
            running.store(true, Ordering::SeqCst);
            debug!(job = %job_label, "job started");
            let value = job();
            // The handle may already be dropped.
            let _ = tx.send(value);
            debug!(job = %job_label, "job finished");
        });

        JobHandle {
            label,
            receiver: rx,
            cancelled,
            started,
        }
    }
}

/// Handle to a submitted job.
pub struct JobHandle<T> {
    label: String,
    receiver: Receiver<T>,
    cancelled: Arc<AtomicBool>,
    started: Arc<AtomicBool>,
}

impl<T> JobHandle<T> {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Prevents the job from starting if it is still queued.
    ///
    /// A job that is already running completes normally and its result is
    /// still delivered.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            warn!(job = %self.label, "job cancellation requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Blocks until the job delivers its result.
    ///
    /// # Errors
    ///
    /// [`LogisticsError::JobCancelled`] if the job was cancelled before it
    /// started, [`LogisticsError::JobLost`] if it panicked, including after a
    /// cancellation that arrived while it was running.
    pub fn wait(self) -> Result<T> {
        match self.receiver.recv() {
            Ok(value) => Ok(value),
            Err(_) => Err(self.failure()),
        }
    }

    /// Returns the result if the job has finished, `None` while it is
    /// still queued or running.
    pub fn try_wait(&self) -> Option<Result<T>> {
        match self.receiver.try_recv() {
            Ok(value) => Some(Ok(value)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(self.failure())),
        }
    }

    fn failure(&self) -> LogisticsError {
        if self.is_cancelled() && !self.started.load(Ordering::SeqCst) {
            LogisticsError::JobCancelled(self.label.clone())
        } else {
            warn!(job = %self.label, "job ended without a result");
            LogisticsError::JobLost(self.label.clone())
        }
    }
}
