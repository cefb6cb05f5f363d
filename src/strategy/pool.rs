//! Fixed-size worker pool for the parallel transform phase.
//!
//! A pool lives for exactly one run: it is created, jobs are dispatched, the
//! caller joins on it, and it is dropped. Jobs run on Tokio's blocking threads,
//! with a semaphore capping how many run at once.

use std::sync::Arc;

use log::debug;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::error_handling::EtlError;

/// Fan-out/fan-in pool whose results are collected in submission order.
pub struct WorkerPool<T> {
    permits: Arc<Semaphore>,
    handles: Vec<JoinHandle<Result<T, EtlError>>>,
    size: usize,
}

impl<T: Send + 'static> WorkerPool<T> {
    /// Creates a pool running at most `size` jobs concurrently (minimum 1).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            permits: Arc::new(Semaphore::new(size)),
            handles: Vec::new(),
            size,
        }
    }

    /// Maximum number of concurrently running jobs.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of jobs dispatched so far.
    pub fn dispatched(&self) -> usize {
        self.handles.len()
    }

    /// Dispatches a job, waiting for a free worker when all are busy.
    pub async fn dispatch<F>(&mut self, job: F) -> Result<(), EtlError>
    where
        F: FnOnce() -> Result<T, EtlError> + Send + 'static,
    {
        let index = self.handles.len();
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| EtlError::Worker {
                index,
                message: e.to_string(),
            })?;

        debug!("Dispatching job {index} to worker pool (size {})", self.size);
        self.handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job()
        }));
        Ok(())
    }

    /// Waits for every job and returns their results indexed by submission order.
    ///
    /// # Errors
    ///
    /// Returns the first failure in submission order: either the job's own error
    /// or [`EtlError::Worker`] if it panicked.
    pub async fn join(self) -> Result<Vec<T>, EtlError> {
        let mut results = Vec::with_capacity(self.handles.len());
        for (index, handle) in self.handles.into_iter().enumerate() {
            let result = handle.await.map_err(|e| EtlError::Worker {
                index,
                message: e.to_string(),
            })?;
            results.push(result?);
        }
        Ok(results)
    }
}
