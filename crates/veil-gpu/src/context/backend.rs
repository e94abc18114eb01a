use anyhow::{Context as _, Result};

use crate::batch::Batch;

/// Device-side executor of recorded batches.
///
/// `execute` must replay every command in record order. Returning marks the
/// batch complete: the caller then releases every reference it holds.
pub trait Backend {
    fn execute(&mut self, batch: &Batch) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn execute(&mut self, batch: &Batch) -> Result<()> {
        (**self).execute(batch)
    }
}

/// Submission front-end over a [`Backend`].
pub struct Context {
    backend: Box<dyn Backend>,
    batches_submitted: u64,
}

impl Context {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            batches_submitted: 0,
        }
    }

    /// Executes `batch` and drops it.
    ///
    /// Ownership moves in, so nothing can touch the batch while the backend
    /// runs, and its references are released as soon as execution returns.
    pub fn submit(&mut self, batch: Batch) -> Result<()> {
        log::trace!(
            "submitting batch #{} ({} commands)",
            self.batches_submitted,
            batch.len()
        );
        self.batches_submitted += 1;
        self.backend
            .execute(&batch)
            .with_context(|| format!("backend failed on batch #{}", self.batches_submitted - 1))
    }

    /// Records a fresh batch with `record` and submits it.
    pub fn do_in_batch<F>(&mut self, record: F) -> Result<()>
    where
        F: FnOnce(&mut Batch),
    {
        let mut batch = Batch::new();
        record(&mut batch);
        self.submit(batch)
    }

    /// Number of batches handed to the backend so far, failed ones included.
    #[inline]
    pub fn batches_submitted(&self) -> u64 {
        self.batches_submitted
    }
}
