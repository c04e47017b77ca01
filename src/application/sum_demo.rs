use crate::compute::{Backend, BackendSet};
use crate::config::SUM_GRID_SIZE;
use crate::domain::Matrix;

use super::timing::measure;

/// The `x + y` summation grid. Computed once, on the GPU when there is one.
#[derive(Debug, Default)]
pub struct SumDemo {
    matrix: Option<Matrix<u32>>,
    backend: Option<Backend>,
    elapsed_ms: Option<f32>,
    last_error: Option<String>,
}

impl SumDemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matrix(&self) -> Option<&Matrix<u32>> {
        self.matrix.as_ref()
    }

    /// Backend that produced the grid
    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn elapsed_ms(&self) -> Option<f32> {
        self.elapsed_ms
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_computed(&self) -> bool {
        self.matrix.is_some()
    }

    /// No grid yet and no failure waiting for a retry
    pub fn needs_compute(&self) -> bool {
        !self.is_computed() && self.last_error.is_none()
    }

    /// Forget the last failure so the next frame computes again
    pub fn retry(&mut self) {
        self.last_error = None;
    }

    /// Compute the grid unless it is already there. A failure is logged
    /// and kept for the panel until [`SumDemo::retry`]. Returns true once
    /// the grid exists.
    pub fn ensure_computed(&mut self, backends: &mut BackendSet) -> bool {
        if self.is_computed() {
            return true;
        }

        let backend = backends.resolve(Backend::Gpu);
        let result = backends.get_mut(backend).and_then(|compute| {
            let (result, elapsed_ms) = measure(|| compute.sum_grid(SUM_GRID_SIZE, SUM_GRID_SIZE));
            result.map(|matrix| (matrix, elapsed_ms))
        });
        match result {
            Ok((matrix, elapsed_ms)) => {
                log::info!("sum grid computed on {backend} in {elapsed_ms:.2} ms");
                self.matrix = Some(matrix);
                self.backend = Some(backend);
                self.elapsed_ms = Some(elapsed_ms);
                self.last_error = None;
                true
            }
            Err(e) => {
                log::error!("sum grid failed on {backend}: {e}");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Text shown in place of the table while there is nothing to show
    pub fn status(&self) -> &str {
        match (&self.matrix, &self.last_error) {
            (Some(_), _) => "",
            (None, Some(error)) => error,
            (None, None) => "Computing...",
        }
    }
}
