//! Error types for harness runs.
//!
//! Malformed configuration is never an error (see [`crate::config`]); what
//! remains is fatal by definition and ends the process with exit code 1.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    /// A workload buffer could not be reserved.
    #[error("allocation failed for {what}: {elements} elements")]
    Allocation { what: &'static str, elements: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

/// Allocate a zeroed-or-filled buffer of `len` elements, reporting failure
/// instead of aborting the process.
pub fn alloc_buffer<T: Clone>(what: &'static str, len: u64, fill: T) -> Result<Vec<T>> {
    let err = || BenchError::Allocation {
        what,
        elements: len,
    };
    let n = usize::try_from(len).map_err(|_| err())?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(n).map_err(|_| err())?;
    buf.resize(n, fill);
    Ok(buf)
}

/// Like [`alloc_buffer`] but leaves the buffer empty with room for `len` pushes.
pub fn alloc_with_capacity<T>(what: &'static str, len: u64) -> Result<Vec<T>> {
    let err = || BenchError::Allocation {
        what,
        elements: len,
    };
    let n = usize::try_from(len).map_err(|_| err())?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(n).map_err(|_| err())?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_buffer_is_filled() {
        let buf = alloc_buffer("test", 4, 7u8).unwrap();
        assert_eq!(buf, vec![7, 7, 7, 7]);
    }

    #[test]
    fn absurd_length_reports_allocation_error() {
        let err = alloc_buffer("huge", u64::MAX, 0u64).unwrap_err();
        match err {
            BenchError::Allocation { what, elements } => {
                assert_eq!(what, "huge");
                assert_eq!(elements, u64::MAX);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn capacity_buffer_starts_empty() {
        let buf: Vec<f64> = alloc_with_capacity("cap", 16).unwrap();
        assert!(buf.is_empty());
        assert!(buf.capacity() >= 16);
    }
}
