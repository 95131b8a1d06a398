//! Comparison visualizer boundary.
//!
//! The pipeline itself never draws; this module owns the fixed grid policy
//! a renderer would use and a log-based comparison summary emitted when a
//! caller opts in via [`crate::CleanConfig::visualize`]. Everything goes
//! through the `log` facade; no process-global state is touched.
use ndarray::Array2;

use crate::error::{Result, WicaError};

/// Maximum channels the comparison grid can host.
pub const GRID_CAPACITY: usize = 16;

/// Grid dimensions `(rows, cols)` for `n_channels` comparison panes.
///
/// Fails with [`WicaError::LayoutCapacity`] past [`GRID_CAPACITY`] channels.
pub fn grid_dims(n_channels: usize) -> Result<(usize, usize)> {
    if n_channels > GRID_CAPACITY {
        return Err(WicaError::LayoutCapacity {
            channels: n_channels,
            capacity: GRID_CAPACITY,
        });
    }
    let cols = (n_channels as f64).sqrt().ceil() as usize;
    let rows = n_channels.div_ceil(cols.max(1));
    Ok((rows, cols))
}

/// Log a per-channel before/after RMS summary of a cleaning run.
pub fn log_comparison(original: &Array2<f64>, cleaned: &Array2<f64>, fs: f64) {
    let rms = |row: ndarray::ArrayView1<f64>| {
        (row.iter().map(|&v| v * v).sum::<f64>() / row.len().max(1) as f64).sqrt()
    };
    log::info!(
        "cleaned {} channels × {} samples ({:.2} s at {fs} Hz)",
        original.nrows(),
        original.ncols(),
        original.ncols() as f64 / fs
    );
    for ch in 0..original.nrows() {
        log::info!(
            "  ch {ch}: rms {:.4} -> {:.4}",
            rms(original.row(ch)),
            rms(cleaned.row(ch))
        );
    }
}
