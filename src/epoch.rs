//! Segment extraction.
//!
//! Slices a channel subset and a time window out of a longer continuous
//! recording ([C, T]); this is how callers typically produce the segment
//! handed to [`crate::clean`].
use ndarray::{Array2, s};

use crate::error::{Result, WicaError};

/// Extract `channels` over `[start_s, start_s + dur_s)` from `recording`
/// sampled at `fs`.
///
/// Returns a `[channels.len(), round(dur_s·fs)]` copy. Channel indices and
/// the time window must lie inside the recording; anything else is an
/// [`WicaError::InvalidParameter`].
pub fn extract_segment(
    recording: &Array2<f64>,
    channels: &[usize],
    start_s: f64,
    dur_s: f64,
    fs: f64,
) -> Result<Array2<f64>> {
    if !(fs > 0.0) {
        return Err(WicaError::InvalidParameter(format!(
            "sampling rate must be positive (got {fs})"
        )));
    }
    if start_s < 0.0 || dur_s <= 0.0 {
        return Err(WicaError::InvalidParameter(format!(
            "window [{start_s}, {start_s} + {dur_s}) is not a valid time range"
        )));
    }

    let (n_ch, n_t) = recording.dim();
    let start = (start_s * fs).round() as usize;
    let len = (dur_s * fs).round() as usize;
    if start + len > n_t {
        return Err(WicaError::InvalidParameter(format!(
            "window ends at sample {} but the recording has {n_t}",
            start + len
        )));
    }

    let mut out = Array2::zeros((channels.len(), len));
    for (row, &ch) in channels.iter().enumerate() {
        if ch >= n_ch {
            return Err(WicaError::InvalidParameter(format!(
                "channel {ch} out of range (recording has {n_ch})"
            )));
        }
        out.row_mut(row)
            .assign(&recording.slice(s![ch, start..start + len]));
    }
    Ok(out)
}
