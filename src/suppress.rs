//! Peak-to-window conversion and suppression masking.
//!
//! Each detected peak becomes a zeroed window inside the offending
//! component only: the window starts one detected-width before the peak and
//! extends a fixed [`PAD_SAMPLES`] samples (≈ 400 ms at 250 Hz; the pad is
//! a constant, not scaled by `fs`). Suppression is multiplicative masking,
//! not interpolation: the component contributes nothing during the artefact
//! interval. Overlapping windows from multiple peaks simply union.
use ndarray::ArrayViewMut1;

use crate::score::Peak;

/// Fixed suppression-window extent in samples.
pub const PAD_SAMPLES: usize = 100;

/// Sample window `[start, end)` suppressed for `peak` in a component of
/// `len` samples: `start = round(t·fs) − round(w·fs)`, clamped to the start
/// of the component, `end = start + PAD_SAMPLES`, clamped to its end.
pub fn suppression_window(peak: &Peak, fs: f64, len: usize) -> (usize, usize) {
    let start = (peak.time_s * fs).round() as i64 - (peak.width_s * fs).round() as i64;
    let start = (start.max(0) as usize).min(len);
    let end = (start + PAD_SAMPLES).min(len);
    (start, end)
}

/// Zero every suppression window of `peaks` in one component row.
pub fn suppress(mut component: ArrayViewMut1<'_, f64>, peaks: &[Peak], fs: f64) {
    let len = component.len();
    for peak in peaks {
        let (start, end) = suppression_window(peak, fs, len);
        for v in component.slice_mut(ndarray::s![start..end]) {
            *v = 0.0;
        }
    }
}
