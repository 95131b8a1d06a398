//! # wica: wavelet-enhanced ICA artefact removal for EEG
//!
//! `wica` removes transient artefacts (eye blinks, muscle bursts, electrode
//! pops) from short multichannel EEG segments without discarding the
//! underlying neural signal. Pure Rust: ndarray + RustFFT + nalgebra, no
//! BLAS, no C libraries.
//!
//! ## Pipeline overview
//!
//! ```text
//! eeg [C, T] (or [T, C]; auto-transposed)
//!   │
//!   ├─ orient      channels-by-samples + finite-value validation
//!   ├─ ica         FastICA (deflation, super-Gaussian contrast),
//!   │              retried up to 21× until all C components converge
//!   ├─ score       per component: raw × squared Morlet scalograms →
//!   │              artefact energy → peak detection (parallel map)
//!   ├─ suppress    each peak → zeroed window in that component only
//!   └─ reconstruct cleaned = mixing · components + mean
//!        │
//!        └─→ CleaningResult { cleaned, components, noisy, noise_times, converged }
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use ndarray::Array2;
//! use wica::{clean, CleanConfig};
//!
//! // 4-channel, 8-second segment at 250 Hz
//! let eeg: Array2<f64> = Array2::zeros((4, 2000));
//!
//! let result = clean(eeg, 250.0, &CleanConfig::default()).unwrap();
//! for (&comp, times) in &result.noise_times {
//!     println!("component {comp}: artefacts at {times:?} s");
//! }
//! assert_eq!(result.cleaned.dim(), (4, 2000));
//! ```
//!
//! Each stage is also exposed as a standalone module for callers that want
//! to run or inspect individual steps (`ica`, `score`, `suppress`, ...).
//! The pipeline is stateless across calls and owns its arrays exclusively;
//! the only internal parallelism is the data-parallel scoring map.

pub mod config;
pub mod epoch;
pub mod error;
pub mod ica;
pub mod orient;
pub mod reconstruct;
pub mod scalogram;
pub mod score;
pub mod suppress;
pub mod synth;
pub mod vis;

use std::collections::{BTreeMap, BTreeSet};

use ndarray::Array2;

// ── Crate-root re-exports ─────────────────────────────────────────────────
//
// Everything a downstream user is likely to need is available directly as
// `wica::Foo` without having to know the internal module layout.

pub use config::CleanConfig;
pub use error::{Result, WicaError};
pub use ica::{Decomposition, FastIca, MAX_ATTEMPTS};
pub use orient::{ensure_channels_by_samples, from_dyn};
pub use scalogram::FilterBank;
pub use score::{artefact_energy, find_peaks, score_components, Peak};
pub use suppress::{suppression_window, PAD_SAMPLES};
pub use synth::{inject_blink, sine_mixture, SineSpec};

/// Outcome of one cleaning run.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// Cleaned signal, same shape as the orientation-normalised input.
    pub cleaned: Array2<f64>,
    /// Independent components after suppression, `[K, T]`.
    pub components: Array2<f64>,
    /// Indices of components in which at least one artefact was detected.
    pub noisy: BTreeSet<usize>,
    /// Per noisy component, detected peak times in seconds, ascending.
    pub noise_times: BTreeMap<usize, Vec<f64>>,
    /// False when the separator came up short of one component per channel
    /// and the result is best-effort.
    pub converged: bool,
}

/// Remove transient artefacts from a multichannel EEG segment.
///
/// Decomposes `eeg` into as many independent components as channels, scores
/// each component's time course for artefact-like transients with a joint
/// time-frequency energy statistic, zeroes the offending time windows within
/// the offending components only, and remixes the rest into a cleaned
/// signal.
///
/// # Arguments
///
/// * `eeg` – 2-D segment, channels × samples. A samples × channels matrix
///   (more rows than columns) is transposed automatically. All values must
///   be finite.
/// * `fs`  – Sampling rate in Hz, must be positive.
/// * `cfg` – Detection sensitivity and run options (see [`CleanConfig`]).
///
/// # Errors
///
/// All boundary checks run before any computation:
///
/// * [`WicaError::InvalidParameter`] – `fs ≤ 0` or sensitivity outside
///   `{1, 2, 3}`.
/// * [`WicaError::InvalidValue`] – NaN or infinite samples.
/// * [`WicaError::InvalidShape`] – fewer than 2 samples per channel (use
///   [`orient::from_dyn`] for dynamic-rank ingestion).
/// * [`WicaError::LayoutCapacity`] – `cfg.visualize` with more channels
///   than the comparison grid holds.
/// * [`WicaError::Convergence`] – only with `cfg.strict_convergence`; by
///   default under-convergence is reported through
///   [`CleaningResult::converged`] and a log warning instead.
///
/// # Example
///
/// ```no_run
/// use wica::{clean, CleanConfig};
/// use ndarray::Array2;
///
/// let eeg: Array2<f64> = Array2::zeros((4, 2000));
/// let result = clean(eeg, 250.0, &CleanConfig::with_sensitivity(2)).unwrap();
/// assert!(result.noisy.is_empty());
/// ```
pub fn clean(eeg: Array2<f64>, fs: f64, cfg: &CleanConfig) -> Result<CleaningResult> {
    cfg.validate()?;
    if !(fs > 0.0) || !fs.is_finite() {
        return Err(WicaError::InvalidParameter(format!(
            "sampling rate must be a positive number (got {fs})"
        )));
    }

    let oriented = orient::ensure_channels_by_samples(eeg)?;
    let n_ch = oriented.nrows();
    if cfg.visualize {
        // Fail before the expensive part if the caller asked for a render
        // the grid cannot host.
        vis::grid_dims(n_ch)?;
    }

    let decomp = FastIca::default().separate(&oriented, n_ch, cfg.seed);
    let converged = decomp.is_complete(n_ch);
    if !converged && cfg.strict_convergence {
        return Err(WicaError::Convergence {
            want: n_ch,
            got: decomp.sources.nrows(),
            attempts: decomp.attempts,
        });
    }

    // Total decomposition failure: nothing to score, return the signal as-is.
    if decomp.sources.nrows() == 0 {
        log::warn!("ICA produced no usable components; returning the signal unchanged");
        return Ok(CleaningResult {
            cleaned: oriented.clone(),
            components: decomp.sources,
            noisy: BTreeSet::new(),
            noise_times: BTreeMap::new(),
            converged: false,
        });
    }

    let reports = score::score_components(&decomp.sources, fs, cfg.time_bandwidth());

    let mut components = decomp.sources.clone();
    let mut noisy = BTreeSet::new();
    let mut noise_times = BTreeMap::new();
    for (idx, peaks) in reports.iter().enumerate() {
        if peaks.is_empty() {
            continue;
        }
        noisy.insert(idx);
        noise_times.insert(idx, peaks.iter().map(|p| p.time_s).collect());
        suppress::suppress(components.row_mut(idx), peaks, fs);
    }

    let cleaned = reconstruct::remix(&decomp.mixing, &components, &decomp.mean);
    if cfg.visualize {
        vis::log_comparison(&oriented, &cleaned, fs);
    }

    Ok(CleaningResult {
        cleaned,
        components,
        noisy,
        noise_times,
        converged,
    })
}
