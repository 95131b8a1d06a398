//! Synthetic fixtures: band-limited EEG surrogates and a blink injector.
//!
//! These utilities exist to build labelled test cases for the cleaning
//! pipeline; the core never consumes them. The generator keeps its mixing
//! deterministic and diagonally dominant so that fixtures stay
//! well-conditioned for blind source separation regardless of the seed,
//! which only drives phases and the additive noise.
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One sinusoidal source of the surrogate signal.
#[derive(Debug, Clone, Copy)]
pub struct SineSpec {
    pub freq_hz: f64,
    pub amp: f64,
}

/// Generate an `[n_ch, round(dur_s·fs)]` surrogate: sinusoidal sources with
/// seeded random phases, mixed through a fixed diagonally dominant matrix,
/// plus white noise of amplitude `noise_amp`.
///
/// Source `j` projects onto channel `i` with weight `1` when `i == j`
/// (modulo source count) and `0.5 / (1 + distance)` otherwise.
pub fn sine_mixture(
    n_ch: usize,
    fs: f64,
    dur_s: f64,
    sources: &[SineSpec],
    noise_amp: f64,
    seed: u64,
) -> Array2<f64> {
    let n_t = (dur_s * fs).round() as usize;
    let mut rng = StdRng::seed_from_u64(seed);

    let phases: Vec<f64> = sources
        .iter()
        .map(|_| rng.gen::<f64>() * std::f64::consts::TAU)
        .collect();

    let mut out = Array2::zeros((n_ch, n_t));
    for i in 0..n_ch {
        for t in 0..n_t {
            let time = t as f64 / fs;
            let mut v = 0.0;
            for (j, src) in sources.iter().enumerate() {
                let d = (i as i64 - (j % n_ch) as i64).unsigned_abs() as f64;
                let weight = if d == 0.0 { 1.0 } else { 0.5 / (1.0 + d) };
                v += weight * src.amp * (std::f64::consts::TAU * src.freq_hz * time + phases[j]).sin();
            }
            v += noise_amp * (rng.gen::<f64>() * 2.0 - 1.0);
            out[[i, t]] = v;
        }
    }
    out
}

/// Gaussian-bump blink waveform: `amp · exp(−(t − at_s)² / (2·width_s²))`.
pub fn blink_waveform(fs: f64, n_t: usize, at_s: f64, amp: f64, width_s: f64) -> Vec<f64> {
    (0..n_t)
        .map(|t| {
            let d = (t as f64 / fs - at_s) / width_s;
            amp * (-0.5 * d * d).exp()
        })
        .collect()
}

/// Add a blink at `at_s` to every channel of `eeg`, scaled per channel by
/// `weights` (the spatial pattern; typically frontal-dominant). Weights
/// cycle when shorter than the channel count.
pub fn inject_blink(
    eeg: &mut Array2<f64>,
    fs: f64,
    at_s: f64,
    amp: f64,
    width_s: f64,
    weights: &[f64],
) {
    let (n_ch, n_t) = eeg.dim();
    let bump = blink_waveform(fs, n_t, at_s, amp, width_s);
    for i in 0..n_ch {
        let w = weights[i % weights.len().max(1)];
        for t in 0..n_t {
            eeg[[i, t]] += w * bump[t];
        }
    }
}
