//! Shared fixtures for the integration tests.
//!
//! All fixtures are seeded: the separator is stochastic, so tests that need
//! a fully converged decomposition retry over a handful of seeds and assert
//! on detected-artefact content rather than component order or sign.
use ndarray::Array2;
use wica::{inject_blink, sine_mixture, SineSpec};

pub const FS: f64 = 250.0;
pub const SEGMENT_S: f64 = 8.0;

/// Seeds tried by tests that need at least one converged separation.
pub const SEEDS: [u64; 3] = [42, 7, 1913];

/// Four-channel artefact-free surrogate: four distinct rhythms through a
/// well-conditioned mixing, modest amplitudes so nothing trips the scorer.
#[allow(unused)]
pub fn clean_fixture(seed: u64) -> Array2<f64> {
    let sources = [
        SineSpec { freq_hz: 5.0, amp: 10.0 },
        SineSpec { freq_hz: 9.0, amp: 10.0 },
        SineSpec { freq_hz: 13.0, amp: 10.0 },
        SineSpec { freq_hz: 17.0, amp: 10.0 },
    ];
    sine_mixture(4, FS, SEGMENT_S, &sources, 0.1, seed)
}

/// Blink spatial pattern used by the contaminated fixtures: frontal-dominant.
#[allow(unused)]
pub const BLINK_WEIGHTS: [f64; 4] = [1.0, 0.8, 0.4, 0.2];

/// The clean fixture with a sharp 300-unit blink injected at `at_s`.
#[allow(unused)]
pub fn blink_fixture(seed: u64, at_s: f64) -> Array2<f64> {
    let mut eeg = background_for_blink(seed);
    inject_blink(&mut eeg, FS, at_s, 300.0, 0.04, &BLINK_WEIGHTS);
    eeg
}

/// Background used under the blink: three rhythms so the blink claims the
/// fourth independent component.
#[allow(unused)]
pub fn background_for_blink(seed: u64) -> Array2<f64> {
    let sources = [
        SineSpec { freq_hz: 6.0, amp: 15.0 },
        SineSpec { freq_hz: 10.0, amp: 15.0 },
        SineSpec { freq_hz: 21.0, amp: 10.0 },
    ];
    sine_mixture(4, FS, SEGMENT_S, &sources, 0.5, seed)
}

#[allow(unused)]
pub fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
