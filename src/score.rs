//! Artefact scoring: joint time-frequency energy statistic + peak detection.
//!
//! For each independent component the scorer builds two scalograms through
//! an identical Morlet bank (one of the raw time course, one of its square)
//! and combines them into a single non-negative "artefact energy" series.
//! Sustained rhythms put their squared-signal energy at DC and at twice the
//! rhythm frequency, both outside the scored band, so they stay quiet;
//! transients are broadband in both scalograms and light the band up.
//!
//! Peaks in the energy series above an absolute height are the detected
//! artefacts. All constants are empirically tuned against 250 Hz recordings
//! and unit-variance components; they are deliberately not rescaled with
//! the sampling rate.
use ndarray::Array2;
use rayon::prelude::*;

use crate::scalogram::FilterBank;

/// First scored filter-bank row (row 31 in 1-based terms).
pub const BAND_LO: usize = 30;
/// One past the last scored row (row 50 in 1-based terms).
pub const BAND_HI: usize = 50;
/// Fixed normalisation divisor applied after averaging across the band.
pub const ENERGY_NORM: f64 = 20.0;
/// Absolute minimum height for a peak to count as an artefact.
pub const MIN_PEAK_HEIGHT: f64 = 50.0;

/// One detected artefact transient in a component's energy series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    /// Location of the energy maximum, seconds from segment start.
    pub time_s: f64,
    /// Energy at the maximum.
    pub height: f64,
    /// Width at half prominence, seconds.
    pub width_s: f64,
}

/// Artefact-energy time series of a single component.
///
/// `(|W_raw| · |W_sq|)²` per time-frequency cell, averaged over rows
/// [`BAND_LO`]..[`BAND_HI`], divided by [`ENERGY_NORM`].
pub fn artefact_energy(x: &[f64], bank: &FilterBank) -> Vec<f64> {
    let sg_raw = bank.scalogram(x);
    let squared: Vec<f64> = x.iter().map(|&v| v * v).collect();
    let sg_sq = bank.scalogram(&squared);

    let n_rows = (BAND_HI - BAND_LO) as f64;
    (0..x.len())
        .map(|t| {
            let sum: f64 = (BAND_LO..BAND_HI)
                .map(|r| {
                    let p = sg_raw[[r, t]] * sg_sq[[r, t]];
                    p * p
                })
                .sum();
            sum / n_rows / ENERGY_NORM
        })
        .collect()
}

/// Locate peaks above [`MIN_PEAK_HEIGHT`] in an energy series sampled at `fs`.
///
/// A peak is a strict local maximum; its width is measured at half its
/// prominence (the findpeaks convention), with linear interpolation at the
/// crossings. Peaks are returned in time order.
pub fn find_peaks(energy: &[f64], fs: f64) -> Vec<Peak> {
    let n = energy.len();
    let mut peaks = Vec::new();
    if n < 3 {
        return peaks;
    }

    for i in 1..n - 1 {
        if !(energy[i] > energy[i - 1] && energy[i] > energy[i + 1]) {
            continue;
        }
        if energy[i] <= MIN_PEAK_HEIGHT {
            continue;
        }

        let prominence = prominence_at(energy, i);
        let reference = energy[i] - prominence / 2.0;

        let left = crossing_left(energy, i, reference);
        let right = crossing_right(energy, i, reference);

        peaks.push(Peak {
            time_s: i as f64 / fs,
            height: energy[i],
            width_s: (right - left) / fs,
        });
    }
    peaks
}

/// Score every component row in parallel.
///
/// Each row's wavelet analysis is independent, so this is a plain data-
/// parallel map; workers read one row and produce one report.
pub fn score_components(components: &Array2<f64>, fs: f64, time_bandwidth: f64) -> Vec<Vec<Peak>> {
    let bank = FilterBank::new(fs, time_bandwidth);
    (0..components.nrows())
        .into_par_iter()
        .map(|i| {
            let row = components.row(i).to_vec();
            let energy = artefact_energy(&row, &bank);
            let peaks = find_peaks(&energy, fs);
            if !peaks.is_empty() {
                log::debug!("component {i}: {} artefact peak(s)", peaks.len());
            }
            peaks
        })
        .collect()
}

/// Topographic prominence of the local maximum at `i`: height above the
/// higher of the two minima separating it from taller terrain (or the
/// signal edge) on each side.
fn prominence_at(energy: &[f64], i: usize) -> f64 {
    let peak = energy[i];

    let mut left_min = peak;
    for j in (0..i).rev() {
        if energy[j] > peak {
            break;
        }
        left_min = left_min.min(energy[j]);
    }

    let mut right_min = peak;
    for &e in &energy[i + 1..] {
        if e > peak {
            break;
        }
        right_min = right_min.min(e);
    }

    peak - left_min.max(right_min)
}

/// Fractional sample index where the series crosses `level` left of `i`.
fn crossing_left(energy: &[f64], i: usize, level: f64) -> f64 {
    for j in (0..i).rev() {
        if energy[j] < level {
            // Interpolate between j and j+1.
            let span = energy[j + 1] - energy[j];
            let frac = if span.abs() > f64::EPSILON {
                (level - energy[j]) / span
            } else {
                0.0
            };
            return j as f64 + frac;
        }
    }
    0.0
}

/// Fractional sample index where the series crosses `level` right of `i`.
fn crossing_right(energy: &[f64], i: usize, level: f64) -> f64 {
    for j in i + 1..energy.len() {
        if energy[j] < level {
            let span = energy[j - 1] - energy[j];
            let frac = if span.abs() > f64::EPSILON {
                (energy[j - 1] - level) / span
            } else {
                0.0
            };
            return (j - 1) as f64 + frac;
        }
    }
    (energy.len() - 1) as f64
}
