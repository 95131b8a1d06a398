//! Remixing components back into channel space.
use ndarray::{Array1, Array2, Axis};

/// Superpose all component contributions per channel: `mixing · components`
/// plus the per-channel mean removed during centering.
///
/// With an unmodified, complete decomposition this reproduces the original
/// signal to numerical precision; after suppression each channel loses
/// exactly the zeroed components' share of the masked interval.
pub fn remix(mixing: &Array2<f64>, components: &Array2<f64>, mean: &Array1<f64>) -> Array2<f64> {
    mixing.dot(components) + &mean.view().insert_axis(Axis(1))
}
