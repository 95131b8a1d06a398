//! Orientation normalisation and ingestion validation.
//!
//! The pipeline works on channels-by-samples matrices. Physiological
//! recordings always have far more time samples than electrodes, so a matrix
//! with more rows than columns is assumed to be samples-by-channels and is
//! transposed. No other repair is attempted: non-finite samples are rejected
//! outright.
use ndarray::{Array2, ArrayD, Ix2};

use crate::error::{Result, WicaError};

/// Normalise `data` to channels-by-samples orientation.
///
/// Transposes when rows > columns. Fails with [`WicaError::InvalidValue`] if
/// any sample is NaN or infinite, and with [`WicaError::InvalidShape`] if a
/// channel would end up with fewer than 2 samples.
pub fn ensure_channels_by_samples(data: Array2<f64>) -> Result<Array2<f64>> {
    if data.iter().any(|v| !v.is_finite()) {
        return Err(WicaError::InvalidValue(
            "signal contains non-finite samples".into(),
        ));
    }
    let oriented = if data.nrows() > data.ncols() {
        data.t().to_owned()
    } else {
        data
    };
    if oriented.ncols() < 2 {
        return Err(WicaError::InvalidShape(format!(
            "each channel needs at least 2 samples (got {})",
            oriented.ncols()
        )));
    }
    Ok(oriented)
}

/// Ingest a dynamic-rank array, rejecting anything that is not 2-D.
///
/// This is the entry point for callers holding `ArrayD` data of unknown
/// rank; [`ensure_channels_by_samples`] is applied after the rank check.
pub fn from_dyn(data: ArrayD<f64>) -> Result<Array2<f64>> {
    let ndim = data.ndim();
    let two: Array2<f64> = data.into_dimensionality::<Ix2>().map_err(|_| {
        WicaError::InvalidShape(format!("expected a 2-D signal matrix, got {ndim} dimensions"))
    })?;
    ensure_channels_by_samples(two)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};

    #[test]
    fn tall_matrix_is_transposed() {
        // 100 samples × 4 channels → 4 × 100.
        let data = Array2::from_shape_fn((100, 4), |(t, c)| t as f64 + c as f64);
        let out = ensure_channels_by_samples(data).unwrap();
        assert_eq!(out.dim(), (4, 100));
        assert_eq!(out[[2, 17]], 19.0);
    }

    #[test]
    fn wide_matrix_untouched() {
        let data = Array2::from_elem((4, 100), 1.5);
        let out = ensure_channels_by_samples(data).unwrap();
        assert_eq!(out.dim(), (4, 100));
    }

    #[test]
    fn square_matrix_untouched() {
        let data = Array2::from_shape_fn((5, 5), |(r, c)| (r * 5 + c) as f64);
        let out = ensure_channels_by_samples(data.clone()).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn nan_rejected() {
        let mut data = Array2::zeros((4, 100));
        data[[1, 50]] = f64::NAN;
        assert!(matches!(
            ensure_channels_by_samples(data),
            Err(WicaError::InvalidValue(_))
        ));
    }

    #[test]
    fn infinity_rejected() {
        let mut data = Array2::zeros((4, 100));
        data[[0, 0]] = f64::INFINITY;
        assert!(matches!(
            ensure_channels_by_samples(data),
            Err(WicaError::InvalidValue(_))
        ));
    }

    #[test]
    fn too_few_samples_rejected() {
        let data = Array2::zeros((1, 1));
        assert!(matches!(
            ensure_channels_by_samples(data),
            Err(WicaError::InvalidShape(_))
        ));
    }

    #[test]
    fn non_2d_rejected() {
        let cube = Array3::<f64>::zeros((2, 3, 4)).into_dyn();
        assert!(matches!(from_dyn(cube), Err(WicaError::InvalidShape(_))));

        let line = Array1::<f64>::zeros(16).into_dyn();
        assert!(matches!(from_dyn(line), Err(WicaError::InvalidShape(_))));
    }

    #[test]
    fn from_dyn_accepts_2d() {
        let data = Array2::<f64>::zeros((4, 64)).into_dyn();
        let out = from_dyn(data).unwrap();
        assert_eq!(out.dim(), (4, 64));
    }
}
