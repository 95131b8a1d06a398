//! Error taxonomy for the cleaning pipeline.
//!
//! Boundary violations (shape, values, parameters) are raised before any
//! computation starts. Separator under-convergence is non-fatal by default;
//! [`WicaError::Convergence`] is only returned when the caller opted into
//! strict mode via [`crate::CleanConfig::strict_convergence`].
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WicaError {
    /// Input is not a two-dimensional channels-by-samples matrix.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Input contains NaN or infinite samples.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A configuration value is outside its accepted domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The source separator exhausted its retry budget without recovering
    /// the requested number of components.
    #[error("ICA under-converged: recovered {got} of {want} components after {attempts} attempts")]
    Convergence {
        want: usize,
        got: usize,
        attempts: usize,
    },

    /// The comparison visualizer was asked to lay out more channels than
    /// its fixed grid can host.
    #[error("layout capacity exceeded: {channels} channels > {capacity} grid slots")]
    LayoutCapacity { channels: usize, capacity: usize },
}

pub type Result<T> = std::result::Result<T, WicaError>;
