//! Fixed-point independent component analysis (FastICA, deflation).
//!
//! Separates the oriented signal into statistically independent source
//! estimates plus a mixing matrix. The contrast nonlinearity is the Gaussian
//! `g(u) = u·exp(−u²/2)`, a good fit for the spiky super-Gaussian sources
//! that transient artefacts produce.
//!
//! The algorithm is randomly initialised and a deflation pass may fail to
//! converge for individual components, so a single run can return fewer
//! sources than requested. [`FastIca::separate`] wraps the decomposition in
//! a bounded retry loop ([`MAX_ATTEMPTS`] total) and keeps the last attempt
//! when the budget runs out; under-convergence is reported, never fatal.
//!
//! Sources follow the FastICA unit-variance convention: each row of
//! [`Decomposition::sources`] has variance ≈ 1 and the signal scale lives in
//! the mixing matrix. With a full-rank input and a complete decomposition,
//! `mixing · sources + mean` reproduces the input to numerical precision.
use nalgebra::DMatrix;
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Total decomposition attempts before giving up on an exact component count.
pub const MAX_ATTEMPTS: usize = 21;

/// Relative eigenvalue floor below which a covariance dimension is treated
/// as rank-deficient and excluded from whitening.
const EIG_FLOOR: f64 = 1e-12;

/// Result of one blind source separation run.
#[derive(Debug, Clone)]
pub struct Decomposition {
    /// Independent components, `[K, T]`, unit variance, no canonical order.
    pub sources: Array2<f64>,
    /// Mixing matrix, `[C, K]`: `signal ≈ mixing · sources + mean`.
    pub mixing: Array2<f64>,
    /// Per-channel mean removed before whitening, `[C]`.
    pub mean: Array1<f64>,
    /// Decomposition attempts consumed (1 ⇒ first try converged).
    pub attempts: usize,
}

impl Decomposition {
    /// True when the run recovered the requested component count.
    pub fn is_complete(&self, want: usize) -> bool {
        self.sources.nrows() == want
    }
}

/// FastICA separator with deflation-mode component extraction.
#[derive(Debug, Clone)]
pub struct FastIca {
    max_iter: usize,
    tol: f64,
}

impl Default for FastIca {
    fn default() -> Self {
        Self {
            max_iter: 200,
            tol: 1e-4,
        }
    }
}

impl FastIca {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum fixed-point iterations per component.
    pub fn max_iter(mut self, n: usize) -> Self {
        self.max_iter = n;
        self
    }

    /// Convergence tolerance on the direction update, `|1 − |⟨w', w⟩||`.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Decompose `data` (`[C, T]`) into `n_components` sources, retrying on
    /// under-convergence.
    ///
    /// Prior attempts are discarded; the loop exits as soon as an attempt
    /// yields exactly `n_components` rows or the budget of [`MAX_ATTEMPTS`]
    /// is spent, in which case the *last* attempt is returned as-is and a
    /// warning is logged. Callers must therefore not assume
    /// `sources.nrows() == n_components`.
    pub fn separate(
        &self,
        data: &Array2<f64>,
        n_components: usize,
        seed: Option<u64>,
    ) -> Decomposition {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        let mut attempts = 1;
        let mut last = self.decompose_once(data, n_components, &mut rng);
        while !last.is_complete(n_components) && attempts < MAX_ATTEMPTS {
            attempts += 1;
            last = self.decompose_once(data, n_components, &mut rng);
        }
        last.attempts = attempts;

        if !last.is_complete(n_components) {
            log::warn!(
                "ICA recovered {} of {} components after {} attempts; proceeding best-effort",
                last.sources.nrows(),
                n_components,
                attempts
            );
        } else {
            log::debug!(
                "ICA converged to {} components in {} attempt(s)",
                n_components,
                attempts
            );
        }
        last
    }

    /// One centering → whitening → deflation pass.
    fn decompose_once(
        &self,
        data: &Array2<f64>,
        n_components: usize,
        rng: &mut StdRng,
    ) -> Decomposition {
        let (n_ch, n_t) = data.dim();

        // Center.
        let mean = data
            .mean_axis(Axis(1))
            .unwrap_or_else(|| Array1::zeros(n_ch));
        let centered = data - &mean.view().insert_axis(Axis(1));

        // Whiten via eigendecomposition of the channel covariance.
        let cov = centered.dot(&centered.t()) / n_t as f64;
        let (white, color) = whitening_pair(&cov, n_components);
        let n_dim = white.nrows();
        if n_dim == 0 {
            return Decomposition {
                sources: Array2::zeros((0, n_t)),
                mixing: Array2::zeros((n_ch, 0)),
                mean,
                attempts: 0,
            };
        }
        let z = white.dot(&centered); // [n_dim, T], identity covariance

        // Deflation: extract one orthogonal direction at a time. A direction
        // whose fixed-point iteration exhausts max_iter is dropped, which is
        // how a run ends up short of n_components.
        let mut rows: Vec<Array1<f64>> = Vec::with_capacity(n_dim);
        for _ in 0..n_dim.min(n_components) {
            if let Some(w) = self.extract_one(&z, &rows, rng) {
                rows.push(w);
            }
        }

        let n_found = rows.len();
        let mut w = Array2::zeros((n_found, n_dim));
        for (i, row) in rows.iter().enumerate() {
            w.row_mut(i).assign(row);
        }

        // sources = W·z (unit variance); mixing = color·Wᵀ, the exact right
        // inverse of the total unmixing map W·white when the run is complete.
        let sources = w.dot(&z);
        let mixing = color.dot(&w.t());

        Decomposition {
            sources,
            mixing,
            mean,
            attempts: 0,
        }
    }

    /// Fixed-point iteration for a single unmixing direction, kept
    /// orthogonal to the directions already found.
    fn extract_one(
        &self,
        z: &Array2<f64>,
        found: &[Array1<f64>],
        rng: &mut StdRng,
    ) -> Option<Array1<f64>> {
        let (n_dim, n_t) = z.dim();

        let mut w = Array1::from_shape_fn(n_dim, |_| rng.gen::<f64>() - 0.5);
        orthogonalize(&mut w, found);
        if !normalize(&mut w) {
            return None;
        }

        for _ in 0..self.max_iter {
            let y = w.dot(z); // projected signal, [T]

            // Gaussian contrast: g(u) = u·exp(−u²/2), g'(u) = (1−u²)·exp(−u²/2).
            let g = y.mapv(|u| u * (-0.5 * u * u).exp());
            let g_prime_mean = y
                .iter()
                .map(|&u| (1.0 - u * u) * (-0.5 * u * u).exp())
                .sum::<f64>()
                / n_t as f64;

            let mut w_new = z.dot(&g) / n_t as f64;
            w_new.zip_mut_with(&w, |a, &b| *a -= g_prime_mean * b);

            orthogonalize(&mut w_new, found);
            if !normalize(&mut w_new) {
                return None;
            }

            let cos = w_new.dot(&w).abs();
            w = w_new;
            if (1.0 - cos).abs() < self.tol {
                return Some(w);
            }
        }
        None
    }
}

/// Build the whitening matrix `D^{-1/2}·Eᵀ` (`[k, C]`) and its coloring
/// counterpart `E·D^{1/2}` (`[C, k]`) from a channel covariance, keeping at
/// most `n_components` dimensions above the rank floor.
fn whitening_pair(cov: &Array2<f64>, n_components: usize) -> (Array2<f64>, Array2<f64>) {
    let n_ch = cov.nrows();
    let m = DMatrix::from_fn(n_ch, n_ch, |i, j| cov[[i, j]]);
    let eig = m.symmetric_eigen();

    let mut order: Vec<usize> = (0..n_ch).collect();
    order.sort_by(|&a, &b| {
        eig.eigenvalues[b]
            .partial_cmp(&eig.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let lambda_max = eig.eigenvalues[order[0]].max(0.0);
    let kept: Vec<usize> = order
        .into_iter()
        .filter(|&i| eig.eigenvalues[i] > EIG_FLOOR * lambda_max && eig.eigenvalues[i] > 0.0)
        .take(n_components)
        .collect();

    let k = kept.len();
    let mut white = Array2::zeros((k, n_ch));
    let mut color = Array2::zeros((n_ch, k));
    for (r, &ei) in kept.iter().enumerate() {
        let s = eig.eigenvalues[ei].sqrt();
        for j in 0..n_ch {
            let v = eig.eigenvectors[(j, ei)];
            white[[r, j]] = v / s;
            color[[j, r]] = v * s;
        }
    }
    (white, color)
}

/// Project out every direction in `found` from `w` (Gram–Schmidt step).
fn orthogonalize(w: &mut Array1<f64>, found: &[Array1<f64>]) {
    for f in found {
        let proj = w.dot(f);
        w.zip_mut_with(f, |a, &b| *a -= proj * b);
    }
}

/// Scale `w` to unit norm; false when the vector has collapsed.
fn normalize(w: &mut Array1<f64>) -> bool {
    let norm = w.dot(&*w).sqrt();
    if norm < 1e-12 {
        return false;
    }
    w.mapv_inplace(|v| v / norm);
    true
}
