//! Python bindings for taguchi-loss.
//!
//! This module exposes the loss function and the sum-of-squares
//! decomposition to Python using PyO3. Enable the `python` feature to use this.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::Error;
use crate::loss::{LossCurve, LossParameters, SamplingPolicy};
use crate::sums::{compute_sums_of_squares_for, SumsOfSquares};

fn to_py_err(err: Error) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Python wrapper for SumsOfSquares
#[pyclass(name = "SumsOfSquares")]
#[derive(Clone)]
pub struct PySumsOfSquares {
    /// Total sum of squares
    #[pyo3(get)]
    pub sst: f64,
    /// Error sum of squares
    #[pyo3(get)]
    pub sse: f64,
    /// Mean sum of squares
    #[pyo3(get)]
    pub ssm: f64,
    /// SSm divisor
    #[pyo3(get)]
    pub n: usize,
}

impl From<SumsOfSquares> for PySumsOfSquares {
    fn from(ss: SumsOfSquares) -> Self {
        Self {
            sst: ss.sst,
            sse: ss.sse,
            ssm: ss.ssm,
            n: ss.n,
        }
    }
}

#[pymethods]
impl PySumsOfSquares {
    fn __repr__(&self) -> String {
        format!(
            "SumsOfSquares(sst={}, sse={}, ssm={}, n={})",
            self.sst, self.sse, self.ssm, self.n
        )
    }
}

/// Quality loss at an observed value.
#[pyfunction]
fn compute_loss(target: f64, spec_limit: f64, cost_at_limit: f64, x: f64) -> PyResult<f64> {
    crate::loss::compute_loss(target, spec_limit, cost_at_limit, x).map_err(to_py_err)
}

/// Loss curve as a list of (x, loss) tuples.
///
/// Pass `step` for absolute-step sampling, otherwise `samples` points are used.
#[pyfunction]
#[pyo3(signature = (target, spec_limit, cost_at_limit, samples=50, step=None))]
fn loss_curve(
    target: f64,
    spec_limit: f64,
    cost_at_limit: f64,
    samples: usize,
    step: Option<f64>,
) -> PyResult<Vec<(f64, f64)>> {
    let params = LossParameters::try_new(target, spec_limit, cost_at_limit).map_err(to_py_err)?;
    let policy = step.map_or(SamplingPolicy::FixedCount(samples), SamplingPolicy::FixedStep);
    let curve = LossCurve::sample(&params, policy).map_err(to_py_err)?;
    Ok(curve.points())
}

/// Sum-of-squares decomposition for "nominal", "smaller" or "larger".
#[pyfunction]
#[pyo3(signature = (kind, data, target=None))]
fn sums_of_squares(kind: &str, data: Vec<f64>, target: Option<f64>) -> PyResult<PySumsOfSquares> {
    compute_sums_of_squares_for(kind, &data, target)
        .map(PySumsOfSquares::from)
        .map_err(to_py_err)
}

/// The taguchi_loss Python module.
#[pymodule]
fn taguchi_loss(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_class::<PySumsOfSquares>()?;
    m.add_function(wrap_pyfunction!(compute_loss, m)?)?;
    m.add_function(wrap_pyfunction!(loss_curve, m)?)?;
    m.add_function(wrap_pyfunction!(sums_of_squares, m)?)?;
    Ok(())
}
