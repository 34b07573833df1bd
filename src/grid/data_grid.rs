//! Generic N-dimensional gridded field with recursive interpolation.
//!
//! A `DataGrid<R>` owns `R` shared axes and a flat sample tensor stored
//! row-major with axis 0 slowest. Interpolation recurses across the
//! dimensions, blending one axis at a time; that keeps the code rank
//! independent and makes it the correctness reference that the fast 2-D
//! wrapper is tested against.
//!
//! Sound speed needs gradients as well as values, so every interpolation
//! can return the analytic gradient of the interpolating polynomial. The
//! PCHIP mode is cubic Hermite with centered finite-difference slopes,
//! one-sided at the axis edges, with the nonuniform-spacing scale factor
//! `h(i) = (Δ[i-1] + Δ[i+1]) / Δ[i]` (2 at the edges) so that it matches
//! the precomputed derivative tables of the fast path interval for
//! interval.

use std::sync::Arc;

use super::GridError;
use crate::types::Axis;

/// Interpolation kind applied along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InterpType {
    /// Piecewise constant: snap to the nearest sample.
    Nearest,
    /// Piecewise linear blend of the bracketing samples.
    #[default]
    Linear,
    /// Piecewise cubic Hermite with finite-difference slopes.
    Pchip,
}

/// Out-of-domain policy applied along one axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeLimit {
    /// Project queries outside the axis onto its nearest endpoint.
    #[default]
    Clamp,
    /// Evaluate the interpolating polynomial beyond the axis.
    Extrapolate,
}

/// Apply one axis' edge policy to a query coordinate.
///
/// Returns the (possibly clamped) coordinate and the interval index to
/// interpolate in. "Left" and "right" are taken through the axis direction
/// sign so descending axes clamp correctly.
pub(crate) fn locate(ax: &Axis, edge: EdgeLimit, x: f64) -> (f64, usize) {
    match edge {
        EdgeLimit::Extrapolate => (x, ax.find_index(x)),
        EdgeLimit::Clamp => {
            let n = ax.size();
            let s = ax.sign();
            let a = ax.value(0);
            let b = ax.value(n - 2);
            if s * x <= s * a {
                (a, 0)
            } else if s * x >= s * b {
                // inside the last interval, or beyond the axis end
                let end = ax.value(n - 1);
                let x = if s * x >= s * end { end } else { x };
                (x, n - 2)
            } else {
                (x, ax.find_index(x))
            }
        }
    }
}

/// Nonuniform centered-difference scale factor at grid point `i`.
///
/// Interior points use `(Δ[i-1] + Δ[i+1]) / Δ[i]`; the one-sided edge
/// stencils divide by 2. Dividing the raw sample difference by this factor
/// yields the Hermite slope in the unit-interval coordinate.
pub(crate) fn stencil_scale(ax: &Axis, i: usize) -> f64 {
    let n = ax.size();
    if i == 0 || i == n - 1 {
        2.0
    } else {
        (ax.increment(i - 1) + ax.increment(i + 1)) / ax.increment(i)
    }
}

/// Cubic Hermite basis on the unit interval.
#[inline]
fn hermite(u: f64) -> (f64, f64, f64, f64) {
    let u2 = u * u;
    let u3 = u2 * u;
    (
        2.0 * u3 - 3.0 * u2 + 1.0, // h00
        u3 - 2.0 * u2 + u,         // h10
        -2.0 * u3 + 3.0 * u2,      // h01
        u3 - u2,                   // h11
    )
}

/// Derivative of the cubic Hermite basis on the unit interval.
#[inline]
fn hermite_deriv(u: f64) -> (f64, f64, f64, f64) {
    let u2 = u * u;
    (
        6.0 * u2 - 6.0 * u,        // h00'
        3.0 * u2 - 4.0 * u + 1.0,  // h10'
        -6.0 * u2 + 6.0 * u,       // h01'
        3.0 * u2 - 2.0 * u,        // h11'
    )
}

/// An immutable N-dimensional gridded field.
///
/// Built once by a loader, then frozen: the axes and the sample buffer are
/// behind `Arc`, there are no mutating operations, and the grid itself is
/// normally published as `Arc<DataGrid<R>>` so that any number of
/// propagation workers can query it without coordination.
#[derive(Clone, Debug)]
pub struct DataGrid<const R: usize> {
    axes: [Arc<Axis>; R],
    data: Arc<[f64]>,
    interp_type: [InterpType; R],
    edge_limit: [EdgeLimit; R],
}

impl<const R: usize> DataGrid<R> {
    /// Assemble a grid from its axes and a row-major sample buffer.
    ///
    /// Axis 0 is the slowest: `data[(i0 * n1 + i1) * n2 + i2 ...]`. Every
    /// axis must carry at least two samples and the buffer length must
    /// equal the product of the axis sizes.
    pub fn new(
        axes: [Arc<Axis>; R],
        data: Vec<f64>,
        interp_type: [InterpType; R],
        edge_limit: [EdgeLimit; R],
    ) -> Result<Self, GridError> {
        let mut expected = 1usize;
        for (dim, ax) in axes.iter().enumerate() {
            if ax.size() < 2 {
                return Err(GridError::AxisTooShort {
                    axis: dim,
                    size: ax.size(),
                });
            }
            expected *= ax.size();
        }
        if data.len() != expected {
            return Err(GridError::DataSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            axes,
            data: data.into(),
            interp_type,
            edge_limit,
        })
    }

    /// Axis of dimension `dim`.
    #[inline]
    pub fn axis(&self, dim: usize) -> &Axis {
        &self.axes[dim]
    }

    /// Shared handle to the axis of dimension `dim`.
    #[inline]
    pub fn axis_arc(&self, dim: usize) -> Arc<Axis> {
        Arc::clone(&self.axes[dim])
    }

    /// Interpolation kind along dimension `dim`.
    #[inline]
    pub fn interp_type(&self, dim: usize) -> InterpType {
        self.interp_type[dim]
    }

    /// Edge policy along dimension `dim`.
    #[inline]
    pub fn edge_limit(&self, dim: usize) -> EdgeLimit {
        self.edge_limit[dim]
    }

    /// The flat row-major sample buffer.
    #[inline]
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Sample value at a multidimensional index.
    #[inline]
    pub fn value(&self, idx: &[usize; R]) -> f64 {
        let mut offset = 0usize;
        for dim in 0..R {
            debug_assert!(idx[dim] < self.axes[dim].size());
            offset = offset * self.axes[dim].size() + idx[dim];
        }
        self.data[offset]
    }

    /// Interpolate the field at `location`, optionally returning the
    /// gradient of the interpolating polynomial along each axis.
    ///
    /// Out-of-domain coordinates clamp or extrapolate per axis policy;
    /// the query itself never fails.
    pub fn interpolate(&self, location: &[f64; R], derivative: Option<&mut [f64; R]>) -> f64 {
        let mut loc = *location;
        let mut offsets = [0usize; R];
        for dim in 0..R {
            let (x, k) = locate(&self.axes[dim], self.edge_limit[dim], loc[dim]);
            loc[dim] = x;
            offsets[dim] = k;
        }
        let mut idx = [0usize; R];
        let mut grad = [0.0; R];
        let value = self.interp_dim(0, &mut idx, &offsets, &loc, &mut grad);
        if let Some(out) = derivative {
            *out = grad;
        }
        value
    }

    /// Recursive interpolation along dimension `dim`.
    ///
    /// Blends samples along axis `dim`, obtaining each operand from the
    /// recursion over the remaining dimensions. `grad[dim..]` is filled
    /// with the gradient of the blend.
    fn interp_dim(
        &self,
        dim: usize,
        idx: &mut [usize; R],
        offsets: &[usize; R],
        loc: &[f64; R],
        grad: &mut [f64; R],
    ) -> f64 {
        if dim == R {
            return self.value(idx);
        }
        let ax = &self.axes[dim];
        let k = offsets[dim];

        match self.interp_type[dim] {
            InterpType::Nearest => {
                let u = (loc[dim] - ax.value(k)) / ax.increment(k);
                idx[dim] = if u < 0.5 { k } else { k + 1 };
                let v = self.interp_dim(dim + 1, idx, offsets, loc, grad);
                grad[dim] = 0.0;
                v
            }
            InterpType::Linear => {
                let x0 = ax.value(k);
                let x1 = ax.value(k + 1);
                let mut g0 = [0.0; R];
                let mut g1 = [0.0; R];
                idx[dim] = k;
                let v0 = self.interp_dim(dim + 1, idx, offsets, loc, &mut g0);
                idx[dim] = k + 1;
                let v1 = self.interp_dim(dim + 1, idx, offsets, loc, &mut g1);
                let t = (loc[dim] - x0) / (x1 - x0);
                grad[dim] = (v1 - v0) / (x1 - x0);
                for d in dim + 1..R {
                    grad[d] = (1.0 - t) * g0[d] + t * g1[d];
                }
                v0 + t * (v1 - v0)
            }
            InterpType::Pchip => {
                let n = ax.size();
                // 4-point stencil around interval k, indices clamped to the axis
                let mut vs = [0.0; 4];
                let mut gs = [[0.0; R]; 4];
                for (m, step) in (-1i64..=2).enumerate() {
                    let j = (k as i64 + step).clamp(0, (n - 1) as i64) as usize;
                    idx[dim] = j;
                    vs[m] = self.interp_dim(dim + 1, idx, offsets, loc, &mut gs[m]);
                }
                let u = (loc[dim] - ax.value(k)) / ax.increment(k);
                let (h00, h10, h01, h11) = hermite(u);
                let (d00, d10, d01, d11) = hermite_deriv(u);
                let alpha = 1.0 / stencil_scale(ax, k);
                let beta = 1.0 / stencil_scale(ax, k + 1);
                // fold the finite-difference slopes into per-sample weights
                let w = [
                    -h10 * alpha,
                    h00 - h11 * beta,
                    h01 + h10 * alpha,
                    h11 * beta,
                ];
                let wd = [
                    -d10 * alpha,
                    d00 - d11 * beta,
                    d01 + d10 * alpha,
                    d11 * beta,
                ];
                let mut v = 0.0;
                let mut dv = 0.0;
                for m in 0..4 {
                    v += w[m] * vs[m];
                    dv += wd[m] * vs[m];
                }
                grad[dim] = dv / ax.increment(k);
                for d in dim + 1..R {
                    let mut g = 0.0;
                    for m in 0..4 {
                        g += w[m] * gs[m][d];
                    }
                    grad[d] = g;
                }
                v
            }
        }
    }
}
