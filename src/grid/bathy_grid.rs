//! Fast non-recursive 2-D interpolation for bathymetry grids.
//!
//! The generic grid interpolates by recursing across dimensions, which is
//! flexible but re-derives slope information on every query. Wave-front
//! propagation asks for bottom depth millions of times over the same grid,
//! so this wrapper moves all data-dependent work to construction time:
//!
//! - partial derivatives `Dx`, `Dy` and the mixed derivative `Dxy` at
//!   every grid point, from centered finite differences (one-sided at
//!   edges and corners),
//! - the constant 16×16 inverse bicubic matrix that maps the 16 Hermite
//!   conditions of a cell (corner values and derivatives) to the 16
//!   polynomial coefficients of `g(u,v) = Σ c[4i+j]·u^i·v^j`.
//!
//! A query then reduces to one 16×16 matrix-vector product and a
//! polynomial evaluation, with analytic derivatives. Nearest and linear
//! modes are evaluated with explicit closed forms.
//!
//! The wrapper shares the underlying grid immutably and holds no mutable
//! state, so it can be queried from any number of threads at once.

use std::sync::Arc;

use faer::Mat;

use super::data_grid::{locate, stencil_scale};
use super::{DataGrid, GridError, InterpType};

/// Inverse of the 1-D cubic Hermite condition matrix on the unit interval.
///
/// Maps `[p(0), p(1), p'(0), p'(1)]` to the coefficients of
/// `p(u) = c0 + c1·u + c2·u² + c3·u³`.
const HERMITE_INV: [[f64; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [-3.0, 3.0, -2.0, -1.0],
    [2.0, -2.0, 1.0, 1.0],
];

/// Position of the Hermite condition `G[a][b]` inside the 16-vector `F`.
///
/// `F` packs the cell conditions as four blocks of four: corner values,
/// then `∂x`, then `∂y`, then `∂x∂y`, each in the corner order
/// `(0,0), (0,1), (1,0), (1,1)`.
const FIELD_INDEX: [[usize; 4]; 4] = [
    [0, 1, 8, 9],
    [2, 3, 10, 11],
    [4, 5, 12, 13],
    [6, 7, 14, 15],
];

/// Build the 16×16 inverse bicubic matrix as the tensor square of the 1-D
/// Hermite inverse: `M[4i+j, F(a,b)] = K[i][a]·K[j][b]`.
fn inv_bicubic_coeff() -> Mat<f64> {
    let mut m = Mat::zeros(16, 16);
    for i in 0..4 {
        for j in 0..4 {
            for a in 0..4 {
                for b in 0..4 {
                    m[(4 * i + j, FIELD_INDEX[a][b])] += HERMITE_INV[i][a] * HERMITE_INV[j][b];
                }
            }
        }
    }
    m
}

/// Fast 2-D interpolator over an immutable bathymetry grid.
///
/// Construction precomputes three `n0×n1` derivative tables and the
/// constant inverse bicubic matrix; queries are non-recursive and O(1) in
/// the grid size. Requires both axes of the wrapped grid to carry the same
/// interpolation kind.
pub struct BathyGrid {
    grid: Arc<DataGrid<2>>,
    interp: InterpType,
    derv_x: Mat<f64>,
    derv_y: Mat<f64>,
    derv_x_y: Mat<f64>,
    inv_bicubic: Mat<f64>,
}

impl BathyGrid {
    /// Wrap a 2-D grid and precompute its interpolation tables.
    pub fn new(grid: Arc<DataGrid<2>>) -> Result<Self, GridError> {
        if grid.interp_type(0) != grid.interp_type(1) {
            return Err(GridError::MixedInterpTypes);
        }
        let interp = grid.interp_type(0);
        let n0 = grid.axis(0).size();
        let n1 = grid.axis(1).size();

        // Dimensionless centered-difference scale factors per axis point.
        let inc_x: Vec<f64> = (0..n0).map(|i| stencil_scale(grid.axis(0), i)).collect();
        let inc_y: Vec<f64> = (0..n1).map(|j| stencil_scale(grid.axis(1), j)).collect();

        // Derivative tables. Clamping the stencil indices to the grid
        // reproduces the one-sided formulas at edges and corners, where
        // the scale factor is 2.
        let mut derv_x = Mat::zeros(n0, n1);
        let mut derv_y = Mat::zeros(n0, n1);
        let mut derv_x_y = Mat::zeros(n0, n1);
        let f = |i: usize, j: usize| grid.value(&[i, j]);
        for i in 0..n0 {
            let ip = (i + 1).min(n0 - 1);
            let im = i.saturating_sub(1);
            for j in 0..n1 {
                let jp = (j + 1).min(n1 - 1);
                let jm = j.saturating_sub(1);
                derv_x[(i, j)] = (f(ip, j) - f(im, j)) / inc_x[i];
                derv_y[(i, j)] = (f(i, jp) - f(i, jm)) / inc_y[j];
                derv_x_y[(i, j)] =
                    (f(ip, jp) - f(ip, jm) - f(im, jp) + f(im, jm)) / (inc_x[i] * inc_y[j]);
            }
        }

        Ok(Self {
            grid,
            interp,
            derv_x,
            derv_y,
            derv_x_y,
            inv_bicubic: inv_bicubic_coeff(),
        })
    }

    /// The wrapped grid.
    #[inline]
    pub fn grid(&self) -> &Arc<DataGrid<2>> {
        &self.grid
    }

    /// Interpolate at a single location, optionally returning the partial
    /// derivatives along each axis.
    ///
    /// Out-of-domain coordinates clamp or extrapolate per the wrapped
    /// grid's per-axis edge policy; the query never fails and never
    /// allocates.
    pub fn interpolate(&self, location: &[f64; 2], derivative: Option<&mut [f64; 2]>) -> f64 {
        let mut loc = *location;
        let mut offset = [0usize; 2];
        for dim in 0..2 {
            let (x, k) = locate(self.grid.axis(dim), self.grid.edge_limit(dim), loc[dim]);
            loc[dim] = x;
            offset[dim] = k;
        }

        match self.interp {
            InterpType::Nearest => {
                let mut nearest = [0usize; 2];
                for dim in 0..2 {
                    let ax = self.grid.axis(dim);
                    let k = offset[dim];
                    let u = (loc[dim] - ax.value(k)) / ax.increment(k);
                    nearest[dim] = if u < 0.5 { k } else { k + 1 };
                }
                if let Some(out) = derivative {
                    *out = [0.0, 0.0];
                }
                self.grid.value(&nearest)
            }
            InterpType::Linear => {
                let (k0, k1) = (offset[0], offset[1]);
                let x = loc[0];
                let x1 = self.grid.axis(0).value(k0);
                let x2 = self.grid.axis(0).value(k0 + 1);
                let y = loc[1];
                let y1 = self.grid.axis(1).value(k1);
                let y2 = self.grid.axis(1).value(k1 + 1);
                let f11 = self.grid.value(&[k0, k1]);
                let f21 = self.grid.value(&[k0 + 1, k1]);
                let f12 = self.grid.value(&[k0, k1 + 1]);
                let f22 = self.grid.value(&[k0 + 1, k1 + 1]);
                let x_diff = x2 - x1;
                let y_diff = y2 - y1;
                let result = (f11 * (x2 - x) * (y2 - y)
                    + f21 * (x - x1) * (y2 - y)
                    + f12 * (x2 - x) * (y - y1)
                    + f22 * (x - x1) * (y - y1))
                    / (x_diff * y_diff);
                if let Some(out) = derivative {
                    out[0] = ((f21 - f11) * (y2 - y) + (f22 - f12) * (y - y1)) / (x_diff * y_diff);
                    out[1] = ((f12 - f11) * (x2 - x) + (f22 - f21) * (x - x1)) / (x_diff * y_diff);
                }
                result
            }
            InterpType::Pchip => self.fast_pchip(offset, &loc, derivative),
        }
    }

    /// Interpolate at a matrix of locations, walking row-major and
    /// invoking the scalar path per point.
    ///
    /// `dx`/`dy` must be given together; every buffer must share the shape
    /// of `x`.
    pub fn interpolate_batch(
        &self,
        x: &Mat<f64>,
        y: &Mat<f64>,
        result: &mut Mat<f64>,
        mut dx: Option<&mut Mat<f64>>,
        mut dy: Option<&mut Mat<f64>>,
    ) -> Result<(), GridError> {
        let shape = (x.nrows(), x.ncols());
        let check = |rows: usize, cols: usize| -> Result<(), GridError> {
            if (rows, cols) != shape {
                return Err(GridError::ShapeMismatch {
                    expected_rows: shape.0,
                    expected_cols: shape.1,
                    rows,
                    cols,
                });
            }
            Ok(())
        };
        check(y.nrows(), y.ncols())?;
        check(result.nrows(), result.ncols())?;
        if let Some(dx) = dx.as_deref() {
            check(dx.nrows(), dx.ncols())?;
        }
        if let Some(dy) = dy.as_deref() {
            check(dy.nrows(), dy.ncols())?;
        }

        let mut derivative = [0.0f64; 2];
        for n in 0..shape.0 {
            for m in 0..shape.1 {
                let location = [x[(n, m)], y[(n, m)]];
                match (dx.as_deref_mut(), dy.as_deref_mut()) {
                    (Some(dx), Some(dy)) => {
                        result[(n, m)] = self.interpolate(&location, Some(&mut derivative));
                        dx[(n, m)] = derivative[0];
                        dy[(n, m)] = derivative[1];
                    }
                    _ => {
                        result[(n, m)] = self.interpolate(&location, None);
                    }
                }
            }
        }
        Ok(())
    }

    /// Interpolate a slice of locations in parallel.
    #[cfg(feature = "parallel")]
    pub fn interpolate_many(&self, locations: &[[f64; 2]]) -> Vec<f64> {
        use rayon::prelude::*;
        locations
            .par_iter()
            .map(|loc| self.interpolate(loc, None))
            .collect()
    }

    /// Non-recursive bicubic Hermite evaluation in the cell at
    /// `(k0, k1)`.
    ///
    /// Assembles the 16 Hermite conditions from the corner samples and the
    /// precomputed derivative tables, maps them to polynomial coefficients
    /// through the inverse bicubic matrix, and evaluates the power series
    /// in the cell-local coordinates `u, v ∈ [0, 1]`.
    fn fast_pchip(
        &self,
        offset: [usize; 2],
        loc: &[f64; 2],
        derivative: Option<&mut [f64; 2]>,
    ) -> f64 {
        let (k0, k1) = (offset[0], offset[1]);
        let ax0 = self.grid.axis(0);
        let ax1 = self.grid.axis(1);
        let norm0 = ax0.increment(k0);
        let norm1 = ax1.increment(k1);

        // Hermite conditions: corner values, x-slopes, y-slopes, cross
        // slopes, each in corner order (0,0), (0,1), (1,0), (1,1).
        let field = [
            self.grid.value(&[k0, k1]),
            self.grid.value(&[k0, k1 + 1]),
            self.grid.value(&[k0 + 1, k1]),
            self.grid.value(&[k0 + 1, k1 + 1]),
            self.derv_x[(k0, k1)],
            self.derv_x[(k0, k1 + 1)],
            self.derv_x[(k0 + 1, k1)],
            self.derv_x[(k0 + 1, k1 + 1)],
            self.derv_y[(k0, k1)],
            self.derv_y[(k0, k1 + 1)],
            self.derv_y[(k0 + 1, k1)],
            self.derv_y[(k0 + 1, k1 + 1)],
            self.derv_x_y[(k0, k1)],
            self.derv_x_y[(k0, k1 + 1)],
            self.derv_x_y[(k0 + 1, k1)],
            self.derv_x_y[(k0 + 1, k1 + 1)],
        ];

        // c = M · F
        let mut coeff = [0.0f64; 16];
        for (r, c) in coeff.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, f) in field.iter().enumerate() {
                sum += self.inv_bicubic[(r, k)] * f;
            }
            *c = sum;
        }

        // Cell-local coordinates and their power series.
        let u = (loc[0] - ax0.value(k0)) / norm0;
        let v = (loc[1] - ax1.value(k1)) / norm1;
        let upow = [1.0, u, u * u, u * u * u];
        let vpow = [1.0, v, v * v, v * v * v];

        let mut result = 0.0;
        for i in 0..4 {
            for j in 0..4 {
                result += coeff[4 * i + j] * upow[i] * vpow[j];
            }
        }

        if let Some(out) = derivative {
            let mut du = 0.0;
            for i in 1..4 {
                for j in 0..4 {
                    du += i as f64 * coeff[4 * i + j] * upow[i - 1] * vpow[j];
                }
            }
            out[0] = du / norm0;
            let mut dv = 0.0;
            for i in 0..4 {
                for j in 1..4 {
                    dv += j as f64 * coeff[4 * i + j] * upow[i] * vpow[j - 1];
                }
            }
            out[1] = dv / norm1;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::EdgeLimit;
    use crate::types::Axis;

    const TOL: f64 = 1e-10;

    fn ramp_grid(interp: InterpType, edge: EdgeLimit) -> Arc<DataGrid<2>> {
        let ax = Arc::new(Axis::linear(0.0, 1.0, 4).unwrap());
        let mut data = Vec::with_capacity(16);
        for i in 0..4 {
            for j in 0..4 {
                data.push(10.0 * i as f64 + j as f64);
            }
        }
        Arc::new(DataGrid::new([ax.clone(), ax], data, [interp; 2], [edge; 2]).unwrap())
    }

    #[test]
    fn test_mixed_interp_types_rejected() {
        let ax = Arc::new(Axis::linear(0.0, 1.0, 3).unwrap());
        let grid = DataGrid::new(
            [ax.clone(), ax],
            vec![0.0; 9],
            [InterpType::Linear, InterpType::Pchip],
            [EdgeLimit::Clamp; 2],
        )
        .unwrap();
        assert!(matches!(
            BathyGrid::new(Arc::new(grid)),
            Err(GridError::MixedInterpTypes)
        ));
    }

    #[test]
    fn test_inverse_bicubic_known_entries() {
        let m = inv_bicubic_coeff();
        // spot checks against the closed-form bicubic Hermite solution
        assert_eq!(m[(0, 0)], 1.0);
        assert_eq!(m[(1, 8)], 1.0);
        assert_eq!(m[(2, 0)], -3.0);
        assert_eq!(m[(2, 1)], 3.0);
        assert_eq!(m[(2, 8)], -2.0);
        assert_eq!(m[(2, 9)], -1.0);
        assert_eq!(m[(10, 0)], 9.0);
        assert_eq!(m[(10, 3)], 9.0);
        assert_eq!(m[(10, 1)], -9.0);
        assert_eq!(m[(10, 12)], 4.0);
        assert_eq!(m[(10, 15)], 1.0);
        assert_eq!(m[(15, 0)], 4.0);
        assert_eq!(m[(15, 5)], -2.0);
        assert_eq!(m[(15, 15)], 1.0);
        // every row of a Hermite-consistent matrix sums over value columns
        // to the polynomial reproduction of constants: only row 0 survives
        let mut row_sums = [0.0f64; 16];
        for r in 0..16 {
            for c in 0..4 {
                row_sums[r] += m[(r, c)];
            }
        }
        assert_eq!(row_sums[0], 1.0);
        for &s in &row_sums[1..] {
            assert_eq!(s, 0.0);
        }
    }

    #[test]
    fn test_recovers_separable_cubic_coefficients() {
        // p(x) = 1 + 2x - x^2 + 0.5x^3, q(y) = 2 - y + 3y^2 - 2y^3.
        // Feeding exact Hermite conditions for f = p·q through M must
        // recover the product coefficients to machine epsilon.
        let p = [1.0, 2.0, -1.0, 0.5];
        let q = [2.0, -1.0, 3.0, -2.0];
        let eval = |c: &[f64; 4], t: f64| c[0] + c[1] * t + c[2] * t * t + c[3] * t * t * t;
        let deriv = |c: &[f64; 4], t: f64| c[1] + 2.0 * c[2] * t + 3.0 * c[3] * t * t;

        let corners = [(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (1.0, 1.0)];
        let mut field = [0.0f64; 16];
        for (m, &(x, y)) in corners.iter().enumerate() {
            field[m] = eval(&p, x) * eval(&q, y);
            field[4 + m] = deriv(&p, x) * eval(&q, y);
            field[8 + m] = eval(&p, x) * deriv(&q, y);
            field[12 + m] = deriv(&p, x) * deriv(&q, y);
        }

        let matrix = inv_bicubic_coeff();
        let mut coeff = [0.0f64; 16];
        for (r, c) in coeff.iter_mut().enumerate() {
            for (k, f) in field.iter().enumerate() {
                *c += matrix[(r, k)] * f;
            }
        }
        for i in 0..4 {
            for j in 0..4 {
                let expect = p[i] * q[j];
                assert!(
                    (coeff[4 * i + j] - expect).abs() < 1e-14,
                    "c[{i}][{j}] = {} != {expect}",
                    coeff[4 * i + j]
                );
            }
        }
    }

    #[test]
    fn test_nearest_rounds_each_axis() {
        let bathy = BathyGrid::new(ramp_grid(InterpType::Nearest, EdgeLimit::Clamp)).unwrap();
        let mut deriv = [f64::NAN; 2];
        let v = bathy.interpolate(&[1.4, 2.6], Some(&mut deriv));
        assert!((v - 13.0).abs() < TOL);
        assert_eq!(deriv, [0.0, 0.0]);
    }

    #[test]
    fn test_bilinear_blend_and_partials() {
        let bathy = BathyGrid::new(ramp_grid(InterpType::Linear, EdgeLimit::Clamp)).unwrap();
        let mut deriv = [0.0; 2];
        let v = bathy.interpolate(&[1.5, 2.5], Some(&mut deriv));
        assert!((v - 17.5).abs() < TOL);
        assert!((deriv[0] - 10.0).abs() < TOL);
        assert!((deriv[1] - 1.0).abs() < TOL);
    }

    #[test]
    fn test_pchip_reproduces_bilinear_field() {
        let bathy = BathyGrid::new(ramp_grid(InterpType::Pchip, EdgeLimit::Clamp)).unwrap();
        let v = bathy.interpolate(&[1.5, 2.5], None);
        assert!((v - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_queries_left_of_the_axis_clamp() {
        let ax = Arc::new(Axis::linear(0.0, 1.0, 3).unwrap());
        let mut data = Vec::with_capacity(9);
        for i in 0..3 {
            for j in 0..3 {
                data.push((i + j) as f64);
            }
        }
        let grid = Arc::new(
            DataGrid::new(
                [ax.clone(), ax],
                data,
                [InterpType::Linear; 2],
                [EdgeLimit::Clamp; 2],
            )
            .unwrap(),
        );
        let bathy = BathyGrid::new(grid).unwrap();
        let v = bathy.interpolate(&[-5.0, 1.0], None);
        assert!((v - 1.0).abs() < TOL);
    }

    #[test]
    fn test_sample_points_exact_in_every_mode() {
        // nonuniform axes exercise the increment-scaled derivative tables
        let ax0 = Arc::new(Axis::from_data(vec![0.0, 1.0, 2.5, 4.5, 5.0]).unwrap());
        let ax1 = Arc::new(Axis::from_data(vec![-2.0, -1.0, 0.5, 3.0]).unwrap());
        let mut data = Vec::with_capacity(20);
        for i in 0..5 {
            for j in 0..4 {
                data.push((i as f64 * 1.7).sin() + (j as f64 * 0.9).cos() * 3.0);
            }
        }
        for interp in [InterpType::Nearest, InterpType::Linear, InterpType::Pchip] {
            let grid = Arc::new(
                DataGrid::new(
                    [ax0.clone(), ax1.clone()],
                    data.clone(),
                    [interp; 2],
                    [EdgeLimit::Clamp; 2],
                )
                .unwrap(),
            );
            let bathy = BathyGrid::new(grid.clone()).unwrap();
            for i in 0..5 {
                for j in 0..4 {
                    let loc = [ax0.value(i), ax1.value(j)];
                    let v = bathy.interpolate(&loc, None);
                    let expect = grid.value(&[i, j]);
                    assert!(
                        (v - expect).abs() < TOL,
                        "{interp:?} at ({i},{j}): {v} != {expect}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_fast_path_agrees_with_generic_grid() {
        let ax0 = Arc::new(Axis::from_data(vec![0.0, 1.0, 2.5, 4.5, 5.0, 7.0]).unwrap());
        let ax1 = Arc::new(Axis::from_data(vec![-2.0, -1.0, 0.5, 3.0, 4.0]).unwrap());
        let mut data = Vec::with_capacity(30);
        for i in 0..6 {
            for j in 0..5 {
                data.push((i as f64 * 0.6).sin() * (j as f64 * 1.1 + 0.3).cos());
            }
        }
        let grid = Arc::new(
            DataGrid::new(
                [ax0, ax1],
                data,
                [InterpType::Pchip; 2],
                [EdgeLimit::Clamp; 2],
            )
            .unwrap(),
        );
        let bathy = BathyGrid::new(grid.clone()).unwrap();

        // interior probe points
        for &x in &[1.2, 2.0, 3.1, 4.6] {
            for &y in &[-1.5, -0.2, 1.0, 2.4] {
                let mut fast_deriv = [0.0; 2];
                let mut ref_deriv = [0.0; 2];
                let fast = bathy.interpolate(&[x, y], Some(&mut fast_deriv));
                let slow = grid.interpolate(&[x, y], Some(&mut ref_deriv));
                assert!(
                    (fast - slow).abs() < 1e-9,
                    "value mismatch at ({x},{y}): {fast} vs {slow}"
                );
                assert!((fast_deriv[0] - ref_deriv[0]).abs() < 1e-9);
                assert!((fast_deriv[1] - ref_deriv[1]).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_batch_matches_scalar_path() {
        let bathy = BathyGrid::new(ramp_grid(InterpType::Pchip, EdgeLimit::Clamp)).unwrap();
        let mut x = Mat::zeros(2, 3);
        let mut y = Mat::zeros(2, 3);
        for n in 0..2 {
            for m in 0..3 {
                x[(n, m)] = 0.5 + n as f64;
                y[(n, m)] = 0.3 + m as f64;
            }
        }
        let mut result = Mat::zeros(2, 3);
        let mut dx = Mat::zeros(2, 3);
        let mut dy = Mat::zeros(2, 3);
        bathy
            .interpolate_batch(&x, &y, &mut result, Some(&mut dx), Some(&mut dy))
            .unwrap();
        for n in 0..2 {
            for m in 0..3 {
                let mut deriv = [0.0; 2];
                let v = bathy.interpolate(&[x[(n, m)], y[(n, m)]], Some(&mut deriv));
                assert!((result[(n, m)] - v).abs() < TOL);
                assert!((dx[(n, m)] - deriv[0]).abs() < TOL);
                assert!((dy[(n, m)] - deriv[1]).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_batch_shape_mismatch() {
        let bathy = BathyGrid::new(ramp_grid(InterpType::Linear, EdgeLimit::Clamp)).unwrap();
        let x = Mat::zeros(2, 3);
        let y = Mat::zeros(3, 2);
        let mut result = Mat::zeros(2, 3);
        assert!(matches!(
            bathy.interpolate_batch(&x, &y, &mut result, None, None),
            Err(GridError::ShapeMismatch { .. })
        ));
    }
}
