//! Monotonic axis sequences for gridded fields.
//!
//! Every dimension of a gridded ocean field is described by a strictly
//! monotonic, read-only sequence of coordinate values. Interpolation needs
//! one operation to be fast above all others: given a floating point
//! coordinate, find the grid interval that contains it. The three axis
//! forms trade generality for lookup cost:
//!
//! - [`Axis::linear`]: evenly spaced values, `find_index` by inversion in O(1)
//! - [`Axis::log`]: geometrically spaced values (frequency bands), O(1)
//! - [`Axis::from_data`]: arbitrary sorted values, O(log n) binary search
//!
//! Axes may ascend or descend; all interval logic works through the
//! direction sign `s = sign(a[1] - a[0])` so that "left of the axis" means
//! `s·x < s·a[0]` regardless of direction.

use thiserror::Error;

/// Error raised when an axis description is not a valid monotonic sequence.
///
/// Raised at construction only; a constructed [`Axis`] is immutable and
/// every query on it is total.
#[derive(Debug, Error)]
pub enum AxisError {
    /// Explicit values are not strictly monotonic
    #[error("axis values must be strictly monotonic (violated at index {index})")]
    NonMonotonic {
        /// Index of the first offending interval
        index: usize,
    },

    /// A multi-point linear axis needs a nonzero increment
    #[error("linear axis increment must be nonzero for size {size}")]
    ZeroIncrement {
        /// Requested axis size
        size: usize,
    },

    /// A log axis needs a nonzero first value and a positive ratio != 1
    #[error("log axis requires first != 0 and ratio > 0, ratio != 1 (first = {first}, ratio = {ratio})")]
    BadRatio {
        /// Requested first value
        first: f64,
        /// Requested ratio
        ratio: f64,
    },

    /// Axes must contain at least one value
    #[error("axis must contain at least one value")]
    Empty,
}

/// A strictly monotonic, immutable coordinate sequence.
///
/// The variant fixes how values are generated and how `find_index`
/// inverts them; the query contract is identical across variants.
#[derive(Clone, Debug)]
pub enum Axis {
    /// Evenly spaced: `a[i] = first + i * increment`.
    Linear {
        /// First value of the sequence
        first: f64,
        /// Spacing between adjacent values (may be negative)
        increment: f64,
        /// Number of values
        size: usize,
    },
    /// Geometrically spaced: `a[i] = first * ratio^i`.
    Log {
        /// First value of the sequence (nonzero)
        first: f64,
        /// Ratio between adjacent values (positive, != 1)
        ratio: f64,
        /// Number of values
        size: usize,
    },
    /// Arbitrary strictly monotonic values.
    Data {
        /// The sorted coordinate values
        values: Vec<f64>,
    },
}

impl Axis {
    /// Create an evenly spaced axis from its first value and increment.
    pub fn linear(first: f64, increment: f64, size: usize) -> Result<Self, AxisError> {
        if size == 0 {
            return Err(AxisError::Empty);
        }
        if size > 1 && (increment == 0.0 || !increment.is_finite()) {
            return Err(AxisError::ZeroIncrement { size });
        }
        Ok(Axis::Linear {
            first,
            increment,
            size,
        })
    }

    /// Create an evenly spaced axis spanning `[first, last]` with `size` points.
    pub fn spanning(first: f64, last: f64, size: usize) -> Result<Self, AxisError> {
        if size == 0 {
            return Err(AxisError::Empty);
        }
        if size == 1 {
            return Axis::linear(first, 0.0, 1);
        }
        Axis::linear(first, (last - first) / (size - 1) as f64, size)
    }

    /// Create a geometrically spaced axis: `a[i] = first * ratio^i`.
    ///
    /// The natural form for frequency bands, e.g. third-octave steps with
    /// `ratio = 2f64.powf(1.0 / 3.0)`.
    pub fn log(first: f64, ratio: f64, size: usize) -> Result<Self, AxisError> {
        if size == 0 {
            return Err(AxisError::Empty);
        }
        if size > 1 && (first == 0.0 || ratio <= 0.0 || ratio == 1.0 || !ratio.is_finite()) {
            return Err(AxisError::BadRatio { first, ratio });
        }
        Ok(Axis::Log { first, ratio, size })
    }

    /// Create an axis from explicit, strictly monotonic values.
    pub fn from_data(values: Vec<f64>) -> Result<Self, AxisError> {
        if values.is_empty() {
            return Err(AxisError::Empty);
        }
        if values.len() > 1 {
            let sign = (values[1] - values[0]).signum();
            for i in 0..values.len() - 1 {
                let delta = values[i + 1] - values[i];
                if delta == 0.0 || delta.signum() != sign || !delta.is_finite() {
                    return Err(AxisError::NonMonotonic { index: i });
                }
            }
        }
        Ok(Axis::Data { values })
    }

    /// Number of values in the sequence.
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            Axis::Linear { size, .. } | Axis::Log { size, .. } => *size,
            Axis::Data { values } => values.len(),
        }
    }

    /// Value at index `i`.
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        debug_assert!(i < self.size());
        match self {
            Axis::Linear {
                first, increment, ..
            } => first + i as f64 * increment,
            Axis::Log { first, ratio, .. } => first * ratio.powi(i as i32),
            Axis::Data { values } => values[i],
        }
    }

    /// First value of the sequence.
    #[inline]
    pub fn first(&self) -> f64 {
        self.value(0)
    }

    /// Last value of the sequence.
    #[inline]
    pub fn last(&self) -> f64 {
        self.value(self.size() - 1)
    }

    /// Direction sign: `+1.0` for ascending, `-1.0` for descending.
    ///
    /// Single-value axes report `+1.0`.
    #[inline]
    pub fn sign(&self) -> f64 {
        if self.size() < 2 {
            return 1.0;
        }
        (self.value(1) - self.value(0)).signum()
    }

    /// Local increment `Δ[i] = a[i+1] - a[i]`.
    ///
    /// Defined for `i` in `[0, n-1]`; at the right edge this returns
    /// `Δ[n-2]` so that derivative scaling never reads past the axis.
    /// Single-value axes report `0.0`.
    #[inline]
    pub fn increment(&self, i: usize) -> f64 {
        let n = self.size();
        if n < 2 {
            return 0.0;
        }
        let i = i.min(n - 2);
        match self {
            Axis::Linear { increment, .. } => *increment,
            Axis::Log { first, ratio, .. } => first * ratio.powi(i as i32) * (ratio - 1.0),
            Axis::Data { values } => values[i + 1] - values[i],
        }
    }

    /// Largest interval index `i` with `s·a[i] <= s·x`, clamped to `[0, n-2]`.
    ///
    /// The result always names a valid interpolation interval
    /// `[a[i], a[i+1]]`: queries left of the axis return `0`, queries right
    /// of it return `n-2`, for every finite `x` and either axis direction.
    pub fn find_index(&self, x: f64) -> usize {
        let n = self.size();
        let top = n.saturating_sub(2);
        match self {
            Axis::Linear {
                first, increment, ..
            } => {
                if n < 2 {
                    return 0;
                }
                let i = ((x - first) / increment).floor();
                if i <= 0.0 {
                    0
                } else {
                    (i as usize).min(top)
                }
            }
            Axis::Log { first, ratio, .. } => {
                if n < 2 {
                    return 0;
                }
                let q = x / first;
                if q <= 0.0 {
                    return if *ratio > 1.0 { 0 } else { top };
                }
                let i = (q.ln() / ratio.ln()).floor();
                if i <= 0.0 {
                    0
                } else {
                    (i as usize).min(top)
                }
            }
            Axis::Data { values } => {
                if n < 2 {
                    return 0;
                }
                let idx = if self.sign() > 0.0 {
                    values.partition_point(|v| *v <= x)
                } else {
                    values.partition_point(|v| *v >= x)
                };
                idx.saturating_sub(1).min(top)
            }
        }
    }

    /// Iterate over the sequence values.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.size()).map(move |i| self.value(i))
    }

    /// Collect the sequence into a vector.
    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
