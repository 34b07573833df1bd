//! NetCDF readers for bathymetry and water-column grids.
//!
//! Reads COARDS-style files: one-dimensional coordinate variables and a
//! data variable dimensioned by them. Variable names are detected from
//! the candidate lists in the parent module, so ETOPO-style bathymetry
//! and World Ocean Atlas water-column files load without configuration.
//!
//! The geographic window widens to the bracketing grid points so that
//! interpolation near the window edge still has real samples on both
//! sides.

use std::path::Path;
use std::sync::Arc;

use super::{
    GeoBounds, IngestError, BATHYMETRY_NAMES, DEPTH_NAMES, LATITUDE_NAMES, LONGITUDE_NAMES,
};
use crate::grid::{DataGrid, EdgeLimit, GridError, InterpType};
use crate::types::Axis;

/// Largest magnitude accepted as real data; beyond it a sample is
/// treated as a fill value.
const FILL_THRESHOLD: f64 = 1.0e+30;

#[inline]
fn is_valid(v: f64) -> bool {
    v.is_finite() && v.abs() < FILL_THRESHOLD
}

/// Find the first variable matching one of the candidate names.
fn find_variable<'f>(
    file: &'f netcdf::File,
    names: &[&str],
) -> Result<netcdf::Variable<'f>, IngestError> {
    for name in names {
        if let Some(var) = file.variable(name) {
            return Ok(var);
        }
    }
    Err(IngestError::MissingVariable(names.join("/")))
}

/// Half-open index window covering `[lo, hi]` on a coordinate vector,
/// widened by one bracketing point on each side.
fn index_window(values: &[f64], lo: f64, hi: f64) -> Result<(usize, usize), IngestError> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    let mut first = None;
    let mut last = None;
    for (i, &v) in values.iter().enumerate() {
        if v >= lo && v <= hi {
            if first.is_none() {
                first = Some(i);
            }
            last = Some(i);
        }
    }
    let (first, last) = match (first, last) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(IngestError::InvalidData(format!(
                "no coordinate values inside [{lo}, {hi}]"
            )))
        }
    };
    let start = first.saturating_sub(1);
    let end = (last + 2).min(values.len());
    if end - start < 2 {
        return Err(IngestError::InvalidData(format!(
            "window [{lo}, {hi}] covers fewer than two grid points"
        )));
    }
    Ok((start, end))
}

/// Read a bathymetry database into a frozen 2-D grid.
///
/// The result has `(latitude, longitude)` axes in degrees and altitude
/// samples in meters (negative below sea level), interpolated with PCHIP
/// and clamped at the edges.
pub fn read_bathymetry(path: &Path, bounds: &GeoBounds) -> Result<DataGrid<2>, IngestError> {
    let file = netcdf::open(path)?;

    let lat: Vec<f64> = find_variable(&file, LATITUDE_NAMES)?.get_values(..)?;
    let lon: Vec<f64> = find_variable(&file, LONGITUDE_NAMES)?.get_values(..)?;
    let (i0, i1) = index_window(&lat, bounds.south, bounds.north)?;
    let (j0, j1) = index_window(&lon, bounds.west, bounds.east)?;

    let height = find_variable(&file, BATHYMETRY_NAMES)?;
    let data: Vec<f64> = height.get_values((i0..i1, j0..j1))?;
    drop(file);

    log::debug!(
        "loaded bathymetry {}x{} from {}",
        i1 - i0,
        j1 - j0,
        path.display()
    );

    let lat_axis = Arc::new(Axis::from_data(lat[i0..i1].to_vec()).map_err(GridError::from)?);
    let lon_axis = Arc::new(Axis::from_data(lon[j0..j1].to_vec()).map_err(GridError::from)?);
    Ok(DataGrid::new(
        [lat_axis, lon_axis],
        data,
        [InterpType::Pchip; 2],
        [EdgeLimit::Clamp; 2],
    )?)
}

/// Read a water-column variable into a frozen 3-D grid.
///
/// The file's `(depth, latitude, longitude)` dimensions become
/// `(altitude, latitude, longitude)` axes, with altitude descending from
/// the surface. Four-dimensional variables take the time slice given by
/// `time_index` (first slice by default). Fill values are replaced by
/// the nearest valid sample above in the same water column; a column
/// with no valid samples at all is an error.
///
/// The vertical axis interpolates with PCHIP, the horizontal axes
/// linearly; all clamp at the edges.
pub fn read_profile(
    path: &Path,
    var_names: &[&str],
    bounds: &GeoBounds,
    time_index: Option<usize>,
) -> Result<DataGrid<3>, IngestError> {
    let file = netcdf::open(path)?;

    let depth: Vec<f64> = find_variable(&file, DEPTH_NAMES)?.get_values(..)?;
    let lat: Vec<f64> = find_variable(&file, LATITUDE_NAMES)?.get_values(..)?;
    let lon: Vec<f64> = find_variable(&file, LONGITUDE_NAMES)?.get_values(..)?;
    if depth.len() < 2 {
        return Err(IngestError::InvalidData(
            "water-column file has fewer than two depth levels".into(),
        ));
    }
    let nd = depth.len();
    let (i0, i1) = index_window(&lat, bounds.south, bounds.north)?;
    let (j0, j1) = index_window(&lon, bounds.west, bounds.east)?;

    let var = find_variable(&file, var_names)?;
    let rank = var.dimensions().len();
    let mut data: Vec<f64> = match rank {
        3 => var.get_values((0..nd, i0..i1, j0..j1))?,
        4 => {
            let t = time_index.unwrap_or(0);
            var.get_values((t..t + 1, 0..nd, i0..i1, j0..j1))?
        }
        _ => {
            return Err(IngestError::InvalidData(format!(
                "expected a 3-D or 4-D water-column variable, found rank {rank}"
            )))
        }
    };
    drop(file);

    // fill holes downward through each water column
    let n_lat = i1 - i0;
    let n_lon = j1 - j0;
    fill_columns(&mut data, nd, n_lat * n_lon)?;

    log::debug!(
        "loaded water column {}x{}x{} from {}",
        nd,
        n_lat,
        n_lon,
        path.display()
    );

    let alt_axis = Arc::new(
        Axis::from_data(depth.iter().map(|d| -d).collect()).map_err(GridError::from)?,
    );
    let lat_axis = Arc::new(Axis::from_data(lat[i0..i1].to_vec()).map_err(GridError::from)?);
    let lon_axis = Arc::new(Axis::from_data(lon[j0..j1].to_vec()).map_err(GridError::from)?);
    Ok(DataGrid::new(
        [alt_axis, lat_axis, lon_axis],
        data,
        [InterpType::Pchip, InterpType::Linear, InterpType::Linear],
        [EdgeLimit::Clamp; 3],
    )?)
}

/// Replace fill values with the nearest valid sample above in the same
/// column; columns that start invalid take the first valid sample below.
fn fill_columns(data: &mut [f64], n_depth: usize, n_columns: usize) -> Result<(), IngestError> {
    for col in 0..n_columns {
        let sample = |d: usize, data: &[f64]| data[d * n_columns + col];

        if !is_valid(sample(0, data)) {
            let below = (1..n_depth)
                .map(|d| sample(d, data))
                .find(|&v| is_valid(v))
                .ok_or_else(|| {
                    IngestError::InvalidData(format!("water column {col} has no valid samples"))
                })?;
            data[col] = below;
        }
        for d in 1..n_depth {
            if !is_valid(sample(d, data)) {
                data[d * n_columns + col] = data[(d - 1) * n_columns + col];
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_window_widens_to_bracketing_points() {
        let lat: Vec<f64> = (0..10).map(|i| 30.0 + i as f64).collect();
        let (a, b) = index_window(&lat, 33.5, 35.5).unwrap();
        // values 34 and 35 are inside, widened to 33..=36
        assert_eq!((a, b), (3, 7));
    }

    #[test]
    fn test_index_window_at_axis_edges() {
        let lat: Vec<f64> = (0..5).map(|i| i as f64).collect();
        let (a, b) = index_window(&lat, -10.0, 0.5).unwrap();
        assert_eq!((a, b), (0, 2));
        let (a, b) = index_window(&lat, 3.5, 99.0).unwrap();
        assert_eq!((a, b), (3, 5));
    }

    #[test]
    fn test_index_window_outside_coverage() {
        let lat: Vec<f64> = (0..5).map(|i| i as f64).collect();
        assert!(index_window(&lat, 10.0, 20.0).is_err());
    }

    #[test]
    fn test_fill_columns() {
        const FILL: f64 = 1.0e+36;
        // two columns, three depths; column 0 has a hole, column 1 starts
        // invalid
        let mut data = vec![
            1.0, FILL, // depth 0
            FILL, 5.0, // depth 1
            3.0, FILL, // depth 2
        ];
        fill_columns(&mut data, 3, 2).unwrap();
        assert_eq!(data, vec![1.0, 5.0, 1.0, 5.0, 3.0, 5.0]);
    }

    #[test]
    fn test_fill_columns_rejects_empty_column() {
        const FILL: f64 = 1.0e+36;
        let mut data = vec![FILL, FILL];
        assert!(fill_columns(&mut data, 2, 1).is_err());
    }
}
