//! Integration tests for the gridded-field core.
//!
//! These tests verify:
//! - Sample-point exactness of the fast 2-D interpolator in every mode
//! - Agreement between the fast path and the generic reference path
//! - Edge-policy laws (clamp idempotence, linearity of the linear mode)
//! - Purity of interpolation under concurrent access

use std::sync::Arc;
use std::thread;

use uwa_rs::{Axis, BathyGrid, DataGrid, EdgeLimit, InterpType};

const TOL: f64 = 1e-10;

/// Nonuniform 2-D grid with a smooth, non-polynomial field.
fn wavy_grid(interp: InterpType, edge: EdgeLimit) -> Arc<DataGrid<2>> {
    let ax0 = Arc::new(Axis::from_data(vec![0.0, 0.7, 1.5, 2.6, 4.0, 5.0]).unwrap());
    let ax1 = Arc::new(Axis::from_data(vec![-3.0, -1.8, -1.0, 0.4, 2.0]).unwrap());
    let mut data = Vec::with_capacity(30);
    for i in 0..6 {
        for j in 0..5 {
            let x = ax0.value(i);
            let y = ax1.value(j);
            data.push((0.8 * x).sin() * (0.5 * y + 0.2).cos() + 0.1 * x * y);
        }
    }
    Arc::new(DataGrid::new([ax0, ax1], data, [interp; 2], [edge; 2]).unwrap())
}

#[test]
fn test_find_index_always_names_an_interval() {
    let axes = [
        Axis::linear(-10.0, 0.25, 200).unwrap(),
        Axis::log(12.5, 1.26, 40).unwrap(),
        Axis::from_data((0..50).map(|i| (i as f64).powf(1.3)).collect()).unwrap(),
    ];
    for ax in &axes {
        for step in -500..500 {
            let x = step as f64 * 3.7;
            assert!(ax.find_index(x) <= ax.size() - 2);
        }
    }
}

#[test]
fn test_fast_grid_hits_every_sample_in_every_mode() {
    for interp in [InterpType::Nearest, InterpType::Linear, InterpType::Pchip] {
        let grid = wavy_grid(interp, EdgeLimit::Clamp);
        let fast = BathyGrid::new(grid.clone()).unwrap();
        for i in 0..grid.axis(0).size() {
            for j in 0..grid.axis(1).size() {
                let loc = [grid.axis(0).value(i), grid.axis(1).value(j)];
                let v = fast.interpolate(&loc, None);
                assert!(
                    (v - grid.value(&[i, j])).abs() < TOL,
                    "{interp:?} missed sample ({i},{j})"
                );
            }
        }
    }
}

#[test]
fn test_fast_and_generic_paths_agree_under_pchip() {
    let grid = wavy_grid(InterpType::Pchip, EdgeLimit::Clamp);
    let fast = BathyGrid::new(grid.clone()).unwrap();
    for ix in 0..40 {
        for iy in 0..40 {
            let x = 0.1 + ix as f64 * 0.12;
            let y = -2.8 + iy as f64 * 0.115;
            let mut df = [0.0; 2];
            let mut dg = [0.0; 2];
            let vf = fast.interpolate(&[x, y], Some(&mut df));
            let vg = grid.interpolate(&[x, y], Some(&mut dg));
            assert!((vf - vg).abs() < 1e-9, "value at ({x},{y}): {vf} vs {vg}");
            assert!((df[0] - dg[0]).abs() < 1e-9);
            assert!((df[1] - dg[1]).abs() < 1e-9);
        }
    }
}

#[test]
fn test_clamp_idempotence_law() {
    let grid = wavy_grid(InterpType::Pchip, EdgeLimit::Clamp);
    let fast = BathyGrid::new(grid).unwrap();
    let clamp = |v: f64, lo: f64, hi: f64| v.max(lo).min(hi);
    for &(x, y) in &[
        (-100.0, 0.0),
        (100.0, 0.0),
        (2.0, -50.0),
        (2.0, 50.0),
        (-7.0, 9.0),
    ] {
        let raw = fast.interpolate(&[x, y], None);
        let clamped = fast.interpolate(&[clamp(x, 0.0, 5.0), clamp(y, -3.0, 2.0)], None);
        assert!(
            (raw - clamped).abs() < TOL,
            "clamp not idempotent at ({x},{y})"
        );
    }
}

#[test]
fn test_linear_mode_is_linear_in_the_samples() {
    let ax = Arc::new(Axis::linear(0.0, 1.0, 5).unwrap());
    let f: Vec<f64> = (0..25).map(|i| (i as f64 * 0.37).sin()).collect();
    let g: Vec<f64> = (0..25).map(|i| (i as f64 * 0.61).cos()).collect();
    let (alpha, beta) = (1.75, -0.4);
    let combined: Vec<f64> = f
        .iter()
        .zip(g.iter())
        .map(|(a, b)| alpha * a + beta * b)
        .collect();

    let build = |data: Vec<f64>| {
        BathyGrid::new(Arc::new(
            DataGrid::new(
                [ax.clone(), ax.clone()],
                data,
                [InterpType::Linear; 2],
                [EdgeLimit::Clamp; 2],
            )
            .unwrap(),
        ))
        .unwrap()
    };
    let grid_f = build(f);
    let grid_g = build(g);
    let grid_c = build(combined);

    for &(x, y) in &[(0.5, 0.5), (1.3, 2.7), (3.9, 0.1), (2.2, 3.8)] {
        let lhs = grid_c.interpolate(&[x, y], None);
        let rhs =
            alpha * grid_f.interpolate(&[x, y], None) + beta * grid_g.interpolate(&[x, y], None);
        assert!((lhs - rhs).abs() < TOL, "linearity broken at ({x},{y})");
    }
}

#[test]
fn test_interpolation_is_pure_across_threads() {
    let grid = wavy_grid(InterpType::Pchip, EdgeLimit::Clamp);
    let fast = Arc::new(BathyGrid::new(grid).unwrap());

    let probes: Vec<[f64; 2]> = (0..200)
        .map(|i| [0.05 * (i % 50) as f64, -2.9 + 0.06 * (i / 2) as f64])
        .collect();

    let baseline: Vec<u64> = probes
        .iter()
        .map(|p| fast.interpolate(p, None).to_bits())
        .collect();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let fast = Arc::clone(&fast);
        let probes = probes.clone();
        handles.push(thread::spawn(move || {
            probes
                .iter()
                .map(|p| fast.interpolate(p, None).to_bits())
                .collect::<Vec<u64>>()
        }));
    }
    for handle in handles {
        let result = handle.join().expect("worker thread panicked");
        assert_eq!(result, baseline, "interpolation not bit-identical");
    }
}

#[test]
fn test_extrapolation_beyond_the_axes() {
    // a globally planar field extrapolates exactly in linear mode
    let ax = Arc::new(Axis::linear(0.0, 2.0, 4).unwrap());
    let mut data = Vec::with_capacity(16);
    for i in 0..4 {
        for j in 0..4 {
            data.push(3.0 * (2.0 * i as f64) - 1.5 * (2.0 * j as f64) + 7.0);
        }
    }
    let grid = Arc::new(
        DataGrid::new(
            [ax.clone(), ax],
            data,
            [InterpType::Linear; 2],
            [EdgeLimit::Extrapolate; 2],
        )
        .unwrap(),
    );
    let fast = BathyGrid::new(grid).unwrap();
    for &(x, y) in &[(-2.0, 1.0), (8.0, 3.0), (1.0, -4.0), (9.0, 9.0)] {
        let v = fast.interpolate(&[x, y], None);
        assert!((v - (3.0 * x - 1.5 * y + 7.0)).abs() < 1e-9);
    }
}
