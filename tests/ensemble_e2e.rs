//! Twist-map ensemble E2E tests.
//!
//! Each test tries to falsify one claim about the generator, the ensemble
//! driver or the figure pipeline, end to end through the public API.

use kamtwist::prelude::*;
use kamtwist::render::{project, BOUNDS_MARGIN};
use kamtwist::twist::map::{orbit_length, signed_angle, wrap_angle};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

const REFERENCE_CONFIG: &str = include_str!("../experiments/kam_twist.yaml");

/// AC-1: the shipped experiment file parses to the built-in defaults.
#[test]
fn ac1_reference_config_matches_defaults() {
    let from_file = TwistConfig::from_yaml(REFERENCE_CONFIG).expect("reference config parses");
    let defaults = TwistConfig::default();

    assert_eq!(from_file.reproducibility.seed, defaults.reproducibility.seed);
    assert_eq!(from_file.map.orbits, defaults.map.orbits);
    assert!((from_file.map.epsilon - defaults.map.epsilon).abs() < f64::EPSILON);
    assert!((from_file.map.steps_per_unit - defaults.map.steps_per_unit).abs() < f64::EPSILON);
    assert!((from_file.map.radius_offset - defaults.map.radius_offset).abs() < f64::EPSILON);
    assert_eq!(from_file.title(), defaults.title());
}

/// AC-2: every orbit has exactly floor(200 (J₀ + π/2)) points.
#[test]
fn ac2_orbit_lengths() {
    let mut rng = SimRng::new(2);
    let ensemble = run_ensemble(&MapConfig::default(), &mut rng);

    assert_eq!(ensemble.orbits.len(), 50);
    for orbit in &ensemble.orbits {
        let expected = (200.0 * (orbit.initial.action + FRAC_PI_2)).floor();
        assert!(expected >= 0.0);
        assert_eq!(orbit.len(), expected as usize);
        assert_eq!(orbit.len(), orbit_length(orbit.initial.action, 200.0));
    }
}

/// AC-3: wrapped angles stay in [0, 2π), signed angles in (-π, π].
#[test]
fn ac3_angle_ranges() {
    let ensemble = run_ensemble(&MapConfig::default(), &mut SimRng::new(2));
    for p in ensemble.orbits.iter().flat_map(|o| o.points.iter()) {
        assert!((0.0..TAU).contains(&p.angle), "angle {}", p.angle);
        assert!(
            p.signed_angle > -PI && p.signed_angle <= PI,
            "signed angle {}",
            p.signed_angle
        );
        assert_eq!(p.signed_angle, signed_angle(p.angle));
    }
}

/// AC-4: Cartesian points lie on the circle of radius J + π + 0.25.
#[test]
fn ac4_cartesian_consistency() {
    let ensemble = run_ensemble(&MapConfig::default(), &mut SimRng::new(2));
    for p in ensemble.orbits.iter().flat_map(|o| o.points.iter()) {
        let r = p.action + PI + 0.25;
        let r2 = p.x.mul_add(p.x, p.y * p.y);
        assert!((r2 - r * r).abs() < 1e-9 * (1.0 + r * r));
    }
}

/// AC-5: the reference scenario at the origin.
#[test]
fn ac5_origin_scenario() {
    let orbit = generate_orbit(0.0, 0.0, 0.3);
    assert_eq!(orbit.len(), 314);
    let first = orbit.points[0];
    assert_eq!(first.action, 0.0);
    assert_eq!(first.angle, 0.0);
    assert!((first.x - 3.3916).abs() < 1e-4);
    assert!(first.y.abs() < 1e-12);
}

/// AC-6: the bottom of the action range produces no points and no error.
#[test]
fn ac6_degenerate_initial_condition() {
    let orbit = generate_orbit(-FRAC_PI_2, 2.0, 0.3);
    assert!(orbit.is_empty());
    assert!(orbit.xs().is_empty() && orbit.ys().is_empty());
}

/// AC-7: the map preserves area (Jacobian determinant 1).
#[test]
fn ac7_area_preservation() {
    let map = StandardMap::new(0.3);
    let h = 1e-6;
    for &(j, t) in &[(0.1, 0.5), (-1.2, 2.0), (2.5, 5.9), (0.0, 3.0)] {
        let base = map.step(PhaseState::new(j, t));
        let dj = map.step(PhaseState::new(j + h, t));
        let dt = map.step(PhaseState::new(j, t + h));

        let dtheta = |a: f64, b: f64| signed_angle(wrap_angle(a - b));
        let a11 = (dj.action - base.action) / h;
        let a21 = dtheta(dj.angle, base.angle) / h;
        let a12 = (dt.action - base.action) / h;
        let a22 = dtheta(dt.angle, base.angle) / h;

        let det = a11 * a22 - a12 * a21;
        assert!((det - 1.0).abs() < 1e-4, "det = {det} at ({j}, {t})");
    }
}

/// AC-8: at ε = 0.3 rotational tori confine the action of every orbit.
#[test]
fn ac8_kam_confinement() {
    let ensemble = run_ensemble(&MapConfig::default(), &mut SimRng::new(2));
    for orbit in &ensemble.orbits {
        for p in &orbit.points {
            assert!(
                (p.action - orbit.initial.action).abs() < PI,
                "orbit from J0 = {} reached J = {}",
                orbit.initial.action,
                p.action
            );
        }
    }
}

/// AC-9: the full pipeline writes a figure with one marker per point.
#[test]
fn ac9_figure_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("kam.svg");
    let config = TwistConfig::builder().orbits(6).output(&path).build();

    let ensemble = run_ensemble(&config.map, &mut SimRng::new(config.reproducibility.seed));
    write_svg(&Figure::from_config(&config), &ensemble.orbits, &path).expect("figure written");

    let svg = std::fs::read_to_string(&path).expect("figure readable");
    let markers = svg.matches("<circle").count();
    assert_eq!(markers, ensemble.summary().total_points);
    assert!(svg.contains("KAM Twist Map for ε = 0.3"));
}

/// AC-10: the phase projection plots action against signed angle.
#[test]
fn ac10_phase_projection() {
    let config = TwistConfig::builder()
        .orbits(3)
        .projection(Projection::Phase)
        .build();
    let ensemble = run_ensemble(&config.map, &mut SimRng::new(2));
    let total = ensemble.summary().total_points;
    assert!(total > 0);

    let svg = render_svg(&Figure::from_config(&config), &ensemble.orbits).expect("rendered");
    assert_eq!(svg.matches("<circle").count(), total);

    let projected: Vec<(f64, f64)> = ensemble
        .orbits
        .iter()
        .flat_map(|o| project(o, Projection::Phase))
        .collect();
    let bounds = PlotBounds::fit(projected.iter().copied(), BOUNDS_MARGIN);
    let points = ensemble.orbits.iter().flat_map(|o| o.points.iter());
    for (&(x, y), p) in projected.iter().zip(points) {
        assert_eq!(x, p.action);
        assert_eq!(y, p.signed_angle);
        assert!(bounds.contains(x, y));
        assert!(y > -PI && y <= PI);
    }
}
