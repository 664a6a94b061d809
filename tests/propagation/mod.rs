extern crate pretty_env_logger as pel;

use std::f64::consts::PI;

use twoline::io::XPDOTP;
use twoline::propagation::sgp4_step;
use twoline::time::{Epoch, Unit};
use twoline::{Elements, GravityModel, OpsMode, TleError};

use crate::{ISS_LINE1, ISS_LINE2};

fn iss() -> Elements {
    Elements::from_tle(ISS_LINE1, ISS_LINE2, GravityModel::Wgs72, OpsMode::Improved).unwrap()
}

/// Solves Kepler's equation for the eccentric anomaly, used here to state the
/// epoch radius independently of the propagator.
fn eccentric_anomaly(mean_anomaly: f64, ecc: f64) -> f64 {
    let mut ea = mean_anomaly;
    for _ in 0..20 {
        ea -= (ea - ecc * ea.sin() - mean_anomaly) / (1.0 - ecc * ea.cos());
    }
    ea
}

#[test]
fn radius_at_epoch_matches_the_two_body_identity() {
    let _ = pel::try_init();
    let iss = iss();
    let (r, _) = iss.propagate(iss.epoch).unwrap();

    // |r| = a (1 - e cos E) at the element-set epoch
    let ea = eccentric_anomaly(iss.mo, iss.ecco);
    let expected_km = iss.a * (1.0 - iss.ecco * ea.cos()) * 6378.135;
    let rel = (r.norm() - expected_km).abs() / expected_km;
    assert!(rel < 1e-6, "|r| = {} km, expected {expected_km} km", r.norm());
    assert!((r.norm() - 6727.266_566).abs() < 1e-3, "|r| = {}", r.norm());
}

#[test]
fn speed_at_epoch_matches_vis_viva() {
    let iss = iss();
    let (r, v) = iss.propagate(iss.epoch).unwrap();

    let mu = 398_600.8; // km^3/s^2, wgs72
    let a_km = iss.a * 6378.135;
    let expected = (mu * (2.0 / r.norm() - 1.0 / a_km)).sqrt();
    assert!(
        (v.norm() - expected).abs() < 1e-6,
        "|v| = {} km/s, expected {expected} km/s",
        v.norm()
    );
    assert!((v.norm() - 7.699_614_335).abs() < 1e-6, "|v| = {}", v.norm());
}

#[test]
fn orbital_plane_keeps_its_inclination() {
    let iss = iss();
    for tsince in [0.0, 30.0, 90.0, 720.0] {
        let (r, v) = sgp4_step(&iss, tsince).unwrap();
        let h = r.cross(&v);
        let inc = (h.z / h.norm()).acos();
        assert!(
            (inc - iss.inclo).abs() < 1e-9,
            "inclination drifted to {} rad at {tsince} min",
            inc
        );
        // Secular-only rates keep a near-circular LEO radius bounded
        assert!(r.norm() > 6_710.0 && r.norm() < 6_750.0, "|r| = {}", r.norm());
    }
}

#[test]
fn node_regresses_for_a_prograde_orbit() {
    let iss = iss();
    let k = iss.sgp4_constants().unwrap();
    assert!(k.nodedot < 0.0);
    // Roughly -5 deg/day for the ISS
    let deg_per_day = k.nodedot.to_degrees() * 1440.0;
    assert!((-5.5..-4.5).contains(&deg_per_day), "{deg_per_day} deg/day");
}

#[test]
fn facade_and_step_agree() {
    let iss = iss();
    let (r1, v1) = iss.propagate(iss.epoch + Unit::Minute * 60.0).unwrap();
    let (r2, v2) = sgp4_step(&iss, 60.0).unwrap();
    assert!((r1 - r2).norm() < 1e-2, "{}", (r1 - r2).norm());
    assert!((v1 - v2).norm() < 1e-5, "{}", (v1 - v2).norm());
}

#[test]
fn operation_modes_agree_on_modern_epochs() {
    let improved = iss();
    let afspc =
        Elements::from_tle(ISS_LINE1, ISS_LINE2, GravityModel::Wgs72, OpsMode::Afspc).unwrap();
    let g1 = improved.sgp4_constants().unwrap().gsto;
    let g2 = afspc.sgp4_constants().unwrap().gsto;
    assert!((g1 - g2).abs() < 1e-8, "gsto split: {}", (g1 - g2).abs());
}

#[test]
fn decayed_orbit_errors_at_the_step() {
    let _ = pel::try_init();
    // Perigee below the surface: nominal at apogee, decayed half a
    // revolution later
    let epoch = Epoch::from_gregorian_utc_at_midnight(2024, 1, 1);
    let decaying = Elements::new(
        GravityModel::Wgs72,
        OpsMode::Improved,
        90003,
        epoch,
        0.0,
        0.9,
        0.0,
        0.05,
        0.0,
        PI,
        16.8 / XPDOTP,
        0.0,
        0.0,
        'U',
        "24999C",
        1,
        1,
    );
    assert_eq!(decaying.error, 0);
    assert!(sgp4_step(&decaying, 0.0).is_ok());

    let err = sgp4_step(&decaying, 42.85).unwrap_err();
    assert!(matches!(err, TleError::Sgp4 { code: 6, .. }), "{err}");
    // The entity itself stays untouched and propagable elsewhere
    assert_eq!(decaying.error, 0);
    assert!(sgp4_step(&decaying, 1.0).is_ok());
}
