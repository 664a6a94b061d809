/*
    twoline, blazing fast TLE handling
    Copyright (C) 2023 Christopher Rabotin <christopher.rabotin@gmail.com>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU Affero General Public License for more details.

    You should have received a copy of the GNU Affero General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Mean-element propagation in the canonical units of the TLE catalogs
//! (Earth radii and minutes).
//!
//! [sgp4_init] validates the mean elements and precomputes the per-entity J2
//! secular rates; [sgp4_step] advances the secular angles, solves Kepler's
//! equation, and forms the inertial (TEME) position and velocity. The
//! constants returned by initialization are immutable, so a single entity may
//! be stepped concurrently from multiple threads.

use crate::cosmic::{Elements, GravityModel};
use crate::errors::Sgp4Snafu;
use crate::linalg::Vector3;
use crate::TleError;

use serde_derive::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Julian date of the SGP4 reference epoch, 1950 January 0.0 (that is,
/// 1949 December 31 at 0h UT).
pub const SGP4_EPOCH_JD: f64 = 2_433_281.5;

/// Maximum Newton iterations when solving Kepler's equation.
const KEPLER_MAX_ITER: usize = 10;
/// Convergence tolerance on the eccentric anomaly, in radians.
const KEPLER_TOL: f64 = 1e-12;

/// AFSPC-compatible or improved operation mode (affects the sidereal time at
/// epoch, kept for compatibility with legacy verification runs).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpsMode {
    Afspc,
    #[default]
    Improved,
}

/// Per-entity constants computed once at initialization.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sgp4Constants {
    /// Secular rate of the mean anomaly, in rad/min
    pub mdot: f64,
    /// Secular rate of the argument of perigee, in rad/min
    pub argpdot: f64,
    /// Secular rate of the right ascension of the ascending node, in rad/min
    pub nodedot: f64,
    /// Greenwich sidereal time at epoch, in radians
    pub gsto: f64,
}

/// Human-readable reason for a propagation error code.
pub(crate) fn error_reason(code: u8) -> &'static str {
    match code {
        1 => "mean eccentricity is outside the range 0 <= e < 1",
        2 => "mean motion is not positive",
        6 => "satellite has decayed",
        _ => "propagator is not initialized",
    }
}

/// Validates the mean elements and computes the J2 secular rates of the mean
/// anomaly, argument of perigee, and node.
///
/// `epoch` is the element-set epoch in days since 1950 January 0.0, used for
/// the sidereal time at epoch. On failure the error code is returned for the
/// caller to store; nothing is raised.
#[allow(clippy::too_many_arguments)]
pub fn sgp4_init(
    gravity: GravityModel,
    mode: OpsMode,
    satnum: u32,
    epoch: f64,
    bstar: f64,
    ecco: f64,
    argpo: f64,
    inclo: f64,
    mo: f64,
    no_kozai: f64,
    nodeo: f64,
) -> Result<Sgp4Constants, u8> {
    debug!(
        "sgp4_init satnum={satnum} ecc={ecco} incl={inclo} node={nodeo} argp={argpo} mo={mo} \
         no={no_kozai} bstar={bstar:e}"
    );

    if no_kozai <= 0.0 {
        return Err(2);
    }
    if !(0.0..1.0).contains(&ecco) {
        return Err(1);
    }

    let g = gravity.constants();
    let a = (no_kozai * g.tumin).powf(-2.0 / 3.0);

    let cosio = inclo.cos();
    let cosio2 = cosio * cosio;
    let cosio4 = cosio2 * cosio2;
    let eccsq = ecco * ecco;
    let omeosq = 1.0 - eccsq;
    let rteosq = omeosq.sqrt();
    let po = a * omeosq;
    let pinvsq = 1.0 / (po * po);
    let con42 = 1.0 - 5.0 * cosio2;
    let con41 = -con42 - cosio2 - cosio2;

    let temp1 = 1.5 * g.j2 * pinvsq * no_kozai;
    let temp2 = 0.5 * temp1 * g.j2 * pinvsq;
    let temp3 = -0.46875 * g.j4 * pinvsq * pinvsq * no_kozai;
    let mdot = no_kozai
        + 0.5 * temp1 * rteosq * con41
        + 0.0625 * temp2 * rteosq * (13.0 - 78.0 * cosio2 + 137.0 * cosio4);
    let argpdot = -0.5 * temp1 * con42
        + 0.0625 * temp2 * (7.0 - 114.0 * cosio2 + 395.0 * cosio4)
        + temp3 * (3.0 - 36.0 * cosio2 + 49.0 * cosio4);
    let xhdot1 = -temp1 * cosio;
    let nodedot =
        xhdot1 + (0.5 * temp2 * (4.0 - 19.0 * cosio2) + 2.0 * temp3 * (3.0 - 7.0 * cosio2)) * cosio;

    let gsto = match mode {
        // The AFSPC formulation counts from 1970 with its own FK5 fit.
        OpsMode::Afspc => {
            let ts70 = epoch - 7305.0;
            let ds70 = (ts70 + 1.0e-8).floor();
            let tfrac = ts70 - ds70;
            let c1 = 1.720_279_169_407_036_39e-2;
            let thgr70 = 1.732_134_385_650_937_4;
            let fk5r = 5.075_514_194_322_694_42e-15;
            let c1p2p = c1 + TAU;
            wrap_to_2pi(thgr70 + c1 * ds70 + c1p2p * tfrac + ts70 * ts70 * fk5r)
        }
        OpsMode::Improved => gstime(epoch + SGP4_EPOCH_JD),
    };

    Ok(Sgp4Constants {
        mdot,
        argpdot,
        nodedot,
        gsto,
    })
}

/// Advances the entity's mean elements by `tsince` minutes since epoch and
/// returns the inertial position (km) and velocity (km/s).
///
/// Purely functional with respect to the entity: a decayed state is reported
/// through the returned error, never written back.
pub fn sgp4_step(sat: &Elements, tsince: f64) -> Result<(Vector3<f64>, Vector3<f64>), TleError> {
    if sat.error != 0 {
        return Sgp4Snafu {
            code: sat.error,
            reason: error_reason(sat.error),
        }
        .fail();
    }
    let Some(k) = sat.sgp4_constants() else {
        return Sgp4Snafu {
            code: 0u8,
            reason: error_reason(0),
        }
        .fail();
    };
    let g = sat.gravity.constants();

    // Secular updates, in rad and rad/min
    let mm = wrap_to_2pi(sat.mo + k.mdot * tsince);
    let argpm = sat.argpo + k.argpdot * tsince;
    let nodem = wrap_to_2pi(sat.nodeo + k.nodedot * tsince);
    let am = sat.a;
    let em = sat.ecco;
    let omeosq = 1.0 - em * em;

    // Kepler's equation by Newton iteration
    let mut eccanom = mm;
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (eccanom - em * eccanom.sin() - mm) / (1.0 - em * eccanom.cos());
        eccanom -= delta;
        if delta.abs() < KEPLER_TOL {
            break;
        }
    }
    let (sine, cose) = eccanom.sin_cos();

    let rm = am * (1.0 - em * cose);
    if rm < 1.0 {
        return Sgp4Snafu {
            code: 6u8,
            reason: error_reason(6),
        }
        .fail();
    }

    // True anomaly and argument of latitude
    let sinv = omeosq.sqrt() * sine / (1.0 - em * cose);
    let cosv = (cose - em) / (1.0 - em * cose);
    let u = argpm + sinv.atan2(cosv);

    let (sinu, cosu) = u.sin_cos();
    let (sini, cosi) = sat.inclo.sin_cos();
    let (sinnode, cosnode) = nodem.sin_cos();

    // Orientation vectors of the orbital plane (TEME)
    let mx = -sinnode * cosi;
    let my = cosnode * cosi;
    let uvec = Vector3::new(
        mx * sinu + cosnode * cosu,
        my * sinu + sinnode * cosu,
        sini * sinu,
    );
    let vvec = Vector3::new(
        mx * cosu - cosnode * sinu,
        my * cosu - sinnode * sinu,
        sini * cosu,
    );

    // Radial and transverse rates in canonical units, xke folded into the
    // km/s conversion factor below
    let rdot = am.sqrt() * em * sine / rm;
    let rfdot = (am * omeosq).sqrt() / rm;

    let vkmpersec = g.radius_km * g.xke / 60.0;
    let r = uvec * (rm * g.radius_km);
    let v = (uvec * rdot + vvec * rfdot) * vkmpersec;

    trace!(
        "sgp4_step satnum={} tsince={tsince:.3} min |r|={:.3} km",
        sat.satnum,
        r.norm()
    );

    Ok((r, v))
}

/// Greenwich sidereal time, in radians, at the provided UT1 Julian date.
pub fn gstime(jdut1: f64) -> f64 {
    let tut1 = (jdut1 - 2_451_545.0) / 36_525.0;
    let mut temp = -6.2e-6 * tut1 * tut1 * tut1
        + 0.093_104 * tut1 * tut1
        + (876_600.0 * 3600.0 + 8_640_184.812_866) * tut1
        + 67_310.548_41;
    temp = (temp.to_radians() / 240.0) % TAU;
    if temp < 0.0 {
        temp += TAU;
    }
    temp
}

fn wrap_to_2pi(x: f64) -> f64 {
    let w = x % TAU;
    if w < 0.0 {
        w + TAU
    } else {
        w
    }
}
