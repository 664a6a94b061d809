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

use crate::cosmic::GravityModel;
use crate::io::{epoch_from_str, epoch_to_str};
use crate::linalg::Vector3;
use crate::propagation::{sgp4_init, sgp4_step, OpsMode, Sgp4Constants, SGP4_EPOCH_JD};
use crate::time::Epoch;
use crate::utils::{day_of_year, jday};
use crate::TleError;

use approx::abs_diff_eq;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

pub(crate) const MINUTES_PER_DAY: f64 = 1440.0;

/// An Earth-orbiting object as represented by a two-line element set: the
/// canonical record every TLE decodes into and encodes from.
///
/// All angular elements are stored in radians and the mean motion in radians
/// per minute; raw TLE units (degrees, revolutions per day, implied decimal
/// points) never leak past the parser. The derived geometry (`a`, `alta`,
/// `altp`) and the epoch-derived fields (`jdsatepoch`, `epochyr`,
/// `epochdays`) are computed once at construction and are consistent with the
/// stored timestamp by construction.
///
/// The entity is immutable once built, so a shared reference may be
/// propagated from multiple threads concurrently.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Elements {
    /// Satellite catalog number, 0 through 99 999
    pub satnum: u32,
    /// Security classification (U, C, or S)
    pub classification: char,
    /// International designator: launch year, launch number, piece
    pub intldesg: String,
    /// Ephemeris type column, preserved verbatim for round-tripping
    pub ephtype: char,
    /// Element set number
    pub elnum: u32,
    /// Revolution number at epoch
    pub revnum: u32,
    /// Epoch of the element set
    #[serde(serialize_with = "epoch_to_str", deserialize_with = "epoch_from_str")]
    pub epoch: Epoch,
    /// Four-digit epoch year
    pub epochyr: i32,
    /// Fractional day of the epoch year (January 1 is day 1)
    pub epochdays: f64,
    /// Julian date of the epoch
    pub jdsatepoch: f64,
    /// First time derivative of the mean motion, in rad/min^2 (ignored by the
    /// propagator but preserved for round-tripping)
    pub ndot: f64,
    /// Second time derivative of the mean motion, in rad/min^3 (idem)
    pub nddot: f64,
    /// Drag term B*, in inverse Earth radii
    pub bstar: f64,
    /// Inclination, in radians
    pub inclo: f64,
    /// Right ascension of the ascending node, in radians
    pub nodeo: f64,
    /// Eccentricity
    pub ecco: f64,
    /// Argument of perigee, in radians
    pub argpo: f64,
    /// Mean anomaly, in radians
    pub mo: f64,
    /// Mean motion (Kozai convention), in rad/min
    pub no_kozai: f64,
    /// Semi-major axis, in Earth radii
    pub a: f64,
    /// Apogee altitude, in Earth radii above the surface
    pub alta: f64,
    /// Perigee altitude, in Earth radii above the surface
    pub altp: f64,
    /// Propagator status: zero when nominal, cf. [crate::TleError::Sgp4]
    pub error: u8,
    /// Gravity model the derived fields were computed against
    pub gravity: GravityModel,
    /// Operation mode passed to the propagator
    pub mode: OpsMode,
    #[serde(skip)]
    sgp4: Option<Sgp4Constants>,
}

impl Elements {
    /// Builds the canonical record from already-converted elements (angles in
    /// radians, mean motion in rad/min) and initializes the propagator.
    ///
    /// An initialization failure is recorded in the `error` status field
    /// rather than raised, so the record can still be inspected;
    /// [Self::propagate] refuses to run until the status is nominal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        gravity: GravityModel,
        mode: OpsMode,
        satnum: u32,
        epoch: Epoch,
        bstar: f64,
        inclo: f64,
        nodeo: f64,
        ecco: f64,
        argpo: f64,
        mo: f64,
        no_kozai: f64,
        ndot: f64,
        nddot: f64,
        classification: char,
        intldesg: &str,
        elnum: u32,
        revnum: u32,
    ) -> Self {
        debug_assert!(satnum <= 99_999, "catalog numbers hold five digits");

        let (year, month, day, hour, minute, second, nanos) = epoch.to_gregorian_utc();
        let seconds = f64::from(second) + f64::from(nanos) * 1e-9;

        let jdsatepoch = jday(year, month, day, hour, minute, seconds);
        let epochdays = f64::from(day_of_year(year, month, day))
            + (f64::from(hour) + f64::from(minute) / 60.0 + seconds / 3600.0) / 24.0;

        let a = (no_kozai * gravity.tumin()).powf(-2.0 / 3.0);
        let alta = a * (1.0 + ecco) - 1.0;
        let altp = a * (1.0 - ecco) - 1.0;

        let (sgp4, error) = match sgp4_init(
            gravity,
            mode,
            satnum,
            jdsatepoch - SGP4_EPOCH_JD,
            bstar,
            ecco,
            argpo,
            inclo,
            mo,
            no_kozai,
            nodeo,
        ) {
            Ok(k) => (Some(k), 0),
            Err(code) => {
                warn!("object {satnum}: propagator initialization failed with code {code}");
                (None, code)
            }
        };

        Self {
            satnum,
            classification,
            intldesg: intldesg.to_string(),
            ephtype: '0',
            elnum,
            revnum,
            epoch,
            epochyr: year,
            epochdays,
            jdsatepoch,
            ndot,
            nddot,
            bstar,
            inclo,
            nodeo,
            ecco,
            argpo,
            mo,
            no_kozai,
            a,
            alta,
            altp,
            error,
            gravity,
            mode,
            sgp4,
        }
    }

    /// Builds the record from the two lines of a TLE, verifying checksums and
    /// the punctuation template first.
    pub fn from_tle(
        line1: &str,
        line2: &str,
        gravity: GravityModel,
        mode: OpsMode,
    ) -> Result<Self, TleError> {
        crate::io::parse_tle(line1, line2, gravity, mode)
    }

    /// Renders the record back into the two 69-character TLE lines, checksum
    /// digits included. This is the exact left inverse of [Self::from_tle].
    pub fn to_tle(&self) -> (String, String) {
        crate::io::format_tle(self)
    }

    /// Computes the inertial (TEME) position in km and velocity in km/s at
    /// the requested epoch by delegating to [crate::propagation::sgp4_step]
    /// with the elapsed minutes since the element-set epoch.
    pub fn propagate(&self, target: Epoch) -> Result<(Vector3<f64>, Vector3<f64>), TleError> {
        let (year, month, day, hour, minute, second, nanos) = target.to_gregorian_utc();
        let jd = jday(
            year,
            month,
            day,
            hour,
            minute,
            f64::from(second) + f64::from(nanos) * 1e-9,
        );
        let tsince = (jd - self.jdsatepoch) * MINUTES_PER_DAY;
        sgp4_step(self, tsince)
    }

    /// Per-entity constants computed at initialization, or `None` if
    /// initialization failed (or the record was deserialized).
    pub fn sgp4_constants(&self) -> Option<Sgp4Constants> {
        self.sgp4
    }
}

impl fmt::Display for Elements {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "object {:05}{} [{}] @ {}\te = {:.7}\ti = {:.4} deg\tn = {:.8} rev/day",
            self.satnum,
            self.classification,
            self.intldesg,
            self.epoch,
            self.ecco,
            self.inclo.to_degrees(),
            self.no_kozai * MINUTES_PER_DAY / std::f64::consts::TAU,
        )
    }
}

/// Panics unless the canonical element values of both records match to within
/// `epsilon` in absolute difference.
pub fn assert_elements_abs_eq(left: &Elements, right: &Elements, epsilon: f64, msg: &str) {
    assert_eq!(left.satnum, right.satnum, "satnum differs: {msg}");
    assert_eq!(left.epochyr, right.epochyr, "epochyr differs: {msg}");
    for (name, lhs, rhs) in [
        ("epochdays", left.epochdays, right.epochdays),
        ("jdsatepoch", left.jdsatepoch, right.jdsatepoch),
        ("ndot", left.ndot, right.ndot),
        ("nddot", left.nddot, right.nddot),
        ("bstar", left.bstar, right.bstar),
        ("inclo", left.inclo, right.inclo),
        ("nodeo", left.nodeo, right.nodeo),
        ("ecco", left.ecco, right.ecco),
        ("argpo", left.argpo, right.argpo),
        ("mo", left.mo, right.mo),
        ("no_kozai", left.no_kozai, right.no_kozai),
        ("a", left.a, right.a),
    ] {
        if !abs_diff_eq!(lhs, rhs, epsilon = epsilon) {
            panic!(
                r#"assertion failed: `(left == right)`
 field: `{}`
  left: `{:?}`,
 right: `{:?}`: {}"#,
                name, lhs, rhs, msg
            )
        }
    }
}
