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

use serde_derive::{Deserialize, Serialize};

/// The standard sets of gravitational constants used with TLE mean elements.
///
/// `Wgs72` is what the element sets distributed by the major catalogs are fit
/// against, so it is the default; `Wgs84` is the more recent model, and
/// `Wgs72Old` exists for backward compatibility with the original code.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GravityModel {
    Wgs72Old,
    #[default]
    Wgs72,
    Wgs84,
}

/// Earth constants of a gravity model, in the canonical units of mean-element
/// propagation (distances in Earth radii, time in minutes).
#[derive(Copy, Clone, Debug)]
pub struct GravityConstants {
    /// Minutes in one "time unit", i.e. the inverse of `xke`
    pub tumin: f64,
    /// Earth gravitational parameter, in km^3/s^2
    pub mu_km3_s2: f64,
    /// Earth equatorial radius, in km
    pub radius_km: f64,
    /// sqrt(mu) in Earth radii^1.5 per minute
    pub xke: f64,
    /// Second zonal harmonic
    pub j2: f64,
    /// Third zonal harmonic
    pub j3: f64,
    /// Fourth zonal harmonic
    pub j4: f64,
    /// Ratio j3 / j2
    pub j3oj2: f64,
}

impl GravityModel {
    /// Returns the constants of this gravity model.
    pub fn constants(self) -> GravityConstants {
        let (mu_km3_s2, radius_km, xke, j2, j3, j4) = match self {
            // The old WGS-72 set hard-codes xke rather than deriving it.
            Self::Wgs72Old => (
                398_600.79964,
                6378.135,
                0.074_366_916_1,
                0.001_082_616,
                -0.000_002_538_81,
                -0.000_001_655_97,
            ),
            Self::Wgs72 => {
                let mu = 398_600.8;
                let radius: f64 = 6378.135;
                (
                    mu,
                    radius,
                    60.0 / (radius.powi(3) / mu).sqrt(),
                    0.001_082_616,
                    -0.000_002_538_81,
                    -0.000_001_655_97,
                )
            }
            Self::Wgs84 => {
                let mu = 398_600.5;
                let radius: f64 = 6378.137;
                (
                    mu,
                    radius,
                    60.0 / (radius.powi(3) / mu).sqrt(),
                    0.001_082_629_989_05,
                    -0.000_002_532_153_06,
                    -0.000_001_610_987_61,
                )
            }
        };

        GravityConstants {
            tumin: 1.0 / xke,
            mu_km3_s2,
            radius_km,
            xke,
            j2,
            j3,
            j4,
            j3oj2: j3 / j2,
        }
    }

    /// Minutes in one canonical time unit of this model.
    pub fn tumin(self) -> f64 {
        self.constants().tumin
    }
}
