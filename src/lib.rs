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

/*! # twoline

Two-line element set (TLE) handling: a byte-exact codec for the fixed-column
catalog format, a canonical orbital-element record in SI-consistent units
(radians, radians per minute), and a mean-element propagator returning inertial
position and velocity at an arbitrary epoch.

The TLE format inherited its layout from 1960s punch cards, so every period,
space, and digit position matters. Parsing validates the punctuation template
and the mod-10 line checksums before any element is converted; formatting is
the exact left inverse of parsing, checksum included.
*/

/// The TLE codec: column maps, line checksums, the implied-exponent numeric
/// encoding, and the parser / formatter pair.
pub mod io;

/// The canonical orbital-element entity and the gravitational constant sets.
pub mod cosmic;

/// Mean-element propagation: per-entity initialization and the stepping routine.
pub mod propagation;

/// Calendar arithmetic shared by the codec and the propagation façade.
pub mod utils;

mod errors;
/// This crate will (almost) never panic and functions which may fail will return an error.
pub use self::errors::TleError;

#[macro_use]
extern crate log;
extern crate hifitime;
extern crate nalgebra as na;

/// Re-export of hifitime
pub mod time {
    pub use hifitime::*;
}

/// Re-export nalgebra
pub mod linalg {
    pub use na::base::*;
}

/// Re-export some useful things
pub use self::cosmic::{Elements, GravityModel};
pub use self::propagation::OpsMode;
