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

use crate::time::Epoch;

use serde::{Deserialize, Deserializer, Serializer};
use std::f64::consts::TAU;
use std::str::FromStr;

// Re-Export the line checksum unit
mod checksum;
pub use self::checksum::*;

// Re-Export the column map
pub mod columns;

// Re-Export the implied-exponent codec
pub mod exponent;

mod parser;
pub use self::parser::parse_tle;

mod formatter;
pub use self::formatter::format_tle;

/// Revolutions per day in one radian per minute.
pub const XPDOTP: f64 = 1440.0 / TAU;

/// Two-digit epoch years below this cutoff belong to the 2000s, the rest to
/// the 1900s. A historical convention with a fixed horizon: it holds from
/// Sputnik 1 (1957) until 2057, when the catalogs will need four-digit years.
pub const TWO_DIGIT_YEAR_CUTOFF: u32 = 57;

pub(crate) fn epoch_to_str<S>(epoch: &Epoch, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{epoch}"))
}

/// A deserializer from Epoch string
pub(crate) fn epoch_from_str<'de, D>(deserializer: D) -> Result<Epoch, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Epoch::from_str(&s).map_err(serde::de::Error::custom)
}
