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

use super::checksum::verify_checksum;
use super::columns::{line1, line2, Span};
use super::{TWO_DIGIT_YEAR_CUTOFF, XPDOTP};
use crate::cosmic::{Elements, GravityModel};
use crate::errors::{FormatSnafu, SatnumMismatchSnafu};
use crate::propagation::OpsMode;
use crate::time::Epoch;
use crate::utils::days2mdhms;
use crate::TleError;

use snafu::OptionExt;

/// Raw fields of line 1 in catalog units, before any conversion.
struct RawLine1 {
    satnum: u32,
    classification: char,
    intldesg: String,
    two_digit_year: u32,
    epochdays: f64,
    ndot: f64,
    nddot: f64,
    bstar: f64,
    ephtype: char,
    elnum: u32,
}

/// Raw fields of line 2 in catalog units (degrees, revolutions per day).
struct RawLine2 {
    satnum: u32,
    inclo: f64,
    nodeo: f64,
    ecco: f64,
    argpo: f64,
    mo: f64,
    no_kozai: f64,
    revnum: u32,
}

/// Converts the two lines of a TLE into a canonical [Elements] record.
///
/// The line checksums are verified first (when the checksum column holds a
/// digit), then each line is matched against the punctuation template it
/// inherited from its punch-card days. Nothing is partially parsed: any
/// mismatch rejects the pair before an entity is built.
pub fn parse_tle(
    line1: &str,
    line2: &str,
    gravity: GravityModel,
    mode: OpsMode,
) -> Result<Elements, TleError> {
    let line1 = line1.trim_end();
    let line2 = line2.trim_end();
    verify_checksum(&[line1, line2])?;

    let raw1 = parse_line1(line1)?;
    let raw2 = parse_line2(line2)?;
    if raw1.satnum != raw2.satnum {
        return SatnumMismatchSnafu {
            line1: raw1.satnum,
            line2: raw2.satnum,
        }
        .fail();
    }

    // Catalog units to rad/min and rad: mean motion and its derivatives first,
    // then the angles
    let no_kozai = raw2.no_kozai / XPDOTP;
    let ndot = raw1.ndot / (XPDOTP * 1440.0);
    let nddot = raw1.nddot / (XPDOTP * 1440.0 * 1440.0);
    let inclo = raw2.inclo.to_radians();
    let nodeo = raw2.nodeo.to_radians();
    let argpo = raw2.argpo.to_radians();
    let mo = raw2.mo.to_radians();

    // Two-digit years cover 1957 (Sputnik 1) through 2056.
    let year = if raw1.two_digit_year < TWO_DIGIT_YEAR_CUTOFF {
        2000 + raw1.two_digit_year as i32
    } else {
        1900 + raw1.two_digit_year as i32
    };
    let epoch = epoch_from_year_and_days(year, raw1.epochdays).ok_or_else(|| {
        FormatSnafu {
            line: 1u8,
            template: line1::TEMPLATE,
            text: line1.to_string(),
        }
        .build()
    })?;

    debug!(
        "parsed TLE for object {} ({}), epoch {}",
        raw1.satnum, raw1.intldesg, epoch
    );

    let mut elements = Elements::new(
        gravity,
        mode,
        raw1.satnum,
        epoch,
        raw1.bstar,
        inclo,
        nodeo,
        raw2.ecco,
        argpo,
        mo,
        no_kozai,
        ndot,
        nddot,
        raw1.classification,
        &raw1.intldesg,
        raw1.elnum,
        raw2.revnum,
    );
    elements.ephtype = raw1.ephtype;
    Ok(elements)
}

fn parse_line1(line: &str) -> Result<RawLine1, TleError> {
    validate_template(line, 1, line1::MIN_LEN, line1::BLANKS, line1::PERIODS)?;

    // A blank classification column reads as unclassified.
    let classification = match char_field(line, line1::CLASSIFICATION) {
        ' ' => 'U',
        c => c,
    };

    Ok(RawLine1 {
        satnum: int_field(line, line1::SATNUM, 1)?,
        classification,
        intldesg: line1::INTLDESG.of(line).trim_end().to_string(),
        two_digit_year: int_field(line, line1::EPOCH_YEAR, 1)?,
        epochdays: float_field(line, line1::EPOCH_DAYS, 1)?,
        ndot: float_field(line, line1::NDOT, 1)?,
        nddot: exponent_field(line, line1::NDDOT_MANTISSA, line1::NDDOT_EXPONENT, 1)?,
        bstar: exponent_field(line, line1::BSTAR_MANTISSA, line1::BSTAR_EXPONENT, 1)?,
        ephtype: char_field(line, line1::EPHEMERIS_TYPE),
        elnum: int_field(line, line1::ELNUM, 1)?,
    })
}

fn parse_line2(line: &str) -> Result<RawLine2, TleError> {
    validate_template(line, 2, line2::MIN_LEN, line2::BLANKS, line2::PERIODS)?;

    // The eccentricity column has an implied leading "0." and reads embedded
    // blanks as zeros.
    let ecc_digits = line2::ECCENTRICITY.of(line).replace(' ', "0");
    let ecco = format!("0.{ecc_digits}")
        .parse::<f64>()
        .ok()
        .context(FormatSnafu {
            line: 2u8,
            template: line2::TEMPLATE,
            text: line.to_string(),
        })?;

    Ok(RawLine2 {
        satnum: int_field(line, line2::SATNUM, 2)?,
        inclo: float_field(line, line2::INCLINATION, 2)?,
        nodeo: float_field(line, line2::RAAN, 2)?,
        ecco,
        argpo: float_field(line, line2::ARGP, 2)?,
        mo: float_field(line, line2::MEAN_ANOMALY, 2)?,
        no_kozai: float_field(line, line2::MEAN_MOTION, 2)?,
        revnum: int_field(line, line2::REVNUM, 2)?,
    })
}

/// Checks the fixed punctuation of a line: its length, its leading line
/// number, and every column which must hold a literal space or period.
fn validate_template(
    line: &str,
    lineno: u8,
    min_len: usize,
    blanks: &[usize],
    periods: &[usize],
) -> Result<(), TleError> {
    let bytes = line.as_bytes();
    let valid = bytes.len() >= min_len
        && bytes[0] == b'0' + lineno
        && bytes[1] == b' '
        && blanks.iter().all(|&i| bytes[i] == b' ')
        && periods.iter().all(|&i| bytes[i] == b'.');

    if valid {
        Ok(())
    } else {
        FormatSnafu {
            line: lineno,
            template: template_of(lineno),
            text: line.to_string(),
        }
        .fail()
    }
}

const fn template_of(lineno: u8) -> &'static str {
    match lineno {
        1 => line1::TEMPLATE,
        _ => line2::TEMPLATE,
    }
}

fn int_field(line: &str, span: Span, lineno: u8) -> Result<u32, TleError> {
    span.of(line).trim().parse().ok().context(FormatSnafu {
        line: lineno,
        template: template_of(lineno),
        text: line.to_string(),
    })
}

fn float_field(line: &str, span: Span, lineno: u8) -> Result<f64, TleError> {
    span.of(line).trim().parse().ok().context(FormatSnafu {
        line: lineno,
        template: template_of(lineno),
        text: line.to_string(),
    })
}

fn char_field(line: &str, span: Span) -> char {
    span.of(line).chars().next().unwrap_or(' ')
}

fn exponent_field(
    line: &str,
    mantissa: Span,
    exponent: Span,
    lineno: u8,
) -> Result<f64, TleError> {
    super::exponent::decode(mantissa.of(line), exponent.of(line)).context(FormatSnafu {
        line: lineno,
        template: template_of(lineno),
        text: line.to_string(),
    })
}

/// Builds the calendar timestamp from the epoch year and fractional day of
/// year, preserving sub-second precision by splitting the whole and
/// fractional seconds explicitly.
fn epoch_from_year_and_days(year: i32, days: f64) -> Option<Epoch> {
    let (month, day, hour, minute, second) = days2mdhms(year, days);
    let whole = second.floor();
    let mut nanos = ((second - whole) * 1e9).round() as u32;
    // A fractional part that rounds up to a full second would overflow the
    // seconds field; clamping costs one nanosecond once in a blue moon.
    if nanos >= 1_000_000_000 {
        nanos = 999_999_999;
    }
    Epoch::maybe_from_gregorian_utc(year, month, day, hour, minute, whole as u8, nanos).ok()
}
