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

use super::checksum::compute_checksum;
use super::columns::{line1, line2, Span, LINE_LEN};
use super::exponent;
use super::XPDOTP;
use crate::cosmic::Elements;

/// Renders the canonical record into the two 69-character TLE lines,
/// checksums included.
///
/// This is the exact left inverse of [super::parse_tle]: parsing the output
/// reproduces the record's canonical elements to within floating-point
/// round-off, and parsing then formatting a valid TLE reproduces it byte for
/// byte.
pub fn format_tle(sat: &Elements) -> (String, String) {
    (format_line1(sat), format_line2(sat))
}

fn format_line1(sat: &Elements) -> String {
    let mut buf = [b' '; LINE_LEN];
    buf[0] = b'1';

    emplace(&mut buf, line1::SATNUM, &format!("{:05}", sat.satnum));
    emplace(
        &mut buf,
        line1::CLASSIFICATION,
        &sat.classification.to_string(),
    );
    emplace(&mut buf, line1::INTLDESG, &format!("{:<8}", sat.intldesg));
    emplace(
        &mut buf,
        line1::EPOCH_YEAR,
        &format!("{:02}", sat.epochyr.rem_euclid(100)),
    );
    emplace(
        &mut buf,
        line1::EPOCH_DAYS,
        &format!("{:012.8}", sat.epochdays),
    );

    // First derivative back in rev/day^2: explicit sign column, no leading
    // zero before the decimal point
    let ndot_per_day = sat.ndot * (XPDOTP * 1440.0);
    let sign = if ndot_per_day < 0.0 { '-' } else { ' ' };
    let digits = format!("{:.8}", ndot_per_day.abs());
    emplace(
        &mut buf,
        line1::NDOT,
        &format!("{sign}{}", digits.trim_start_matches('0')),
    );

    // Second derivative and drag term in mantissa + signed-exponent form. A
    // zero second derivative is the "00000-0" literal by catalog convention,
    // a zero drag term "00000+0".
    let nddot_per_day = sat.nddot * (XPDOTP * 1440.0 * 1440.0);
    if nddot_per_day == 0.0 {
        emplace(&mut buf, line1::NDDOT_MANTISSA, " 00000");
        emplace(&mut buf, line1::NDDOT_EXPONENT, "-0");
    } else {
        let enc = exponent::encode(nddot_per_day);
        emplace(
            &mut buf,
            line1::NDDOT_MANTISSA,
            &format!("{}{}", enc.sign, enc.mantissa),
        );
        emplace(&mut buf, line1::NDDOT_EXPONENT, &enc.exponent);
    }
    let enc = exponent::encode(sat.bstar);
    emplace(
        &mut buf,
        line1::BSTAR_MANTISSA,
        &format!("{}{}", enc.sign, enc.mantissa),
    );
    emplace(&mut buf, line1::BSTAR_EXPONENT, &enc.exponent);

    emplace(&mut buf, line1::EPHEMERIS_TYPE, &sat.ephtype.to_string());
    emplace(&mut buf, line1::ELNUM, &format!("{:>4}", sat.elnum));

    finish(buf)
}

fn format_line2(sat: &Elements) -> String {
    let mut buf = [b' '; LINE_LEN];
    buf[0] = b'2';

    emplace(&mut buf, line2::SATNUM, &format!("{:05}", sat.satnum));

    // The inclination field has no room for a sign, so the template
    // right-aligns on the count of digits before the decimal point.
    let incl_deg = sat.inclo.to_degrees();
    if incl_deg >= 100.0 {
        emplace(&mut buf, line2::INCLINATION, &format!("{incl_deg:8.4}"));
    } else if incl_deg >= 10.0 {
        emplace(&mut buf, line2::INCLINATION_MID, &format!("{incl_deg:7.4}"));
    } else {
        emplace(
            &mut buf,
            line2::INCLINATION_NARROW,
            &format!("{incl_deg:6.4}"),
        );
    }

    emplace(
        &mut buf,
        line2::RAAN,
        &format!("{:8.4}", sat.nodeo.to_degrees()),
    );
    // Implied leading "0.": keep the seven fractional digits only
    emplace(&mut buf, line2::ECCENTRICITY, &format!("{:.7}", sat.ecco)[2..]);
    emplace(
        &mut buf,
        line2::ARGP,
        &format!("{:8.4}", sat.argpo.to_degrees()),
    );
    emplace(
        &mut buf,
        line2::MEAN_ANOMALY,
        &format!("{:8.4}", sat.mo.to_degrees()),
    );
    emplace(
        &mut buf,
        line2::MEAN_MOTION,
        &format!("{:11.8}", sat.no_kozai * XPDOTP),
    );
    emplace(&mut buf, line2::REVNUM, &format!("{:>5}", sat.revnum));

    finish(buf)
}

/// Writes `text` into its column range; the formatting widths above guarantee
/// an exact fit.
fn emplace(buf: &mut [u8; LINE_LEN], span: Span, text: &str) {
    debug_assert_eq!(
        text.len(),
        span.len,
        "field {text:?} does not fit columns {}..{}",
        span.start,
        span.end()
    );
    buf[span.start..span.end()].copy_from_slice(text.as_bytes());
}

/// Appends the checksum digit to the assembled 68 columns.
fn finish(buf: [u8; LINE_LEN]) -> String {
    let mut line = String::from_utf8_lossy(&buf[..LINE_LEN - 1]).into_owned();
    let digit = compute_checksum(&line);
    line.push(char::from_digit(u32::from(digit), 10).unwrap());
    line
}
