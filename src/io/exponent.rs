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

//! The implied-decimal / implied-exponent numeric encoding used by the second
//! mean-motion derivative and the B* drag term.
//!
//! A field such as `-11606-4` means `-0.11606e-4`: a sign character, five
//! mantissa digits with an implied leading `0.`, and a signed single-digit
//! decimal exponent. This is the most error-prone piece of the format, so
//! encode and decode live here as pure functions, tested independently of the
//! line-level codec.

/// A value rendered in TLE mantissa + signed-exponent form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    /// `-` for negative values, a space otherwise.
    pub sign: char,
    /// Five mantissa digits with an implied leading `0.`.
    pub mantissa: String,
    /// Explicitly signed single-digit decimal exponent, e.g. `-4` or `+0`.
    pub exponent: String,
}

impl Encoded {
    /// The eight characters as they appear in the line.
    pub fn to_field(&self) -> String {
        format!("{}{}{}", self.sign, self.mantissa, self.exponent)
    }
}

/// Decodes a mantissa field (sign character plus digits, implied leading
/// `0.`) and a signed exponent field into a plain float. Returns `None` if
/// either field is malformed.
pub fn decode(mantissa: &str, exponent: &str) -> Option<f64> {
    let mut chars = mantissa.chars();
    let sign = match chars.next()? {
        '-' => -1.0,
        ' ' | '+' => 1.0,
        _ => return None,
    };
    let digits = chars.as_str();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let fraction = digits.parse::<u32>().ok()? as f64 / 10_f64.powi(digits.len() as i32);
    let exp = exponent.trim().parse::<i32>().ok()?;
    Some(sign * fraction * 10_f64.powi(exp))
}

/// Encodes a value into mantissa + signed-exponent form. Exactly zero is
/// special-cased to the `00000+0` literal; any other value is normalized so
/// that the five mantissa digits represent a fraction in `[0.1, 1)`.
pub fn encode(value: f64) -> Encoded {
    if value == 0.0 {
        return Encoded {
            sign: ' ',
            mantissa: "00000".to_string(),
            exponent: "+0".to_string(),
        };
    }

    let magnitude = value.abs();
    let mut exp = magnitude.log10().floor() as i32 + 1;
    let mut scaled = (magnitude / 10_f64.powi(exp) * 1e5).round() as u32;
    // The mantissa may round up to 1.0; renormalize when it does.
    if scaled >= 100_000 {
        exp += 1;
        scaled = (magnitude / 10_f64.powi(exp) * 1e5).round() as u32;
    }
    debug_assert!(exp.abs() <= 9, "exponent {exp} does not fit a single digit");

    Encoded {
        sign: if value < 0.0 { '-' } else { ' ' },
        mantissa: format!("{scaled:05}"),
        exponent: format!("{}{}", if exp < 0 { '-' } else { '+' }, exp.abs()),
    }
}
