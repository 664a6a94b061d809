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

use crate::errors::ChecksumSnafu;
use crate::TleError;

/// Computes the TLE checksum of a line: over the first 68 characters, each
/// decimal digit contributes its value, a minus sign contributes 1, and every
/// other character contributes nothing. The result is the sum modulo 10.
pub fn compute_checksum(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(68)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum();
    (sum % 10) as u8
}

/// Verifies the checksum of one or more TLE lines.
///
/// A line whose 69th character is not a decimal digit carries no checksum and
/// is skipped. Any mismatch fails with [TleError::Checksum] naming both the
/// stored and the computed digit.
pub fn verify_checksum(lines: &[&str]) -> Result<(), TleError> {
    for line in lines {
        let Some(stored) = line.chars().nth(68).and_then(|c| c.to_digit(10)) else {
            continue;
        };
        let computed = compute_checksum(line);
        if stored as u8 != computed {
            return ChecksumSnafu {
                stored: stored as u8,
                computed,
                text: (*line).to_string(),
            }
            .fail();
        }
    }
    Ok(())
}

/// Returns a new copy of the TLE line with the correct checksum appended,
/// discarding any existing checksum character. The line is truncated or
/// space-padded to exactly 68 characters first.
pub fn fix_checksum(line: &str) -> String {
    let mut fixed: String = line.chars().take(68).collect();
    for _ in fixed.chars().count()..68 {
        fixed.push(' ');
    }
    let digit = compute_checksum(&fixed);
    fixed.push(char::from_digit(u32::from(digit), 10).unwrap());
    fixed
}
