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

//! The column map of the TLE punch-card layout, consulted by both the parser
//! and the formatter so that the two directions cannot drift apart.

/// Total length of a TLE line, checksum digit included.
pub const LINE_LEN: usize = 69;

/// A fixed column range within a TLE line (0-indexed, half open).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub const fn end(self) -> usize {
        self.start + self.len
    }

    /// Extracts this span from `line`, clamped to the line's actual length so
    /// that a short (already length-validated) line yields a parse error
    /// rather than a panic.
    pub fn of(self, line: &str) -> &str {
        let end = self.end().min(line.len());
        line.get(self.start.min(end)..end).unwrap_or("")
    }
}

pub mod line1 {
    use super::Span;

    pub const SATNUM: Span = Span::new(2, 5);
    pub const CLASSIFICATION: Span = Span::new(7, 1);
    pub const INTLDESG: Span = Span::new(9, 8);
    pub const EPOCH_YEAR: Span = Span::new(18, 2);
    pub const EPOCH_DAYS: Span = Span::new(20, 12);
    pub const NDOT: Span = Span::new(33, 10);
    pub const NDDOT_MANTISSA: Span = Span::new(44, 6);
    pub const NDDOT_EXPONENT: Span = Span::new(50, 2);
    pub const BSTAR_MANTISSA: Span = Span::new(53, 6);
    pub const BSTAR_EXPONENT: Span = Span::new(59, 2);
    pub const EPHEMERIS_TYPE: Span = Span::new(62, 1);
    pub const ELNUM: Span = Span::new(64, 4);
    pub const CHECKSUM: Span = Span::new(68, 1);

    /// Columns which must hold a literal space.
    pub const BLANKS: &[usize] = &[8, 32, 43, 52, 61, 63];
    /// Columns which must hold a literal period.
    pub const PERIODS: &[usize] = &[23, 34];
    /// Shortest acceptable line 1 after trailing whitespace removal.
    pub const MIN_LEN: usize = 64;

    pub const TEMPLATE: &str =
        "1 NNNNNC NNNNNAAA NNNNN.NNNNNNNN +.NNNNNNNN +NNNNN-N +NNNNN-N N NNNNN";
}

pub mod line2 {
    use super::Span;

    pub const SATNUM: Span = Span::new(2, 5);
    pub const INCLINATION: Span = Span::new(8, 8);
    /// Inclination sub-field when only two digits precede the decimal point.
    pub const INCLINATION_MID: Span = Span::new(9, 7);
    /// Inclination sub-field when a single digit precedes the decimal point.
    pub const INCLINATION_NARROW: Span = Span::new(10, 6);
    pub const RAAN: Span = Span::new(17, 8);
    pub const ECCENTRICITY: Span = Span::new(26, 7);
    pub const ARGP: Span = Span::new(34, 8);
    pub const MEAN_ANOMALY: Span = Span::new(43, 8);
    pub const MEAN_MOTION: Span = Span::new(52, 11);
    pub const REVNUM: Span = Span::new(63, 5);
    pub const CHECKSUM: Span = Span::new(68, 1);

    /// Columns which must hold a literal space.
    pub const BLANKS: &[usize] = &[7, 16, 25, 33, 42, 51];
    /// Columns which must hold a literal period.
    pub const PERIODS: &[usize] = &[11, 20, 37, 46];
    /// Line 2 must be full length (the revolution count reaches column 68).
    pub const MIN_LEN: usize = 69;

    pub const TEMPLATE: &str =
        "2 NNNNN NNN.NNNN NNN.NNNN NNNNNNN NNN.NNNN NNN.NNNN NN.NNNNNNNNNNNNNN";
}
