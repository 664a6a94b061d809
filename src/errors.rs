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

use snafu::Snafu;

#[derive(Debug, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TleError {
    /// The TLE format was designed for punch cards and is strict about the
    /// position of every period, space, and digit. The template shows an N
    /// where each digit of line `line` should go.
    #[snafu(display(
        "TLE line {line} does not match the official format:\n{template}\n{text}"
    ))]
    Format {
        line: u8,
        template: &'static str,
        text: String,
    },
    #[snafu(display(
        "object numbers in lines 1 and 2 do not match: {line1} != {line2}"
    ))]
    SatnumMismatch { line1: u32, line2: u32 },
    #[snafu(display(
        "TLE line gives its checksum as {stored} but in fact tallies to {computed}:\n{text}"
    ))]
    Checksum {
        stored: u8,
        computed: u8,
        text: String,
    },
    #[snafu(display("SGP4 error {code}: {reason}"))]
    Sgp4 { code: u8, reason: &'static str },
}
