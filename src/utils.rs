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

//! Calendar arithmetic from Vallado's _Fundamentals of Astrodynamics and
//! Applications_, valid from 1900 to 2100. TLE epochs cannot fall outside
//! that window (cf. the two-digit year rule in the parser).

/// Number of days in each month of a non-leap year.
const LMONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Returns the Julian date of the provided Gregorian calendar date (UT).
pub fn jday(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: f64) -> f64 {
    367.0 * f64::from(year)
        - ((7 * (year + (i32::from(month) + 9) / 12)) as f64 * 0.25).floor()
        + ((275 * i32::from(month)) as f64 / 9.0).floor()
        + f64::from(day)
        + 1_721_013.5
        + ((second / 60.0 + f64::from(minute)) / 60.0 + f64::from(hour)) / 24.0
}

/// Decomposes a fractional day of year into month, day, hour, minute, and
/// floating-point seconds.
pub fn days2mdhms(year: i32, days: f64) -> (u8, u8, u8, u8, f64) {
    let day_of_year = days.floor() as u32;

    let mut lmonth = LMONTH;
    if is_leap_year(year) {
        lmonth[1] = 29;
    }

    let mut month = 0;
    let mut day_count = 0;
    while month < 11 && day_of_year > day_count + lmonth[month] {
        day_count += lmonth[month];
        month += 1;
    }
    let day = day_of_year - day_count;

    let temp = (days - f64::from(day_of_year)) * 24.0;
    let hour = temp.floor();
    let temp = (temp - hour) * 60.0;
    let minute = temp.floor();
    let second = (temp - minute) * 60.0;

    (
        (month + 1) as u8,
        day as u8,
        hour as u8,
        minute as u8,
        second,
    )
}

/// Returns the day of year (1-indexed, so January 1 is day 1).
pub fn day_of_year(year: i32, month: u8, day: u8) -> u32 {
    let leap_day = u32::from(is_leap_year(year) && month > 2);
    LMONTH[..usize::from(month) - 1].iter().sum::<u32>() + leap_day + u32::from(day)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}
