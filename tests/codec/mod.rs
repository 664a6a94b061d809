extern crate pretty_env_logger as pel;

use rstest::rstest;

use twoline::cosmic::assert_elements_abs_eq;
use twoline::io::{compute_checksum, fix_checksum, verify_checksum, XPDOTP};
use twoline::time::Epoch;
use twoline::{Elements, GravityModel, OpsMode, TleError};

use crate::{
    GEO_LINE1, GEO_LINE2, ISS_LINE1, ISS_LINE2, MOLNIYA_LINE1, MOLNIYA_LINE2, SUNSYNC_LINE1,
    SUNSYNC_LINE2, VANGUARD_LINE1, VANGUARD_LINE2,
};

macro_rules! f64_eq {
    ($x:expr, $val:expr, $msg:expr) => {
        assert!(
            ($x - $val).abs() < 1e-10,
            "{}: {:.2e}",
            $msg,
            ($x - $val).abs()
        )
    };
}

fn parse(line1: &str, line2: &str) -> Result<Elements, TleError> {
    Elements::from_tle(line1, line2, GravityModel::Wgs72, OpsMode::Improved)
}

#[rstest]
#[case(ISS_LINE1, ISS_LINE2)]
#[case(VANGUARD_LINE1, VANGUARD_LINE2)]
#[case(GEO_LINE1, GEO_LINE2)]
#[case(SUNSYNC_LINE1, SUNSYNC_LINE2)]
#[case(MOLNIYA_LINE1, MOLNIYA_LINE2)]
fn format_of_parse_is_byte_exact(#[case] line1: &str, #[case] line2: &str) {
    let _ = pel::try_init();
    let elements = parse(line1, line2).unwrap();
    let (out1, out2) = elements.to_tle();
    assert_eq!(out1, line1);
    assert_eq!(out2, line2);
    assert_eq!(out1.len(), 69);
    assert_eq!(out2.len(), 69);
}

#[test]
fn parse_iss_reference_fields() {
    let _ = pel::try_init();
    let iss = parse(ISS_LINE1, ISS_LINE2).unwrap();

    assert_eq!(iss.satnum, 25544);
    assert_eq!(iss.classification, 'U');
    assert_eq!(iss.intldesg, "98067A");
    assert_eq!(iss.ephtype, '0');
    assert_eq!(iss.elnum, 292);
    assert_eq!(iss.revnum, 56353);
    assert_eq!(iss.epochyr, 2008);
    f64_eq!(iss.epochdays, 264.51782528, "epochdays");
    // One ULP at this magnitude is about 5e-10
    assert!((iss.jdsatepoch - 2_454_730.017_825_279_9).abs() < 1e-8, "jdsatepoch");

    // Canonical units: radians, rad/min, and the implied-exponent decimals
    f64_eq!(iss.ecco, 0.0006703, "ecco");
    f64_eq!(iss.inclo, 51.6416_f64.to_radians(), "inclo");
    f64_eq!(iss.nodeo, 247.4627_f64.to_radians(), "nodeo");
    f64_eq!(iss.argpo, 130.5360_f64.to_radians(), "argpo");
    f64_eq!(iss.mo, 325.0288_f64.to_radians(), "mo");
    f64_eq!(iss.no_kozai, 0.068_596_910_817_883_06, "no_kozai");
    f64_eq!(iss.bstar, -0.11606e-4, "bstar");
    assert!(
        (iss.ndot - (-6.611_646_576_131_298e-11)).abs() < 1e-20,
        "ndot"
    );
    f64_eq!(iss.nddot, 0.0, "nddot");
}

#[rstest]
#[case("00", 2000)]
#[case("56", 2056)]
#[case("57", 1957)]
#[case("99", 1999)]
fn two_digit_year_mapping(#[case] yy: &str, #[case] expected: i32) {
    let mut line1 = ISS_LINE1.to_string();
    line1.replace_range(18..20, yy);
    let line1 = fix_checksum(&line1);
    let elements = parse(&line1, ISS_LINE2).unwrap();
    assert_eq!(elements.epochyr, expected);
}

#[test]
fn blank_classification_reads_as_unclassified() {
    // 'U' sums to zero, so blanking the column leaves the checksum valid
    let mut line1 = ISS_LINE1.to_string();
    line1.replace_range(7..8, " ");
    let elements = parse(&line1, ISS_LINE2).unwrap();
    assert_eq!(elements.classification, 'U');
    // Formatting such a line restores the explicit 'U', a one-byte
    // normalization rather than a byte-exact round trip
    let (out1, _) = elements.to_tle();
    assert_eq!(out1, ISS_LINE1);
}

#[test]
fn blank_eccentricity_digits_read_as_zeros() {
    let mut line2 = ISS_LINE2.to_string();
    // 0006703 with two interior digits blanked reads as 0.0000703
    line2.replace_range(28..30, "  ");
    let line2 = fix_checksum(&line2);
    let elements = parse(ISS_LINE1, &line2).unwrap();
    f64_eq!(elements.ecco, 0.0000703, "ecco");
}

#[test]
fn checksums_of_known_lines() {
    // The minus sign counts one; every other non-digit counts zero.
    assert_eq!(compute_checksum(ISS_LINE1), 7);
    assert_eq!(compute_checksum(ISS_LINE2), 7);
    assert!(verify_checksum(&[ISS_LINE1, ISS_LINE2]).is_ok());
    assert_eq!(fix_checksum(&ISS_LINE1[..68]), ISS_LINE1);
}

#[test]
fn corrupted_digit_is_rejected() {
    let mut line2 = ISS_LINE2.to_string();
    // Bump one eccentricity digit without touching the stored checksum
    line2.replace_range(26..27, "9");
    let err = parse(ISS_LINE1, &line2).unwrap_err();
    assert!(
        matches!(
            err,
            TleError::Checksum {
                stored: 7,
                computed: 6,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn missing_checksum_digit_is_tolerated_on_line1() {
    // Some historical catalogs drop the trailing digit; a non-digit 69th
    // column skips verification rather than failing it.
    let elements = parse(&ISS_LINE1[..68], ISS_LINE2).unwrap();
    assert_eq!(elements.satnum, 25544);
}

#[test]
fn broken_punctuation_is_rejected() {
    let mut line1 = ISS_LINE1.to_string();
    // Column 8 must hold a literal space ('X' sums to zero, so the stored
    // checksum still matches and the template is what rejects the line)
    line1.replace_range(8..9, "X");
    let err = parse(&line1, ISS_LINE2).unwrap_err();
    assert!(matches!(err, TleError::Format { line: 1, .. }), "{err}");

    let truncated = &ISS_LINE2[..60];
    let err = parse(ISS_LINE1, truncated).unwrap_err();
    assert!(matches!(err, TleError::Format { line: 2, .. }), "{err}");
}

#[test]
fn catalog_number_mismatch_is_rejected() {
    let mut line2 = ISS_LINE2.to_string();
    line2.replace_range(2..7, "25545");
    let line2 = fix_checksum(&line2);
    let err = parse(ISS_LINE1, &line2).unwrap_err();
    assert!(
        matches!(
            err,
            TleError::SatnumMismatch {
                line1: 25544,
                line2: 25545,
            }
        ),
        "{err}"
    );
}

#[test]
fn trailing_whitespace_is_ignored() {
    let line1 = format!("{ISS_LINE1}  \r\n");
    let line2 = format!("{ISS_LINE2}\n");
    assert!(parse(&line1, &line2).is_ok());
}

#[test]
fn direct_construction_formats_catalog_lines() {
    // Same element set as the sun-synchronous fixture, built from canonical
    // values instead of parsed: the formatter must emit identical lines.
    let epoch = Epoch::from_gregorian_utc(2024, 1, 15, 6, 0, 0, 0);
    let elements = Elements::new(
        GravityModel::Wgs72,
        OpsMode::Improved,
        43013,
        epoch,
        0.74519e-4,
        98.7201_f64.to_radians(),
        324.5678_f64.to_radians(),
        0.0001156,
        91.2341_f64.to_radians(),
        268.8976_f64.to_radians(),
        14.195_521_61 / XPDOTP,
        0.000_001_12 / (XPDOTP * 1440.0),
        0.0,
        'U',
        "17073A",
        999,
        32089,
    );
    let (line1, line2) = elements.to_tle();
    assert_eq!(line1, SUNSYNC_LINE1);
    assert_eq!(line2, SUNSYNC_LINE2);
}

#[test]
fn parse_of_format_recovers_canonical_elements() {
    // Construction from values which sit exactly on the catalog's decimal
    // grids, second derivative included, round-trips losslessly.
    let epoch = Epoch::from_gregorian_utc(2024, 3, 1, 12, 0, 0, 0);
    let elements = Elements::new(
        GravityModel::Wgs72,
        OpsMode::Improved,
        11111,
        epoch,
        -0.34560e-3,
        63.4349_f64.to_radians(),
        120.0000_f64.to_radians(),
        0.7000000,
        270.0000_f64.to_radians(),
        10.0000_f64.to_radians(),
        2.005_210_00 / XPDOTP,
        0.000_110_00 / (XPDOTP * 1440.0),
        0.12345e-4 / (XPDOTP * 1440.0 * 1440.0),
        'U',
        "71001B",
        42,
        12345,
    );

    let (line1, line2) = elements.to_tle();
    let back = parse(&line1, &line2).unwrap();

    assert_elements_abs_eq(&elements, &back, 1e-9, "parse(format(e))");
    assert_eq!(back.classification, 'U');
    assert_eq!(back.intldesg, "71001B");
    assert_eq!(back.elnum, 42);
    assert_eq!(back.revnum, 12345);
    f64_eq!(back.nddot, elements.nddot, "nddot");
}
