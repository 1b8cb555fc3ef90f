//! Number and date rendering under the dashboard's fixed locale (fr-FR).
//!
//! Output matches what `Intl.NumberFormat('fr-FR')` and `toLocaleDateString('fr-FR', ..)`
//! produce in a browser, so values rendered here read the same as those in the web dashboard.
//!
//! ```
//! use guildboard_common::format::{DateFormatter, format_number};
//! use jiff::tz::TimeZone;
//!
//! assert_eq!(format_number(1234567.5), "1\u{202f}234\u{202f}567,5");
//!
//! let formatter = DateFormatter::new(TimeZone::UTC);
//! assert_eq!(formatter.format("2024-01-15T14:30:00Z"), "15 janvier 2024 à 14:30");
//! ```

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

/// Separator between groups of three integer digits (narrow no-break space).
pub const GROUP_SEPARATOR: char = '\u{202f}';

/// Separator between the integer and fraction parts.
pub const DECIMAL_SEPARATOR: char = ',';

/// Rendered in place of a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const MAX_FRACTION_DIGITS: usize = 3;

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Render a number with fr-FR grouping and decimal conventions.
///
/// The shortest decimal form of `value` is rounded to at most three fraction digits (ties away
/// from zero) and trailing zeros are dropped. Never fails: `NaN` and the infinities have textual forms too.
pub fn format_number(value: impl Into<f64>) -> String {
    let value = value.into();

    if value.is_nan() {
        return "NaN".to_string();
    }

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }

    if value.is_infinite() {
        out.push('∞');
        return out;
    }

    // Display gives the shortest decimal that round-trips, never in exponent form
    let shortest = format!("{}", value.abs());
    let (integer, fraction) = round_decimal(&shortest);

    out.push_str(&group_digits(&integer));
    if !fraction.is_empty() {
        out.push(DECIMAL_SEPARATOR);
        out.push_str(&fraction);
    }

    out
}

/// Round a plain decimal string to [`MAX_FRACTION_DIGITS`], half away from zero, and drop
/// trailing fraction zeros.
fn round_decimal(decimal: &str) -> (String, String) {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));

    if fraction.len() <= MAX_FRACTION_DIGITS {
        return (
            integer.to_string(),
            fraction.trim_end_matches('0').to_string(),
        );
    }

    let (kept, dropped) = fraction.split_at(MAX_FRACTION_DIGITS);
    let mut digits: Vec<u8> = integer.bytes().chain(kept.bytes()).collect();

    if dropped.as_bytes()[0] >= b'5' {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - MAX_FRACTION_DIGITS;
    let integer = String::from_utf8_lossy(&digits[..split]).into_owned();
    let fraction = String::from_utf8_lossy(&digits[split..]);

    (integer, fraction.trim_end_matches('0').to_string())
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }

    out
}

/// Render a date-like value in the system time zone, e.g. `"15 janvier 2024 à 14:30"`.
///
/// Unparseable input yields [`INVALID_DATE`]; this never returns an error.
pub fn format_date<D: DateLike + ?Sized>(value: &D) -> String {
    DateFormatter::system().format(value)
}

/// Something that can be turned into an instant, the way the browser's `Date` constructor
/// accepts strings, epoch milliseconds, and other dates.
pub trait DateLike {
    /// Resolve to an instant. Civil (offset-less) values are interpreted in `tz`.
    fn to_timestamp(&self, tz: &TimeZone) -> Option<Timestamp>;
}

impl DateLike for str {
    fn to_timestamp(&self, tz: &TimeZone) -> Option<Timestamp> {
        parse_date(self.trim(), tz)
    }
}

impl DateLike for String {
    fn to_timestamp(&self, tz: &TimeZone) -> Option<Timestamp> {
        self.as_str().to_timestamp(tz)
    }
}

/// Milliseconds since the Unix epoch.
impl DateLike for i64 {
    fn to_timestamp(&self, _tz: &TimeZone) -> Option<Timestamp> {
        Timestamp::from_millisecond(*self).ok()
    }
}

impl DateLike for Timestamp {
    fn to_timestamp(&self, _tz: &TimeZone) -> Option<Timestamp> {
        Some(*self)
    }
}

impl DateLike for Zoned {
    fn to_timestamp(&self, _tz: &TimeZone) -> Option<Timestamp> {
        Some(self.timestamp())
    }
}

impl DateLike for DateTime {
    fn to_timestamp(&self, tz: &TimeZone) -> Option<Timestamp> {
        tz.to_ambiguous_timestamp(*self).compatible().ok()
    }
}

fn parse_date(input: &str, tz: &TimeZone) -> Option<Timestamp> {
    if input.is_empty() {
        return None;
    }

    // Anything carrying an offset or `Z` names an instant directly
    if let Ok(ts) = input.parse::<Timestamp>() {
        return Some(ts);
    }

    // A bare ISO date is midnight UTC, a bare ISO date-time is local time
    let has_time = input.contains(['T', 't', ' ', ':']);
    if !has_time {
        if let Ok(date) = input.parse::<jiff::civil::Date>() {
            return date.to_zoned(TimeZone::UTC).ok().map(|z| z.timestamp());
        }
    } else if let Ok(dt) = input.parse::<DateTime>() {
        return dt.to_timestamp(tz);
    }

    // HTTP dates, e.g. "Mon, 15 Jan 2024 14:30:00 GMT"
    jiff::fmt::rfc2822::parse(input)
        .ok()
        .map(|zoned| zoned.timestamp())
}

/// Renders dates in a chosen time zone.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    time_zone: TimeZone,
}

impl DateFormatter {
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// A formatter for the local system time zone.
    pub fn system() -> Self {
        Self::new(TimeZone::system())
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Render `value` as `"<day> <month> <year> à HH:MM"` in this formatter's time zone.
    pub fn format<D: DateLike + ?Sized>(&self, value: &D) -> String {
        match value.to_timestamp(&self.time_zone) {
            Some(ts) => self.render(&ts.to_zoned(self.time_zone.clone())),
            None => INVALID_DATE.to_string(),
        }
    }

    fn render(&self, zoned: &Zoned) -> String {
        let month = MONTHS[(zoned.month() - 1) as usize];
        format!(
            "{} {} {} à {:02}:{:02}",
            zoned.day(),
            month,
            zoned.year(),
            zoned.hour(),
            zoned.minute()
        )
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz;

    use super::*;

    fn nb(s: &str) -> String {
        s.replace(' ', &GROUP_SEPARATOR.to_string())
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(1000), nb("1 000"));
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234567.5), nb("1 234 567,5"));
        assert_eq!(format_number(1_000_000_000u32), nb("1 000 000 000"));
    }

    #[test]
    fn zero_negative_and_fractional() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(-1234.5), nb("-1 234,5"));
        assert_eq!(format_number(0.25), "0,25");
        assert_eq!(format_number(-0.0), "-0");
    }

    #[test]
    fn keeps_at_most_three_fraction_digits() {
        assert_eq!(format_number(3.14159), "3,142");
        assert_eq!(format_number(2.0001), "2");
        assert_eq!(format_number(-1234.5678), nb("-1 234,568"));
        assert_eq!(format_number(0.9999), "1");
        assert_eq!(format_number(999.9999), nb("1 000"));
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_number(0.0625), "0,063");
        assert_eq!(format_number(-0.1875), "-0,188");
        assert_eq!(format_number(1.5), "1,5");
    }

    #[test]
    fn rounds_the_shortest_decimal_form() {
        assert_eq!(format_number(1.0005), "1,001");
        assert_eq!(format_number(1.2345), "1,235");
        assert_eq!(format_number(2.0015), "2,002");
        assert_eq!(format_number(8.0005), "8,001");
        assert_eq!(format_number(-1.0005), "-1,001");
        assert_eq!(format_number(1.0004999), "1");
    }

    #[test]
    fn large_and_tiny_magnitudes() {
        assert_eq!(format_number(1e21), nb("1 000 000 000 000 000 000 000"));
        assert_eq!(format_number(2f64.powi(48) + 0.5), nb("281 474 976 710 656,5"));
        assert_eq!(format_number(1e-7), "0");
        assert_eq!(format_number(0.0005), "0,001");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "∞");
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn formats_instant_in_formatter_zone() {
        let utc = DateFormatter::new(TimeZone::UTC);
        assert_eq!(utc.format("2024-01-15T14:30:00Z"), "15 janvier 2024 à 14:30");

        let paris_winter = DateFormatter::new(TimeZone::fixed(tz::offset(1)));
        assert_eq!(
            paris_winter.format("2024-01-15T14:30:00Z"),
            "15 janvier 2024 à 15:30"
        );
    }

    #[test]
    fn every_month_name() {
        let utc = DateFormatter::new(TimeZone::UTC);
        for (i, name) in MONTHS.iter().enumerate() {
            let input = format!("2023-{:02}-03T08:05:00Z", i + 1);
            assert_eq!(utc.format(input.as_str()), format!("3 {name} 2023 à 08:05"));
        }
    }

    #[test]
    fn offset_input_is_converted() {
        let utc = DateFormatter::new(TimeZone::UTC);
        assert_eq!(
            utc.format("2024-08-01T01:15:00+02:00"),
            "31 juillet 2024 à 23:15"
        );
    }

    #[test]
    fn date_only_is_utc_midnight() {
        let behind = DateFormatter::new(TimeZone::fixed(tz::offset(-5)));
        assert_eq!(behind.format("2024-03-10"), "9 mars 2024 à 19:00");
    }

    #[test]
    fn local_date_time_uses_formatter_zone() {
        let east = DateFormatter::new(TimeZone::fixed(tz::offset(9)));
        assert_eq!(east.format("2024-12-25T07:45:00"), "25 décembre 2024 à 07:45");
        assert_eq!(east.format("2024-12-25 07:45:00"), "25 décembre 2024 à 07:45");
    }

    #[test]
    fn http_dates() {
        let utc = DateFormatter::new(TimeZone::UTC);
        assert_eq!(
            utc.format("Mon, 15 Jan 2024 14:30:00 GMT"),
            "15 janvier 2024 à 14:30"
        );
    }

    #[test]
    fn non_string_inputs() {
        let utc = DateFormatter::new(TimeZone::UTC);
        assert_eq!(utc.format(&0i64), "1 janvier 1970 à 00:00");
        assert_eq!(utc.format(&1_705_329_000_000i64), "15 janvier 2024 à 14:30");

        let ts: Timestamp = "2024-02-29T23:59:00Z".parse().unwrap();
        assert_eq!(utc.format(&ts), "29 février 2024 à 23:59");

        let dt = jiff::civil::date(2024, 5, 1).at(9, 0, 0, 0);
        assert_eq!(utc.format(&dt), "1 mai 2024 à 09:00");
    }

    #[test]
    fn unparseable_input_is_textual() {
        let utc = DateFormatter::new(TimeZone::UTC);
        assert_eq!(utc.format("not a date"), INVALID_DATE);
        assert_eq!(utc.format(""), INVALID_DATE);
        assert_eq!(utc.format("2024-13-45"), INVALID_DATE);
    }

    #[test]
    fn system_zone_never_panics() {
        assert!(!format_date("2024-01-15T14:30:00Z").is_empty());
        assert_eq!(format_date("garbage"), INVALID_DATE);
    }
}
