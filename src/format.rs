//! Locale-aware formatting for the dashboard
//!
//! Amounts, dates and times are rendered the way the marketplace frontend
//! renders them: Arabic-Indic digits, the Arabic thousands separator, the
//! `ج.س` currency glyph, `DD/MM/YYYY` dates and `HH:mm` times.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Currency glyph appended to formatted amounts (Sudanese pound)
pub const CURRENCY_GLYPH: &str = "ج.س";

/// Arabic thousands separator (U+066C)
const THOUSANDS_SEPARATOR: char = '\u{066C}';

/// Convert ASCII digits in a string to Arabic-Indic digits
pub fn to_arabic_digits(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '0'..='9' => {
                let offset = c as u32 - '0' as u32;
                char::from_u32(0x0660 + offset).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Format an amount as Sudanese pounds: zero fraction digits, grouped
/// thousands, Arabic-Indic digits, appended currency glyph.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{} {}", sign, to_arabic_digits(&grouped), CURRENCY_GLYPH)
}

/// Format a date as `DD/MM/YYYY` with Arabic-Indic digits
pub fn format_date(date: NaiveDate) -> String {
    to_arabic_digits(&date.format("%d/%m/%Y").to_string())
}

/// Format a time as `HH:mm` with Arabic-Indic digits
pub fn format_time(time: NaiveTime) -> String {
    to_arabic_digits(&time.format("%H:%M").to_string())
}

/// Parse a calendar date out of a cell value
///
/// Backend exports use ISO timestamps; manually entered values use the
/// dashboard's `DD/MM/YYYY` convention. Returns `None` when the value is
/// not a date in any accepted shape.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_digits() {
        assert_eq!(to_arabic_digits("0123456789"), "٠١٢٣٤٥٦٧٨٩");
        assert_eq!(to_arabic_digits("12/05/2026"), "١٢/٠٥/٢٠٢٦");
    }

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(15000.0), "١٥٬٠٠٠ ج.س");
        assert_eq!(format_currency(1234567.0), "١٬٢٣٤٬٥٦٧ ج.س");
    }

    #[test]
    fn test_format_currency_zero_fraction_digits() {
        assert_eq!(format_currency(99.6), "١٠٠ ج.س");
        assert_eq!(format_currency(0.0), "٠ ج.س");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-2500.0), "-٢٬٥٠٠ ج.س");
    }

    #[test]
    fn test_format_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        assert_eq!(format_date(date), "٠٨/٠٨/٢٠٢٦");

        let time = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(format_time(time), "٠٩:٠٥");
    }

    #[test]
    fn test_parse_date_accepts_backend_and_display_shapes() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(parse_date("2026-03-01"), Some(expected));
        assert_eq!(parse_date("2026-03-01 14:30:00"), Some(expected));
        assert_eq!(parse_date("2026-03-01T14:30:00"), Some(expected));
        assert_eq!(parse_date("01/03/2026"), Some(expected));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date("قريبا"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2026-13-45"), None);
    }
}
