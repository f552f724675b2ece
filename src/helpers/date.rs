//! Date helper functions
//!
//! Dates are always rendered in pt-BR. Patterns use date-fns tokens
//! (`dd MMM yyyy`), since that is how the site configuration spells them.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse an API timestamp into wall-clock time
///
/// Offset-bearing timestamps are shifted into `tz` when one is given and
/// otherwise keep their own offset. Naive timestamps are taken as-is.
pub fn parse_timestamp(value: &str, tz: Option<Tz>) -> Option<NaiveDateTime> {
    let value = value.trim();

    let with_offset = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value));
    if let Ok(date) = with_offset {
        return Some(match tz {
            Some(tz) => date.with_timezone(&tz).naive_local(),
            None => date.naive_local(),
        });
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Format an optional API timestamp, empty when absent or unparseable
///
/// # Examples
/// ```ignore
/// format_date(Some("2021-03-25T00:00:00"), "dd MMM yyyy", None) // -> "25 mar 2021"
/// ```
pub fn format_date(value: Option<&str>, pattern: &str, tz: Option<Tz>) -> String {
    let Some(value) = value else {
        return String::new();
    };

    match parse_timestamp(value, tz) {
        Some(date) => Utc
            .from_utc_datetime(&date)
            .format_localized(&date_fns_to_chrono_format(pattern), Locale::pt_BR)
            .to_string(),
        None => {
            tracing::warn!("Unparseable date {:?}", value);
            String::new()
        }
    }
}

/// Resolve a timezone name, `None` for empty or unknown names
pub fn timezone(name: &str) -> Option<Tz> {
    if name.trim().is_empty() {
        return None;
    }
    match name.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            tracing::warn!("Unknown timezone {:?}, keeping source offsets", name);
            None
        }
    }
}

/// Convert a date-fns pattern into a chrono format string
fn date_fns_to_chrono_format(pattern: &str) -> String {
    // Longest tokens first within each letter
    let replacements = [
        // Year
        ("yyyy", "%Y"),
        ("yy", "%y"),
        // Month
        ("MMMM", "%B"), // Full month name
        ("MMM", "%b"),  // Abbreviated month name
        ("MM", "%m"),
        ("M", "%-m"),
        // Day of month
        ("dd", "%d"),
        ("d", "%-d"),
        // Hour 24h
        ("HH", "%H"),
        ("H", "%-H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '\'' {
            // quoted literal
            let body = &rest[1..];
            let (literal, next) = match body.find('\'') {
                Some(end) => (&body[..end], &body[end + 1..]),
                None => (body, ""),
            };
            result.push_str(&literal.replace('%', "%%"));
            rest = next;
            continue;
        }

        match replacements.iter().find(|(from, _)| rest.starts_with(*from)) {
            Some((from, to)) => {
                result.push_str(to);
                rest = &rest[from.len()..];
            }
            None => {
                if c == '%' {
                    result.push_str("%%");
                } else {
                    result.push(c);
                }
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fixed_timestamp() {
        assert_eq!(
            format_date(Some("2021-03-25T00:00:00"), "dd MMM yyyy", None),
            "25 mar 2021"
        );
    }

    #[test]
    fn test_format_api_timestamp() {
        assert_eq!(
            format_date(Some("2021-02-05T19:25:28+0000"), "dd MMM yyyy", None),
            "05 fev 2021"
        );
        assert_eq!(
            format_date(Some("2021-12-01T10:00:00Z"), "d 'de' MMMM 'de' yyyy", None),
            "1 de dezembro de 2021"
        );
    }

    #[test]
    fn test_timezone_shift() {
        let tz = timezone("America/Sao_Paulo");
        assert!(tz.is_some());
        // 01:00 UTC is still the previous day in São Paulo
        assert_eq!(
            format_date(Some("2021-03-25T01:00:00+0000"), "dd MMM yyyy", tz),
            "24 mar 2021"
        );
    }

    #[test]
    fn test_missing_or_invalid_dates_are_empty() {
        assert_eq!(format_date(None, "dd MMM yyyy", None), "");
        assert_eq!(format_date(Some("yesterday"), "dd MMM yyyy", None), "");
        assert!(timezone("").is_none());
        assert!(timezone("Mars/Olympus_Mons").is_none());
    }

    #[test]
    fn test_time_tokens() {
        let value = Some("2021-03-05T09:05:07");
        assert_eq!(format_date(value, "HH:mm:ss", None), "09:05:07");
        assert_eq!(format_date(value, "yy/MM/dd", None), "21/03/05");
        assert_eq!(format_date(value, "d/M H'h'", None), "5/3 9h");
    }

    #[test]
    fn test_date_fns_to_chrono() {
        assert_eq!(date_fns_to_chrono_format("dd MMM yyyy"), "%d %b %Y");
        assert_eq!(date_fns_to_chrono_format("d 'de' MMMM"), "%-d de %B");
        assert_eq!(date_fns_to_chrono_format("'100%' d"), "100%% %-d");
        assert_eq!(date_fns_to_chrono_format("HH:mm:ss"), "%H:%M:%S");
    }
}
