//! Episode duration helpers

use regex::Regex;
use std::sync::OnceLock;

/// Format seconds as `H:MM:SS`, the form podcast clients display
///
/// ```rust
/// use vidcast::utils::duration::format_duration;
///
/// assert_eq!(format_duration(0), "0:00:00");
/// assert_eq!(format_duration(3725), "1:02:05");
/// ```
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Parse an ISO-8601 duration such as `PT1H2M3S` or `P1DT5M` into seconds
///
/// Returns `None` for anything that is not a day/time duration. Years and
/// months are rejected since their length is ambiguous.
pub fn parse_iso8601_duration(value: &str) -> Option<u64> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$")
            .expect("static duration pattern is valid")
    });

    let value = value.trim();
    if value == "P" || value.ends_with('T') {
        return None;
    }

    let caps = re.captures(value)?;
    let part = |index: usize| -> Option<u64> {
        caps.get(index)
            .map(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(Some(0))
    };

    // Upstream values are untrusted; an overflowing duration is no duration
    let days = part(1)?.checked_mul(86_400)?;
    let hours = part(2)?.checked_mul(3600)?;
    let minutes = part(3)?.checked_mul(60)?;
    days.checked_add(hours)?
        .checked_add(minutes)?
        .checked_add(part(4)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(59, "0:00:59")]
    #[case(60, "0:01:00")]
    #[case(36_000, "10:00:00")]
    fn test_format_duration(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(format_duration(secs), expected);
    }

    #[rstest]
    #[case("PT1H2M3S", Some(3723))]
    #[case("PT15M", Some(900))]
    #[case("PT45S", Some(45))]
    #[case("P1DT1S", Some(86_401))]
    #[case("P0D", Some(0))]
    #[case("P", None)]
    #[case("PT", None)]
    #[case("P1M", None)]
    #[case("1H", None)]
    #[case("", None)]
    #[case("P1000000000000000D", None)]
    #[case("PT99999999999999999999S", None)]
    #[case("PT18446744073709551615S", Some(u64::MAX))]
    #[case("PT1M18446744073709551615S", None)]
    fn test_parse_iso8601_duration(#[case] value: &str, #[case] expected: Option<u64>) {
        assert_eq!(parse_iso8601_duration(value), expected);
    }
}
