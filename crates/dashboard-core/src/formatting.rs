/// Format an exact count with thousands separators.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(8807), "8,807");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a share of a total as `"12.3%"`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_share;
///
/// assert_eq!(format_share(1, 4), "25.0%");
/// assert_eq!(format_share(0, 0), "0.0%");
/// ```
pub fn format_share(part: u64, whole: u64) -> String {
    format!("{:.1}%", percentage(part as f64, whole as f64, 1))
}

/// Format a movie running time in minutes as `"1h 30m"`.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_runtime;
///
/// assert_eq!(format_runtime(45),  "45m");
/// assert_eq!(format_runtime(60),  "1h");
/// assert_eq!(format_runtime(225), "3h 45m");
/// ```
pub fn format_runtime(minutes: u32) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        let hours = minutes / 60;
        let mins = minutes % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_small() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
    }

    #[test]
    fn test_format_count_thousands() {
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(8_807), "8,807");
        assert_eq!(format_count(12_345_678), "12,345,678");
    }

    #[test]
    fn test_format_share() {
        assert_eq!(format_share(1, 3), "33.3%");
        assert_eq!(format_share(3, 3), "100.0%");
        assert_eq!(format_share(5, 0), "0.0%");
    }

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(0), "0m");
        assert_eq!(format_runtime(59), "59m");
        assert_eq!(format_runtime(120), "2h");
        assert_eq!(format_runtime(91), "1h 31m");
    }

    #[test]
    fn test_percentage_zero_whole() {
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
    }

    #[test]
    fn test_percentage_rounding() {
        let p = percentage(1.0, 3.0, 2);
        assert!((p - 33.33).abs() < 1e-9, "percentage = {p}");
    }
}
