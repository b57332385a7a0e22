/// Unit letters for successive powers of 1024
const UNITS: [char; 7] = ['B', 'K', 'M', 'G', 'T', 'P', 'E'];

/// Format bytes into the catalogue's size column.
///
/// The byte count is scaled by 1024 until the mantissa drops below 1024, the
/// mantissa is rounded *up* to one decimal, and the exact byte count follows in
/// parentheses whenever a unit larger than bytes was chosen:
/// `512B`, `1.5K (1536B)`, `4.2M (4400000B)`.
pub fn format_size(bytes: u64) -> String {
    let mut mantissa = bytes as f64;
    let mut unit = 0;
    while mantissa >= 1024.0 && unit < UNITS.len() - 1 {
        mantissa /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        return format!("{}B", bytes);
    }

    let rounded = (mantissa * 10.0).ceil() / 10.0;
    format!("{}{} ({}B)", rounded, UNITS[unit], bytes)
}

/// Integer percentage of `processed` over `total`, floored and capped at 100.
///
/// Returns `None` when there is no denominator.
pub fn progress_percentage(processed: u64, total: u64) -> Option<u8> {
    if total == 0 {
        return None;
    }
    let pct = (processed as u128 * 100) / total as u128;
    Some(pct.min(100) as u8)
}

/// Format a number with thousand separators (e.g., 1,234,567)
pub fn format_count(n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }

    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_plain_bytes() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(10), "10B");
        assert_eq!(format_size(512), "512B");
        assert_eq!(format_size(1023), "1023B");
    }

    #[test]
    fn test_format_size_scaled() {
        assert_eq!(format_size(1024), "1K (1024B)");
        assert_eq!(format_size(1536), "1.5K (1536B)");
        assert_eq!(format_size(4_400_000), "4.2M (4400000B)");
        assert_eq!(format_size(1024 * 1024 * 1024), "1G (1073741824B)");
        assert_eq!(format_size(u64::MAX), "16E (18446744073709551615B)");
    }

    #[test]
    fn test_format_size_rounds_up() {
        // 1025 / 1024 = 1.0009..., ceiling to one decimal gives 1.1
        assert_eq!(format_size(1025), "1.1K (1025B)");
        // Just under 1 MiB still reports in K, rounded up to 1024
        assert_eq!(format_size(1024 * 1024 - 1), "1024K (1048575B)");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(0, 0), None);
        assert_eq!(progress_percentage(5, 0), None);
        assert_eq!(progress_percentage(0, 3), Some(0));
        assert_eq!(progress_percentage(1, 3), Some(33));
        assert_eq!(progress_percentage(2, 3), Some(66));
        assert_eq!(progress_percentage(3, 3), Some(100));
        assert_eq!(progress_percentage(7, 3), Some(100));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12345), "12,345");
        assert_eq!(format_count(1234567), "1,234,567");
    }
}
