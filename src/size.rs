//! Human-readable file sizes.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with one decimal place, e.g. `1536000` → `"1.5 MB"`.
///
/// The count is divided by 1024 until it drops below 1024. A value that
/// would round up to `1024.0` moves to the next unit instead. TB is the
/// last unit and absorbs any magnitude.
pub fn format_file_size(size_bytes: u64) -> String {
    let mut size = size_bytes as f64;
    let last = UNITS.len() - 1;
    for unit in &UNITS[..last] {
        if (size * 10.0).round() < 10240.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} {}", size, UNITS[last])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_sizes() {
        assert_eq!(format_file_size(0), "0.0 B");
        assert_eq!(format_file_size(1), "1.0 B");
        assert_eq!(format_file_size(1023), "1023.0 B");
        assert_eq!(format_file_size(1024), "1.0 KB");
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(format_file_size(1_536_000), "1.5 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_rounding_promotes_unit() {
        // 1023.99 KB would print as 1024.0 KB
        assert_eq!(format_file_size(1_048_575), "1.0 MB");
    }

    #[test]
    fn test_terabytes_absorb_everything() {
        assert_eq!(format_file_size(1024u64.pow(4)), "1.0 TB");
        assert_eq!(format_file_size(1024u64.pow(4) * 2048), "2048.0 TB");
        assert!(format_file_size(u64::MAX).ends_with(" TB"));
    }

    proptest! {
        #[test]
        fn prop_numeric_part_below_1024_unless_tb(n in any::<u64>()) {
            let formatted = format_file_size(n);
            let (number, unit) = formatted.split_once(' ').unwrap();
            let value: f64 = number.parse().unwrap();
            prop_assert!(value >= 0.0);
            prop_assert!(UNITS.contains(&unit));
            if unit != "TB" {
                prop_assert!(value < 1024.0, "{} {}", number, unit);
            }
        }
    }
}
