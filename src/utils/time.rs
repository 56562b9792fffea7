/// Format a duration in seconds as zero-padded `HH:MM:SS`.
///
/// Fractional seconds are truncated, matching how recording lengths are
/// reported by media metadata.
pub fn format_seconds_to_hms(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };

    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;

    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_all_zeros() {
        assert_eq!(format_seconds_to_hms(0.0), "00:00:00");
    }

    #[test]
    fn truncates_fractional_seconds() {
        assert_eq!(format_seconds_to_hms(61.9), "00:01:01");
    }

    #[test]
    fn rolls_over_into_hours() {
        assert_eq!(format_seconds_to_hms(3661.0), "01:01:01");
        assert_eq!(format_seconds_to_hms(86399.0), "23:59:59");
    }

    #[test]
    fn non_finite_input_falls_back_to_zero() {
        assert_eq!(format_seconds_to_hms(f64::NAN), "00:00:00");
        assert_eq!(format_seconds_to_hms(-5.0), "00:00:00");
    }
}
