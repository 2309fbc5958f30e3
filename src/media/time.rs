// SPDX-License-Identifier: MPL-2.0
//! Time formatting and conversion for playback labels.

/// Microseconds per second, the unit FFmpeg seeks in (`AV_TIME_BASE`).
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Formats a position in seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour-long reel reads `60:00`.
/// Negative and non-finite input (such as an unknown duration) renders
/// `00:00`.
///
/// # Examples
///
/// ```
/// use film_showcase::media::time::format_time;
///
/// assert_eq!(format_time(65.0), "01:05");
/// assert_eq!(format_time(f64::NAN), "00:00");
/// ```
pub fn format_time(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Percentage of `duration` reached at `current_time`, in `[0, 100]`.
///
/// Returns 0 while the duration is unknown or zero.
pub fn progress_percent(current_time: f64, duration: Option<f64>) -> f32 {
    match duration {
        Some(duration) if duration.is_finite() && duration > 0.0 && current_time.is_finite() => {
            ((current_time / duration) * 100.0).clamp(0.0, 100.0) as f32
        }
        _ => 0.0,
    }
}

/// Converts seconds to an FFmpeg timestamp in `AV_TIME_BASE` units.
#[inline]
pub fn secs_to_timestamp(secs: f64) -> i64 {
    (secs * MICROS_PER_SECOND) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_time_handles_zero() {
        assert_eq!(format_time(0.0), "00:00");
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(65.0), "01:05");
        assert_eq!(format_time(3599.0), "59:59");
    }

    #[test]
    fn format_time_floors_fractions() {
        assert_eq!(format_time(59.999), "00:59");
    }

    #[test]
    fn format_time_keeps_counting_minutes_past_an_hour() {
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn format_time_handles_negative_and_non_finite() {
        assert_eq!(format_time(-10.0), "00:00");
        assert_eq!(format_time(f64::NAN), "00:00");
        assert_eq!(format_time(f64::INFINITY), "00:00");
    }

    #[test]
    fn progress_percent_is_fraction_of_duration() {
        assert!((progress_percent(30.0, Some(120.0)) - 25.0).abs() < f32::EPSILON);
        assert!((progress_percent(120.0, Some(120.0)) - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn progress_percent_without_duration_is_zero() {
        assert_eq!(progress_percent(10.0, None), 0.0);
        assert_eq!(progress_percent(10.0, Some(0.0)), 0.0);
        assert_eq!(progress_percent(10.0, Some(f64::NAN)), 0.0);
    }

    #[test]
    fn secs_to_timestamp_converts_to_micros() {
        assert_eq!(secs_to_timestamp(1.5), 1_500_000);
    }
}
