//! Compact human-readable durations.
//!
//! Durations are split into hours, minutes and leftover seconds. Leftover
//! seconds above 30 bump the minute count by one; the bump is never carried
//! into hours, so `59m 31s` renders as `60 min`.

const SECS_PER_MIN: f64 = 60.0;
const MINS_PER_HOUR: f64 = 60.0;
const CARRY_THRESHOLD_SECS: f64 = 30.0;

/// Format a duration given in seconds.
///
/// Only seconds are shown when both hours and minutes come out as zero
/// after the carry (`"25 s"`; `45 s` already carries to `"1 min"`). Otherwise hours (`"1 hr"`, `"N hrs"`) and minutes (`"N min"`)
/// are joined by a single space, omitting zero parts. Negative input is
/// treated as zero.
pub fn format_duration(duration_secs: f64) -> String {
    let duration = duration_secs.max(0.0);

    let total_minutes = (duration / SECS_PER_MIN).floor();
    let seconds = duration - total_minutes * SECS_PER_MIN;
    let hours = (total_minutes / MINS_PER_HOUR).floor();
    let minutes = total_minutes - hours * MINS_PER_HOUR;

    let hours = hours as u64;
    let mut minutes = minutes as u64;

    if seconds > CARRY_THRESHOLD_SECS {
        minutes += 1;
    }

    if hours == 0 && minutes == 0 {
        return format!("{} s", seconds.round_ties_even() as u64);
    }

    let mut parts: Vec<String> = Vec::with_capacity(2);
    match hours {
        0 => {}
        1 => parts.push("1 hr".to_string()),
        n => parts.push(format!("{n} hrs")),
    }
    if minutes > 0 {
        parts.push(format!("{minutes} min"));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_is_seconds() {
        assert_eq!(format_duration(0.0), "0 s");
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_duration(25.0), "25 s");
        assert_eq!(format_duration(30.0), "30 s");
    }

    #[test]
    fn test_seconds_above_thirty_carry_before_seconds_only_check() {
        assert_eq!(format_duration(45.0), "1 min");
        assert_eq!(format_duration(59.9), "1 min");
    }

    #[test]
    fn test_seconds_round_half_to_even() {
        assert_eq!(format_duration(0.5), "0 s");
        assert_eq!(format_duration(2.5), "2 s");
        assert_eq!(format_duration(3.5), "4 s");
        assert_eq!(format_duration(12.4), "12 s");
    }

    #[test]
    fn test_leftover_above_thirty_seconds_rounds_into_a_minute() {
        assert_eq!(format_duration(31.0), "1 min");
        assert_eq!(format_duration(30.5), "1 min");
    }

    #[test]
    fn test_exactly_thirty_leftover_does_not_carry() {
        assert_eq!(format_duration(90.0), "1 min");
        assert_eq!(format_duration(91.0), "2 min");
    }

    #[test]
    fn test_hours() {
        assert_eq!(format_duration(3600.0), "1 hr");
        assert_eq!(format_duration(7200.0), "2 hrs");
        assert_eq!(format_duration(3660.0), "1 hr 1 min");
        assert_eq!(format_duration(2.0 * 3600.0 + 15.0 * 60.0), "2 hrs 15 min");
    }

    #[test]
    fn test_hour_with_leftover_seconds_only() {
        // Seconds are dropped once hours or minutes are shown.
        assert_eq!(format_duration(3600.0 + 20.0), "1 hr");
        assert_eq!(format_duration(3600.0 + 40.0), "1 hr 1 min");
    }

    #[test]
    fn test_minute_carry_is_not_renormalized_into_hours() {
        assert_eq!(format_duration(3599.0), "60 min");
        assert_eq!(format_duration(7199.0), "1 hr 60 min");
    }

    #[test]
    fn test_negative_is_clamped() {
        assert_eq!(format_duration(-12.0), "0 s");
    }

    proptest! {
        #[test]
        fn prop_short_durations_render_as_seconds(secs in 0.0f64..30.0) {
            let out = format_duration(secs);
            prop_assert!(out.ends_with(" s"), "unexpected output {out}");
        }

        #[test]
        fn prop_whole_minutes_render_without_seconds(mins in 1u64..6000) {
            let out = format_duration((mins * 60) as f64);
            prop_assert!(!out.ends_with(" s"));
            prop_assert!(!out.contains("  "));
            let hours = mins / 60;
            let minutes = mins % 60;
            if minutes > 0 {
                let suffix = format!("{minutes} min");
                prop_assert!(out.ends_with(&suffix));
            }
            if hours == 0 {
                prop_assert!(!out.contains("hr"));
            }
        }
    }
}
