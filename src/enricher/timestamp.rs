use chrono::{DateTime, SecondsFormat, Utc};

/// Format as `YYYY-MM-DDTHH:MM:SS.mmmZ`. Sub-millisecond digits are truncated.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_millisecond_precision_with_z_suffix() {
        let ts = Utc.timestamp_opt(1_453_818_496, 595_000_000).unwrap();
        assert_eq!(format_timestamp(&ts), "2016-01-26T14:28:16.595Z");
    }

    #[test]
    fn test_whole_seconds_keep_three_digits() {
        let ts = Utc.timestamp_opt(1_453_813_330, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2016-01-26T13:02:10.000Z");
    }

    #[test]
    fn test_nanoseconds_are_truncated() {
        let ts = Utc.timestamp_opt(1_453_818_496, 595_999_999).unwrap();
        assert_eq!(format_timestamp(&ts), "2016-01-26T14:28:16.595Z");
    }
}
