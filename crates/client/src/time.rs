//! Wire timestamp formatting
//!
//! The portal expects `YYYY-MM-DDTHH:MM:SS+09:00` for the calendar search
//! window. The offset is fixed at +09:00 whatever the caller's zone, so every
//! instant is converted before formatting.

use chrono::{DateTime, FixedOffset, TimeZone};
use tigris_domain::constants::WIRE_UTC_OFFSET_SECS;
use tigris_domain::{Result, TigrisError};

const WIRE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// The portal's fixed UTC offset (+09:00).
pub fn wire_offset() -> FixedOffset {
    FixedOffset::east_opt(WIRE_UTC_OFFSET_SECS).expect("+09:00 is a valid offset")
}

/// Format an instant for the calendar search body, converting to +09:00.
pub fn format_wire_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    instant.with_timezone(&wire_offset()).format(WIRE_TIMESTAMP_FORMAT).to_string()
}

/// Parse a wire timestamp back into an instant.
pub fn parse_wire_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, WIRE_TIMESTAMP_FORMAT)
        .map_err(|err| TigrisError::Parse(format!("invalid wire timestamp {raw:?}: {err}")))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn formats_with_fixed_offset() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 3, 15, 30, 0).unwrap();
        // 15:30 UTC is 00:30 on the next day at +09:00
        assert_eq!(format_wire_timestamp(&instant), "2024-03-04T00:30:00+09:00");
    }

    #[test]
    fn formats_other_zones_through_the_fixed_offset() {
        let newyork = chrono_tz::America::New_York.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap();
        let formatted = format_wire_timestamp(&newyork);
        assert!(formatted.ends_with("+09:00"), "got {formatted}");
        // 10:00 EST is 15:00 UTC is 00:00 next day KST
        assert_eq!(formatted, "2024-03-05T00:00:00+09:00");
    }

    #[test]
    fn round_trips_an_instant() {
        let instant = Utc.with_ymd_and_hms(2024, 7, 1, 2, 3, 4).unwrap();
        let formatted = format_wire_timestamp(&instant);
        let parsed = parse_wire_timestamp(&formatted).expect("parse");
        assert_eq!(parsed, instant);
        assert_eq!(format_wire_timestamp(&parsed), formatted);
    }

    #[test]
    fn rejects_garbage_timestamps() {
        let err = parse_wire_timestamp("2024-07-01").unwrap_err();
        assert!(matches!(err, TigrisError::Parse(_)));
    }
}
