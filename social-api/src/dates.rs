//! Provider timestamp formats. Anything unparseable maps to `None`.

use chrono::{DateTime, NaiveDateTime, Utc};

/// `Tue Jul 13 17:38:21 +0000 2010`, used by timelines, profiles and messages.
pub(crate) fn parse_timeline_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(raw.trim(), "%a %b %d %H:%M:%S %z %Y")
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// `Tue, 13 Jul 2010 17:38:21 +0000`, used by search results.
pub(crate) fn parse_search_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim())
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Graph API times: `2011-04-01T15:30:00+0000`, RFC 3339, or a naive local
/// time which is taken as UTC.
pub(crate) fn parse_graph_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|d| d.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|n| n.and_utc())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_dates() {
        let d = parse_timeline_date("Tue Jul 13 17:38:21 +0000 2010").unwrap();
        assert_eq!(d.timestamp_millis(), 1279042701000);
        let d = parse_timeline_date("Tue Jul 20 19:38:21 +0000 2010").unwrap();
        assert_eq!(d.timestamp_millis(), 1279654701000);
    }

    #[test]
    fn timeline_dates_honour_offsets() {
        let d = parse_timeline_date("Tue Jul 13 19:38:21 +0200 2010").unwrap();
        assert_eq!(d.timestamp_millis(), 1279042701000);
    }

    #[test]
    fn search_dates() {
        let d = parse_search_date("Tue, 13 Jul 2010 17:38:21 +0000").unwrap();
        assert_eq!(d.timestamp_millis(), 1279042701000);
    }

    #[test]
    fn graph_times() {
        let a = parse_graph_time("2011-04-01T15:30:00+0000").unwrap();
        let b = parse_graph_time("2011-04-01T15:30:00Z").unwrap();
        let c = parse_graph_time("2011-04-01T15:30:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.to_rfc3339(), "2011-04-01T15:30:00+00:00");
    }

    #[test]
    fn garbage_is_none() {
        assert!(parse_timeline_date("yesterday").is_none());
        assert!(parse_search_date("").is_none());
        assert!(parse_graph_time("2011-13-45").is_none());
    }
}
