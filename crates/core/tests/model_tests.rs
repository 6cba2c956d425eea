use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use petition_tracker_core::countries::{self, COUNTRIES};
use petition_tracker_core::errors::TrackerError;
use petition_tracker_core::models::chart::{DatasetKey, SeriesMode, ValueAxis, ViewState};
use petition_tracker_core::models::history::{parse_timestamp, CountryPoint, HistoryRecord};
use petition_tracker_core::models::palette::{ColorPalette, EU_COLOR, PALETTE};
use petition_tracker_core::models::series::{CountrySeries, HistorySeries, SeriesPoint};
use petition_tracker_core::models::settings::{Settings, DEFAULT_HISTORY_URL};
use std::collections::{HashMap, HashSet};

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn point(ts: DateTime<Utc>, total_count: u64, percentage: f64) -> SeriesPoint {
    SeriesPoint {
        timestamp: ts,
        total_count,
        percentage,
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Timestamps
// ═══════════════════════════════════════════════════════════════════

mod timestamps {
    use super::*;

    #[test]
    fn rfc3339_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T10:15:00Z").unwrap(),
            utc(2024, 3, 5, 10, 15)
        );
    }

    #[test]
    fn rfc3339_with_offset_is_normalized_to_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T01:00:00+02:00").unwrap(),
            utc(2024, 3, 4, 23, 0)
        );
    }

    #[test]
    fn fractional_seconds_with_z() {
        let ts = parse_timestamp("2024-03-05T10:15:00.123Z").unwrap();
        assert_eq!(ts.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        assert_eq!(
            parse_timestamp("2024-03-05T10:15:00").unwrap(),
            utc(2024, 3, 5, 10, 15)
        );
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(parse_timestamp("2024-01-02").unwrap(), utc(2024, 1, 2, 0, 0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse_timestamp("  2024-01-02 ").unwrap(), utc(2024, 1, 2, 0, 0));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, TrackerError::InvalidTimestamp(ref s) if s == "yesterday"));
    }

    #[test]
    fn impossible_date_is_rejected() {
        assert!(parse_timestamp("2024-02-30").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  HistoryRecord (wire format)
// ═══════════════════════════════════════════════════════════════════

mod history_record {
    use super::*;

    #[test]
    fn deserializes_feed_shape() {
        let json = r#"{
            "timestamp": "2024-01-02T12:00:00Z",
            "data": [
                { "countryCode": "de", "totalCount": 150, "percentage": 0.015 },
                { "countryCode": "fr", "totalCount": 90, "percentage": 0.2 }
            ]
        }"#;
        let record: HistoryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp, utc(2024, 1, 2, 12, 0));
        assert_eq!(record.entries.len(), 2);
        assert_eq!(record.entries[0].country_code, "de");
        assert_eq!(record.entries[0].total_count, 150);
        assert_eq!(record.entries[1].percentage, 0.2);
    }

    #[test]
    fn bad_timestamp_fails_deserialization() {
        let json = r#"{ "timestamp": "not a date", "data": [] }"#;
        let err = serde_json::from_str::<HistoryRecord>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid timestamp"));
    }

    #[test]
    fn missing_field_fails_deserialization() {
        let json = r#"{ "timestamp": "2024-01-02", "data": [{ "countryCode": "de", "percentage": 1.0 }] }"#;
        assert!(serde_json::from_str::<HistoryRecord>(json).is_err());
    }

    #[test]
    fn negative_count_fails_deserialization() {
        let json = r#"{ "timestamp": "2024-01-02", "data": [{ "countryCode": "de", "totalCount": -5, "percentage": 1.0 }] }"#;
        assert!(serde_json::from_str::<HistoryRecord>(json).is_err());
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let record = HistoryRecord::new(
            utc(2024, 1, 2, 0, 0),
            vec![CountryPoint {
                country_code: "de".into(),
                total_count: 1,
                percentage: 0.5,
            }],
        );
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"countryCode\":\"de\""));
        assert!(json.contains("\"totalCount\":1"));
        assert!(json.contains("\"data\":"));
    }

    #[test]
    fn total_count_sums_entries() {
        let record = HistoryRecord::new(
            utc(2024, 1, 2, 0, 0),
            vec![
                CountryPoint { country_code: "de".into(), total_count: 100, percentage: 1.0 },
                CountryPoint { country_code: "fr".into(), total_count: 250, percentage: 2.0 },
            ],
        );
        assert_eq!(record.total_count().unwrap(), 350);
    }

    #[test]
    fn total_count_overflow_is_an_error() {
        let record = HistoryRecord::new(
            utc(2024, 1, 2, 0, 0),
            vec![
                CountryPoint { country_code: "de".into(), total_count: u64::MAX, percentage: 1.0 },
                CountryPoint { country_code: "fr".into(), total_count: u64::MAX, percentage: 2.0 },
            ],
        );
        assert!(matches!(record.total_count(), Err(TrackerError::ValidationError(_))));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CountrySeries / HistorySeries
// ═══════════════════════════════════════════════════════════════════

mod country_series {
    use super::*;

    #[test]
    fn push_reports_new_codes_only_once() {
        let mut s = CountrySeries::new();
        assert!(s.push("de", point(utc(2024, 1, 1, 0, 0), 1, 0.1)));
        assert!(!s.push("de", point(utc(2024, 1, 2, 0, 0), 2, 0.2)));
        assert!(s.push("fr", point(utc(2024, 1, 2, 0, 0), 3, 0.3)));
        assert_eq!(s.len(), 2);
        assert_eq!(s.total_points(), 3);
    }

    #[test]
    fn codes_keep_first_seen_order() {
        let mut s = CountrySeries::new();
        for code in ["se", "at", "pl", "at", "se"] {
            s.push(code, point(utc(2024, 1, 1, 0, 0), 1, 0.0));
        }
        let codes: Vec<&String> = s.codes().collect();
        assert_eq!(codes, ["se", "at", "pl"]);
        let iterated: Vec<&str> = s.iter().map(|(code, _)| code).collect();
        assert_eq!(iterated, vec!["se", "at", "pl"]);
    }

    #[test]
    fn serde_keeps_every_country_in_order() {
        let mut s = CountrySeries::new();
        s.push("fi", point(utc(2024, 1, 1, 0, 0), 1, 0.1));
        s.push("be", point(utc(2024, 1, 1, 0, 0), 2, 0.2));
        s.push("fi", point(utc(2024, 1, 2, 0, 0), 3, 0.3));

        let json = serde_json::to_string(&s).unwrap();
        let back: CountrySeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        let codes: Vec<&String> = back.codes().collect();
        assert_eq!(codes, ["fi", "be"]);
        assert_eq!(back.iter().count(), back.len());
        assert_eq!(back.total_points(), 3);
    }

    #[test]
    fn get_unknown_code_is_none() {
        let s = CountrySeries::new();
        assert!(s.get("de").is_none());
        assert!(s.is_empty());
    }

    #[test]
    fn history_series_timestamps() {
        let series = HistorySeries {
            countries: CountrySeries::new(),
            eu_totals: vec![
                point(utc(2024, 1, 1, 0, 0), 1, 0.0),
                point(utc(2024, 1, 3, 0, 0), 2, 0.0),
            ],
        };
        assert_eq!(series.earliest_timestamp(), Some(utc(2024, 1, 1, 0, 0)));
        assert_eq!(series.latest_timestamp(), Some(utc(2024, 1, 3, 0, 0)));
        assert_eq!(series.record_count(), 2);
        assert!(!series.is_empty());
    }

    #[test]
    fn empty_history_series_has_no_latest() {
        let series = HistorySeries::default();
        assert!(series.latest_timestamp().is_none());
        assert!(series.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Country metadata
// ═══════════════════════════════════════════════════════════════════

mod country_table {
    use super::*;

    #[test]
    fn covers_all_27_member_states() {
        assert_eq!(COUNTRIES.len(), 27);
        let codes: HashSet<&str> = COUNTRIES.iter().map(|c| c.code).collect();
        assert_eq!(codes.len(), 27);
    }

    #[test]
    fn known_country() {
        let de = countries::country("de").unwrap();
        assert_eq!(de.name, "Germany");
        assert_eq!(de.flag, "🇩🇪");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(countries::display_name("CZ"), "Czech Republic");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(countries::display_name("xx"), "xx");
        assert_eq!(countries::flag("xx"), "");
        assert!(countries::country("xx").is_none());
    }

    #[test]
    fn greece_uses_gr_code() {
        assert_eq!(countries::display_name("gr"), "Greece");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ColorPalette
// ═══════════════════════════════════════════════════════════════════

mod palette {
    use super::*;

    #[test]
    fn assigns_in_discovery_order() {
        let mut p = ColorPalette::new();
        assert_eq!(p.assign("de"), PALETTE[0]);
        assert_eq!(p.assign("fr"), PALETTE[1]);
        assert_eq!(p.len(), 2);
    }

    #[test]
    fn assignment_is_stable() {
        let mut p = ColorPalette::new();
        let first = p.assign("de").to_string();
        p.assign("fr");
        assert_eq!(p.assign("de"), first);
        assert_eq!(p.color_of("de"), Some(first.as_str()));
    }

    #[test]
    fn all_member_states_get_distinct_colors() {
        let mut p = ColorPalette::new();
        let codes: Vec<String> = COUNTRIES.iter().map(|c| c.code.to_string()).collect();
        p.assign_all(&codes);
        let colors: HashSet<&str> = codes.iter().filter_map(|c| p.color_of(c)).collect();
        assert_eq!(colors.len(), 27);
        assert!(!colors.contains(EU_COLOR));
    }

    #[test]
    fn wraps_when_palette_exhausted() {
        let mut p = ColorPalette::new();
        for i in 0..PALETTE.len() {
            p.assign(&format!("c{i}"));
        }
        assert_eq!(p.assign("overflow"), PALETTE[0]);
    }

    #[test]
    fn unassigned_code_has_no_color() {
        assert!(ColorPalette::new().color_of("de").is_none());
        assert!(ColorPalette::new().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ViewState
// ═══════════════════════════════════════════════════════════════════

mod view_state {
    use super::*;

    #[test]
    fn defaults() {
        let v = ViewState::default();
        assert_eq!(v.value_axis, ValueAxis::Count);
        assert_eq!(v.series_mode, SeriesMode::Cumulative);
        assert!(!v.showing_eu_only);
        assert!(v.is_hidden(&DatasetKey::EuTotal));
        assert!(!v.is_hidden(&DatasetKey::Country("de".into())));
        assert!(v.zoom.is_none());
    }

    #[test]
    fn y_axis_titles() {
        let mut v = ViewState::default();
        assert_eq!(v.y_axis_title(), "Total Count");
        v.value_axis = ValueAxis::Percentage;
        assert_eq!(v.y_axis_title(), "Percentage");
        v.series_mode = SeriesMode::DailyChange;
        assert_eq!(v.y_axis_title(), "Daily Percentage Change");
        v.value_axis = ValueAxis::Count;
        assert_eq!(v.y_axis_title(), "Daily Signature Change");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.history_url, DEFAULT_HISTORY_URL);
        assert!(s.history_file.is_none());
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.calendar_utc_offset_minutes, 0);
        assert_eq!(s.recent_window_days, 30);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn empty_lookup_gives_defaults() {
        assert_eq!(Settings::from_lookup(lookup(&[])).unwrap(), Settings::default());
    }

    #[test]
    fn overrides_from_lookup() {
        let s = Settings::from_lookup(lookup(&[
            ("PETITION_HISTORY_URL", "http://localhost:8080/history"),
            ("PETITION_REQUEST_TIMEOUT_SECS", "5"),
            ("PETITION_UTC_OFFSET_MINUTES", "-300"),
            ("PETITION_RECENT_WINDOW_DAYS", "7"),
        ]))
        .unwrap();
        assert_eq!(s.history_url, "http://localhost:8080/history");
        assert_eq!(s.request_timeout_secs, 5);
        assert_eq!(s.calendar_utc_offset_minutes, -300);
        assert_eq!(s.recent_window_days, 7);
        assert_eq!(s.calendar_offset().unwrap().local_minus_utc(), -300 * 60);
    }

    #[test]
    fn history_file_override() {
        let s = Settings::from_lookup(lookup(&[("PETITION_HISTORY_FILE", "/tmp/history.json")])).unwrap();
        assert_eq!(s.history_file.as_deref(), Some(std::path::Path::new("/tmp/history.json")));
    }

    #[test]
    fn blank_values_are_ignored() {
        let s = Settings::from_lookup(lookup(&[("PETITION_HISTORY_URL", "  "), ("PETITION_HISTORY_FILE", "")])).unwrap();
        assert_eq!(s.history_url, DEFAULT_HISTORY_URL);
        assert!(s.history_file.is_none());
    }

    #[test]
    fn unparsable_number_is_validation_error() {
        let err = Settings::from_lookup(lookup(&[("PETITION_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, TrackerError::ValidationError(ref m) if m.contains("PETITION_REQUEST_TIMEOUT_SECS")));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("PETITION_REQUEST_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, TrackerError::ValidationError(_)));
    }

    #[test]
    fn offset_beyond_a_day_is_rejected() {
        let s = Settings {
            calendar_utc_offset_minutes: 24 * 60,
            ..Settings::default()
        };
        assert!(s.calendar_offset().is_none());
        assert!(s.validate().is_err());
    }

    #[test]
    fn non_http_url_is_rejected_without_file() {
        let s = Settings {
            history_url: "ftp://example.com/data".into(),
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn non_http_url_is_fine_with_file() {
        let s = Settings {
            history_url: String::new(),
            history_file: Some("history.json".into()),
            ..Settings::default()
        };
        assert!(s.validate().is_ok());
    }

    #[test]
    fn serde_roundtrip_json() {
        let s = Settings {
            history_file: Some("saved.json".into()),
            calendar_utc_offset_minutes: 120,
            ..Settings::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
