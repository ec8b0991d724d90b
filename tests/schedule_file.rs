// Integration tests for loading schedule tables from disk
use chrono::{TimeZone, Utc};
use exam_schedule::ScheduleError;
use exam_schedule::schedule::load_schedule;
use pretty_assertions::assert_eq;
use std::io::Write;

#[tokio::test]
async fn test_load_schedule_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{
            "headline": "Spring exams",
            "anchor": {{ "fixed": "2025-03-07T08:00:00Z" }},
            "calendar": [ {{ "hijri": "7 Ramadan 1446", "gregorian": "7 March 2025" }} ],
            "events": [
                {{ "id": 10, "day_offset": 0, "title": "Part one", "parts": ["1", "2"] }},
                {{ "id": 11, "day_offset": 1, "title": "Part two" }}
            ]
        }}"#
    )
    .unwrap();

    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    let schedule = load_schedule(file.path(), &now).await.expect("Failed to load schedule");

    assert_eq!(schedule.headline, "Spring exams");
    let start = Utc.with_ymd_and_hms(2025, 3, 7, 8, 0, 0).unwrap().timestamp_millis();
    let dates: Vec<i64> = schedule.events.iter().map(|e| e.date - start).collect();
    assert_eq!(dates, vec![0, 86_400_000]);
    // Second event reuses the only calendar entry.
    assert_eq!(schedule.labels_for(1).map(|l| l.gregorian.as_str()), Some("7 March 2025"));
}

#[tokio::test]
async fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = load_schedule(&path, &Utc::now()).await.unwrap_err();
    match err {
        ScheduleError::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ \"events\": [").unwrap();
    let err = load_schedule(file.path(), &Utc::now()).await.unwrap_err();
    assert!(matches!(err, ScheduleError::Parse(_)));
}
