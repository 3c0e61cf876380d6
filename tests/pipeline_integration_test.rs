//! End-to-end runs of the reporting pipeline against temporary directories.

use indoc::indoc;
use pretty_assertions::assert_eq;
use runlog_analyzer::io::writers::{
    read_sequence_summaries, read_stop_events, SEQUENCE_COLUMNS, STOP_EVENT_COLUMNS,
};
use runlog_analyzer::{run_analysis, RunLogConfig, RunLogError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "Run ID,Aborted,User Name,Test Name,Test Date Time,Part Number,Stage Serial Number\n";

fn config_for(dir: &TempDir, body: &str) -> RunLogConfig {
    let input = dir.path().join("RunLog.csv");
    fs::write(&input, format!("{}{}", HEADER, body)).unwrap();
    RunLogConfig {
        input,
        output_dir: dir.path().join("output"),
        ..RunLogConfig::default()
    }
}

fn header_of(path: &Path) -> Vec<String> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    reader.headers().unwrap().iter().map(String::from).collect()
}

#[test]
fn test_scenario_two_stops_one_sequence() {
    let dir = TempDir::new().unwrap();
    let config = config_for(
        &dir,
        indoc! {"
            1,Stopped,alice,T1,2024-01-01 08:00:00,P1,S1
            2,Completed,bob,T1,2024-01-01 09:00:00,P1,S1
            3,Stopped,ALICE ,T1,2024-01-01 10:00:00,P1,S1
        "},
    );

    let report = run_analysis(&config).unwrap();
    assert_eq!(report.stop_count, 2);
    assert_eq!(report.sequence_count, 1);
    assert_eq!(report.category_charts.len(), 4);
    assert!(report.histogram.is_some());

    let events = read_stop_events(&report.stop_events_csv).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.user_name == "alice"));

    let summaries = read_sequence_summaries(&report.sequences_csv).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].sequence_id, 1);
    assert_eq!(summaries[0].num_stops, 2);
    assert_eq!(summaries[0].start_time.to_string(), "2024-01-01 08:00:00");
    assert_eq!(summaries[0].end_time.to_string(), "2024-01-01 10:00:00");

    for path in report.output_paths() {
        assert!(path.is_file(), "missing output {}", path.display());
    }
}

#[test]
fn test_header_only_input_writes_empty_tables_and_skips_charts() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, "");

    let report = run_analysis(&config).unwrap();
    assert_eq!(report.stop_count, 0);
    assert!(report.category_charts.is_empty());
    assert!(report.histogram.is_none());

    assert_eq!(header_of(&report.stop_events_csv), STOP_EVENT_COLUMNS);
    assert_eq!(header_of(&report.sequences_csv), SEQUENCE_COLUMNS);
    assert!(read_stop_events(&report.stop_events_csv).unwrap().is_empty());

    let html_files = fs::read_dir(&config.output_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "html"))
        .count();
    assert_eq!(html_files, 0);
}

#[test]
fn test_written_tables_round_trip_with_same_shape() {
    let dir = TempDir::new().unwrap();
    let config = config_for(
        &dir,
        indoc! {r#"
            1,Stopped,alice,"Flatness, X",2024-01-01 08:00:00,P1,S1
            2,Stopped,bob,Runout,2024-01-02 08:00:00,P2,S2
            3,Stopped,carol,"Flatness, X",2024-01-03 08:00:00,,S1
            4,Stopped,dave,Runout,2024-01-04 08:00:00,P2,S1
        "#},
    );

    let report = run_analysis(&config).unwrap();

    let events = read_stop_events(&report.stop_events_csv).unwrap();
    assert_eq!(header_of(&report.stop_events_csv), STOP_EVENT_COLUMNS);
    assert_eq!(events.len(), report.stop_count);

    let summaries = read_sequence_summaries(&report.sequences_csv).unwrap();
    assert_eq!(header_of(&report.sequences_csv), SEQUENCE_COLUMNS);
    assert_eq!(summaries.len(), 3);
    let lengths: Vec<u32> = summaries.iter().map(|s| s.num_stops).collect();
    assert_eq!(lengths, vec![2, 1, 1]);
}

#[test]
fn test_stop_events_are_time_ordered_and_exclude_bad_timestamps() {
    let dir = TempDir::new().unwrap();
    let config = config_for(
        &dir,
        indoc! {"
            1,Stopped,c,T1,03/05/2024 10:00:00,P1,S1
            2,Stopped,a,T1,2024-03-01 10:00:00,P1,S1
            3,Stopped,x,T1,yesterday,P1,S1
            4,stopped ,b,T2,2024-03-03,P1,S2
        "},
    );

    let report = run_analysis(&config).unwrap();
    let events = read_stop_events(&report.stop_events_csv).unwrap();
    let users: Vec<&str> = events.iter().map(|e| e.user_name.as_str()).collect();
    assert_eq!(users, vec!["a", "b", "c"]);
    assert!(events
        .windows(2)
        .all(|w| w[0].test_datetime <= w[1].test_datetime));
}

#[test]
fn test_existing_outputs_are_overwritten() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir, "1,Stopped,a,T1,2024-01-01 00:00:00,P1,S1\n");
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("stopped_events.csv"), "stale").unwrap();

    let report = run_analysis(&config).unwrap();
    let contents = fs::read_to_string(&report.stop_events_csv).unwrap();
    assert!(contents.starts_with("user_name,"));
    assert!(!contents.contains("stale"));

    // Second run is idempotent with respect to the output directory.
    run_analysis(&config).unwrap();
}

#[test]
fn test_missing_input_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = RunLogConfig {
        input: dir.path().join("absent.csv"),
        output_dir: dir.path().join("output"),
        ..RunLogConfig::default()
    };

    let err = run_analysis(&config).unwrap_err();
    assert!(matches!(err, RunLogError::NotFound { .. }));
    assert!(!config.output_dir.exists());
}

#[test]
fn test_missing_columns_abort_before_any_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("RunLog.csv");
    fs::write(&input, "Aborted,User Name\nStopped,alice\n").unwrap();
    let config = RunLogConfig {
        input,
        output_dir: dir.path().join("output"),
        ..RunLogConfig::default()
    };

    let err = run_analysis(&config).unwrap_err();
    match err {
        RunLogError::MissingColumns { columns } => assert_eq!(
            columns,
            vec![
                "Test Name",
                "Test Date Time",
                "Part Number",
                "Stage Serial Number"
            ]
        ),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.output_dir.exists());
}

#[test]
fn test_stage_chart_embeds_users_and_parts() {
    let dir = TempDir::new().unwrap();
    let config = config_for(
        &dir,
        indoc! {"
            1,Stopped,bob,T1,2024-01-01 00:00:00,P2,S1
            2,Stopped,alice,T1,2024-01-02 00:00:00,P1,S1
        "},
    );

    run_analysis(&config).unwrap();
    let html = fs::read_to_string(config.output_dir.join("stops_per_stage.html")).unwrap();
    assert!(html.contains("Users: alice, bob"));
    assert!(html.contains("Parts: P1, P2"));
}
