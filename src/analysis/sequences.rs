//! Consecutive stop sequences by (test name, stage serial).
//!
//! Events are ordered by test name, stage serial, then time. A sequence is a
//! maximal run of adjacent events sharing the same (test, stage) pair. There
//! is no time window and no user constraint: two stops on the same stage a
//! year apart still belong to one sequence.

use crate::core::{SequenceSummary, SequencedStop, StopEvent};
use std::collections::BTreeMap;

/// Assign sequence ids and per-sequence indices.
///
/// Returns the events re-sorted by (test_name, stage_serial, test_datetime).
/// `sequence_id` starts at 1 and increments exactly when the (test, stage)
/// key changes; `sequence_index` restarts at 1 on each change.
pub fn assign_sequences(events: &[StopEvent]) -> Vec<SequencedStop> {
    let mut sorted = events.to_vec();
    sorted.sort_by(|a, b| {
        a.test_name
            .cmp(&b.test_name)
            .then_with(|| a.stage_serial.cmp(&b.stage_serial))
            .then_with(|| a.test_datetime.cmp(&b.test_datetime))
    });

    let mut sequenced = Vec::with_capacity(sorted.len());
    let mut current_id = 0u32;
    let mut current_index = 0u32;
    let mut last_key: Option<(String, String)> = None;

    for event in sorted {
        let same_key = last_key
            .as_ref()
            .is_some_and(|(test, stage)| (test.as_str(), stage.as_str()) == event.test_stage_key());

        if same_key {
            current_index += 1;
        } else {
            current_id += 1;
            current_index = 1;
            last_key = Some((event.test_name.clone(), event.stage_serial.clone()));
        }

        sequenced.push(SequencedStop {
            event,
            sequence_id: current_id,
            sequence_index: current_index,
        });
    }

    log::debug!(
        "Assigned {} sequence(s) across {} stop event(s)",
        current_id,
        sequenced.len()
    );
    sequenced
}

/// Summarize each sequence: time span, length, and first-seen attributes.
///
/// Attributes take the first non-empty value in scan order.
pub fn summarize_sequences(sequenced: &[SequencedStop]) -> Vec<SequenceSummary> {
    let mut summaries: BTreeMap<u32, SequenceSummary> = BTreeMap::new();

    for stop in sequenced {
        let event = &stop.event;
        summaries
            .entry(stop.sequence_id)
            .and_modify(|summary| {
                summary.start_time = summary.start_time.min(event.test_datetime);
                summary.end_time = summary.end_time.max(event.test_datetime);
                summary.num_stops = summary.num_stops.max(stop.sequence_index);
                fill_if_empty(&mut summary.user_name, &event.user_name);
                fill_if_empty(&mut summary.test_name, &event.test_name);
                fill_if_empty(&mut summary.part_number, &event.part_number);
                fill_if_empty(&mut summary.stage_serial, &event.stage_serial);
            })
            .or_insert_with(|| SequenceSummary {
                sequence_id: stop.sequence_id,
                start_time: event.test_datetime,
                end_time: event.test_datetime,
                num_stops: stop.sequence_index,
                user_name: event.user_name.clone(),
                test_name: event.test_name.clone(),
                part_number: event.part_number.clone(),
                stage_serial: event.stage_serial.clone(),
            });
    }

    summaries.into_values().collect()
}

fn fill_if_empty(slot: &mut String, candidate: &str) {
    if slot.is_empty() && !candidate.is_empty() {
        *slot = candidate.to_string();
    }
}

/// Sequence analysis output: annotated events plus one summary per sequence.
#[derive(Debug, Clone, Default)]
pub struct SequenceAnalysis {
    pub stops: Vec<SequencedStop>,
    pub summaries: Vec<SequenceSummary>,
}

impl SequenceAnalysis {
    /// Longest sequence length, or 0 when there are no sequences.
    pub fn max_length(&self) -> u32 {
        self.summaries.iter().map(|s| s.num_stops).max().unwrap_or(0)
    }
}

pub fn analyze_sequences(events: &[StopEvent]) -> SequenceAnalysis {
    let stops = assign_sequences(events);
    let summaries = summarize_sequences(&stops);
    SequenceAnalysis { stops, summaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn at(hours: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(hours)
    }

    fn event(user: &str, test: &str, hours: i64, part: &str, stage: &str) -> StopEvent {
        StopEvent {
            user_name: user.to_string(),
            test_name: test.to_string(),
            test_datetime: at(hours),
            part_number: part.to_string(),
            stage_serial: stage.to_string(),
        }
    }

    #[test]
    fn test_empty_input_yields_empty_outputs() {
        let analysis = analyze_sequences(&[]);
        assert!(analysis.stops.is_empty());
        assert!(analysis.summaries.is_empty());
        assert_eq!(analysis.max_length(), 0);
    }

    #[test]
    fn test_single_event_is_sequence_of_one() {
        let analysis = analyze_sequences(&[event("a", "T1", 0, "P1", "S1")]);
        assert_eq!(analysis.summaries.len(), 1);
        assert_eq!(analysis.summaries[0].num_stops, 1);
        assert_eq!(analysis.summaries[0].start_time, analysis.summaries[0].end_time);
    }

    #[test]
    fn test_groups_by_test_and_stage_regardless_of_time_order() {
        let events = vec![
            event("a", "T2", 0, "P1", "S1"),
            event("b", "T1", 1, "P1", "S2"),
            event("c", "T1", 2, "P1", "S1"),
            event("d", "T2", 3, "P1", "S1"),
            event("e", "T1", 4, "P1", "S1"),
        ];
        let stops = assign_sequences(&events);

        let annotated: Vec<_> = stops
            .iter()
            .map(|s| (s.event.user_name.as_str(), s.sequence_id, s.sequence_index))
            .collect();
        assert_eq!(
            annotated,
            vec![
                ("c", 1, 1),
                ("e", 1, 2),
                ("b", 2, 1),
                ("a", 3, 1),
                ("d", 3, 2),
            ]
        );
    }

    #[test]
    fn test_elapsed_time_never_breaks_a_sequence() {
        let events = vec![
            event("a", "T1", 0, "P1", "S1"),
            event("b", "T1", 24 * 365, "P2", "S1"),
        ];
        let summaries = analyze_sequences(&events).summaries;
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_stops, 2);
        assert_eq!(summaries[0].start_time, at(0));
        assert_eq!(summaries[0].end_time, at(24 * 365));
    }

    #[test]
    fn test_summary_takes_first_seen_attributes() {
        let events = vec![
            event("late", "T1", 5, "P9", "S1"),
            event("", "T1", 1, "", "S1"),
            event("mid", "T1", 3, "P3", "S1"),
        ];
        let summary = &analyze_sequences(&events).summaries[0];

        assert_eq!(summary.user_name, "mid");
        assert_eq!(summary.part_number, "P3");
        assert_eq!(summary.test_name, "T1");
        assert_eq!(summary.stage_serial, "S1");
        assert_eq!(summary.num_stops, 3);
    }

    fn arb_event() -> impl Strategy<Value = StopEvent> {
        (
            prop::sample::select(vec!["T1", "T2", "T3"]),
            prop::sample::select(vec!["S1", "S2"]),
            0i64..500,
        )
            .prop_map(|(test, stage, hours)| event("u", test, hours, "P", stage))
    }

    proptest! {
        /// Property: sequence ids are contiguous 1..=K and indices restart at
        /// 1 with no gaps inside each sequence.
        #[test]
        fn test_ids_and_indices_are_contiguous(events in prop::collection::vec(arb_event(), 0..60)) {
            let stops = assign_sequences(&events);
            prop_assert_eq!(stops.len(), events.len());

            let mut expected_id = 0u32;
            let mut expected_index = 0u32;
            for stop in &stops {
                if stop.sequence_index == 1 {
                    expected_id += 1;
                    expected_index = 1;
                } else {
                    expected_index += 1;
                }
                prop_assert_eq!(stop.sequence_id, expected_id);
                prop_assert_eq!(stop.sequence_index, expected_index);
            }
        }

        /// Property: a boundary occurs exactly where the (test, stage) key
        /// changes between adjacent rows.
        #[test]
        fn test_boundaries_match_key_changes(events in prop::collection::vec(arb_event(), 1..60)) {
            let stops = assign_sequences(&events);
            for pair in stops.windows(2) {
                let key_changed = pair[0].event.test_stage_key() != pair[1].event.test_stage_key();
                let id_changed = pair[0].sequence_id != pair[1].sequence_id;
                prop_assert_eq!(key_changed, id_changed);
            }
        }

        /// Property: summary num_stops values add up to the event count.
        #[test]
        fn test_summary_lengths_cover_all_events(events in prop::collection::vec(arb_event(), 0..60)) {
            let analysis = analyze_sequences(&events);
            let total: u32 = analysis.summaries.iter().map(|s| s.num_stops).sum();
            prop_assert_eq!(total as usize, events.len());
            for (i, summary) in analysis.summaries.iter().enumerate() {
                prop_assert_eq!(summary.sequence_id as usize, i + 1);
                prop_assert!(summary.start_time <= summary.end_time);
            }
        }
    }
}
