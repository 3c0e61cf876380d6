//! Category counts for the stop reports.

use crate::core::{StopEvent, StopField};
use std::collections::{BTreeMap, BTreeSet};

/// Number of stops for one category value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Per-stage stop count with the users and parts involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBreakdown {
    pub stage_serial: String,
    pub count: usize,
    /// Sorted distinct user names joined with ", "
    pub users: String,
    /// Sorted distinct part numbers joined with ", "
    pub parts: String,
}

impl StageBreakdown {
    /// Hover label shown on the stage chart.
    pub fn hover_text(&self) -> String {
        format!(
            "Stage: {}<br>Stops: {}<br>Users: {}<br>Parts: {}",
            self.stage_serial, self.count, self.users, self.parts
        )
    }
}

/// Count stops per distinct value of `field`, largest first. Ties are
/// ordered by category name.
pub fn count_by(events: &[StopEvent], field: StopField) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for event in events {
        *counts.entry(event.field(field)).or_default() += 1;
    }

    let mut result: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    sort_descending(&mut result, |c: &CategoryCount| c.count);
    result
}

/// Per-stage counts plus the distinct users and parts seen on each stage,
/// largest first.
pub fn stage_breakdown(events: &[StopEvent]) -> Vec<StageBreakdown> {
    #[derive(Default)]
    struct Accumulator<'a> {
        count: usize,
        users: BTreeSet<&'a str>,
        parts: BTreeSet<&'a str>,
    }

    let mut stages: BTreeMap<&str, Accumulator<'_>> = BTreeMap::new();
    for event in events {
        let acc = stages.entry(event.stage_serial.as_str()).or_default();
        acc.count += 1;
        acc.users.insert(event.user_name.as_str());
        acc.parts.insert(event.part_number.as_str());
    }

    let mut result: Vec<StageBreakdown> = stages
        .into_iter()
        .map(|(stage, acc)| StageBreakdown {
            stage_serial: stage.to_string(),
            count: acc.count,
            users: join_sorted(acc.users),
            parts: join_sorted(acc.parts),
        })
        .collect();
    sort_descending(&mut result, |s: &StageBreakdown| s.count);
    result
}

fn join_sorted(values: BTreeSet<&str>) -> String {
    values.into_iter().collect::<Vec<_>>().join(", ")
}

// Input arrives in ascending key order, so a stable sort keeps ties by name.
fn sort_descending<T, F>(items: &mut [T], count: F)
where
    F: Fn(&T) -> usize,
{
    items.sort_by(|a, b| count(b).cmp(&count(a)));
}
