//! Top-five selection for the performance charts.
//!
//! Both orderings are stable and compare on, in priority order: completion,
//! `% work not done`, `% work not done on time`, `week pending`.

use crate::consts::cli_consts::ranking::MAX_RANKED;
use crate::performance::PerformanceRecord;
use std::cmp::Ordering;

/// Ordering of the "best performers" chart.
///
/// Complete records first, then higher `work_not_done`, then higher
/// `work_not_done_on_time`, then higher `week_pending`.
pub fn best_order(a: &PerformanceRecord, b: &PerformanceRecord) -> Ordering {
    b.is_complete()
        .cmp(&a.is_complete())
        .then_with(|| b.work_not_done.total_cmp(&a.work_not_done))
        .then_with(|| b.work_not_done_on_time.total_cmp(&a.work_not_done_on_time))
        .then_with(|| b.week_pending.total_cmp(&a.week_pending))
}

/// Ordering of the "worst performers" chart.
///
/// Incomplete records first, then lower (more negative) `work_not_done`, then higher
/// `work_not_done_on_time`, then higher `week_pending`.
pub fn worst_order(a: &PerformanceRecord, b: &PerformanceRecord) -> Ordering {
    a.is_complete()
        .cmp(&b.is_complete())
        .then_with(|| a.work_not_done.total_cmp(&b.work_not_done))
        .then_with(|| b.work_not_done_on_time.total_cmp(&a.work_not_done_on_time))
        .then_with(|| b.week_pending.total_cmp(&a.week_pending))
}

fn rank_by<F>(records: &[PerformanceRecord], order: F) -> Vec<PerformanceRecord>
where
    F: Fn(&PerformanceRecord, &PerformanceRecord) -> Ordering,
{
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| order(a, b));
    ranked.truncate(MAX_RANKED);
    ranked
}

/// At most five records in "best performers" order.
pub fn rank_best(records: &[PerformanceRecord]) -> Vec<PerformanceRecord> {
    rank_by(records, best_order)
}

/// At most five records in "worst performers" order.
pub fn rank_worst(records: &[PerformanceRecord]) -> Vec<PerformanceRecord> {
    rank_by(records, worst_order)
}
