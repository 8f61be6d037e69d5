//! Chart data for the performance panels.
//!
//! Each chart owns the ranked rows it was built from, so tooltips read from the
//! chart value itself.

use crate::consts::cli_consts::ranking::{BAR_STEP, BAR_TOP_HEIGHT};
use crate::gviz::{GvizTable, js_number_to_string};
use crate::performance::{PerformanceRecord, records_from_table};
use crate::ranking::{rank_best, rank_worst};

pub const BEST_COLORS: [&str; 5] = ["#4DA9A6", "#418FBC", "#8C6EC6", "#CC855C", "#CC6B7C"];

pub const WORST_COLORS: [&str; 5] = ["#EF4444", "#F97316", "#FACC15", "#8B5CF6", "#3B82F6"];

pub const ERROR_LABEL: &str = "Error loading data";

/// `Math.round`: halves round toward positive infinity.
pub fn js_round(value: f64) -> f64 {
    let rounded = value.round();
    // `f64::round` sends negative halves away from zero
    if value - rounded == 0.5 {
        rounded + 1.0
    } else {
        rounded
    }
}

/// Half-doughnut of the best performers: one slice per ranked record, sized by the
/// rounded `% work not done`.
#[derive(Debug, Clone, PartialEq)]
pub struct DoughnutChart {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub colors: Vec<&'static str>,
    ranked: Vec<PerformanceRecord>,
}

impl DoughnutChart {
    pub fn from_ranked(ranked: Vec<PerformanceRecord>) -> Self {
        let labels = ranked.iter().map(|r| r.name.clone()).collect();
        let values: Vec<f64> = ranked.iter().map(|r| js_round(r.work_not_done)).collect();
        let colors = BEST_COLORS.iter().take(values.len()).copied().collect();
        Self {
            labels,
            values,
            colors,
            ranked,
        }
    }

    /// Ranks the table's records and builds the chart.
    pub fn from_table(table: &GvizTable) -> Self {
        Self::from_ranked(rank_best(&records_from_table(table)))
    }

    /// Single-slice placeholder shown after a failed load.
    pub fn error() -> Self {
        Self {
            labels: vec![ERROR_LABEL.to_string()],
            values: vec![100.0],
            colors: vec![BEST_COLORS[0]],
            ranked: Vec::new(),
        }
    }

    pub fn ranked(&self) -> &[PerformanceRecord] {
        &self.ranked
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Tooltip text of the slice at `index`.
    pub fn tooltip(&self, index: usize) -> Option<String> {
        if let Some(item) = self.ranked.get(index) {
            return Some(format!(
                "{}: {}",
                item.name,
                js_number_to_string(item.work_not_done)
            ));
        }
        let label = self.labels.get(index)?;
        let value = self.values.get(index)?;
        Some(format!("{}: {}", label, js_number_to_string(*value)))
    }
}

/// Bar chart of the worst performers.
///
/// Bar heights come from the rank, not the data: the first bar is 100 and each
/// following one is 15 lower. The real percentage only shows in the tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: Vec<String>,
    pub heights: Vec<u64>,
    pub colors: Vec<&'static str>,
    ranked: Vec<PerformanceRecord>,
}

/// Height of the bar at rank `position`.
pub fn bar_height(position: usize) -> u64 {
    BAR_TOP_HEIGHT.saturating_sub(BAR_STEP * position as u64)
}

impl BarChart {
    pub fn from_ranked(ranked: Vec<PerformanceRecord>) -> Self {
        let labels = ranked.iter().map(|r| r.name.clone()).collect();
        let heights: Vec<u64> = (0..ranked.len()).map(bar_height).collect();
        let colors = WORST_COLORS.iter().take(heights.len()).copied().collect();
        Self {
            labels,
            heights,
            colors,
            ranked,
        }
    }

    pub fn from_table(table: &GvizTable) -> Self {
        Self::from_ranked(rank_worst(&records_from_table(table)))
    }

    /// Single-bar placeholder shown after a failed load.
    pub fn error() -> Self {
        Self {
            labels: vec![ERROR_LABEL.to_string()],
            heights: vec![50],
            colors: vec![WORST_COLORS[0]],
            ranked: Vec::new(),
        }
    }

    pub fn ranked(&self) -> &[PerformanceRecord] {
        &self.ranked
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn tooltip(&self, index: usize) -> Option<String> {
        let label = self.labels.get(index)?;
        match self.ranked.get(index) {
            Some(item) => Some(format!(
                "{}: {}% work not done",
                label,
                js_number_to_string(item.work_not_done)
            )),
            None => Some(label.clone()),
        }
    }
}

/// Lifecycle of one chart panel.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartLoad<T> {
    Loading,
    Ready(T),
    /// The load failed; `chart` is the placeholder to draw.
    Failed { chart: T, reason: String },
}

impl<T> ChartLoad<T> {
    pub fn chart(&self) -> Option<&T> {
        match self {
            ChartLoad::Loading => None,
            ChartLoad::Ready(chart) | ChartLoad::Failed { chart, .. } => Some(chart),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ChartLoad::Failed { .. })
    }
}
