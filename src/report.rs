//! Plain-text rendering of dashboard components for the console.

use crate::auth::SessionUser;
use crate::charts::{BarChart, ChartLoad, DoughnutChart};
use crate::consts::cli_consts::ranking::BAR_AXIS_MAX;
use crate::history::{HistoryRow, HistoryTable, record_count_label};
use crate::workers::ComponentUpdate;

const BAR_WIDTH: u64 = 20;

pub fn user_lines(user: &SessionUser) -> Vec<String> {
    let mut lines = vec![
        format!("User: {}", user.username),
        format!("Role: {} -> {}", user.role, user.destination()),
    ];
    if !user.designation.is_empty() {
        lines.push(format!("Designation: {}", user.designations.join(" | ")));
    }
    match &user.performance {
        Some(performance) => {
            lines.push(format!(
                "Target: {}  Actual: {}  % Work Not Done: {}",
                performance.target, performance.actual_work_done, performance.work_not_done
            ));
            lines.push(format!(
                "% On Time: {}  Week Pending: {}",
                performance.work_not_done_on_time, performance.week_pending
            ));
        }
        None => lines.push("No performance data".to_string()),
    }
    lines
}

fn failure_line<T>(load: &ChartLoad<T>) -> Option<String> {
    match load {
        ChartLoad::Failed { reason, .. } => Some(format!("Failed to load data: {}", reason)),
        _ => None,
    }
}

pub fn best_lines(load: &ChartLoad<DoughnutChart>) -> Vec<String> {
    let mut lines = vec!["Best Performers".to_string()];
    lines.extend(failure_line(load));
    let Some(chart) = load.chart() else {
        lines.push("Loading...".to_string());
        return lines;
    };
    if chart.is_empty() {
        lines.push("No data".to_string());
    }
    for index in 0..chart.labels.len() {
        if let Some(tooltip) = chart.tooltip(index) {
            lines.push(format!("{:>2}. {}", index + 1, tooltip));
        }
    }
    lines
}

fn bar(height: u64) -> String {
    let filled = (height.min(BAR_AXIS_MAX) * BAR_WIDTH / BAR_AXIS_MAX) as usize;
    format!(
        "{}{}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH as usize - filled)
    )
}

pub fn worst_lines(load: &ChartLoad<BarChart>) -> Vec<String> {
    let mut lines = vec!["Worst Performers".to_string()];
    lines.extend(failure_line(load));
    let Some(chart) = load.chart() else {
        lines.push("Loading...".to_string());
        return lines;
    };
    if chart.is_empty() {
        lines.push("No data".to_string());
    }
    for (index, height) in chart.heights.iter().enumerate() {
        let tooltip = chart.tooltip(index).unwrap_or_default();
        lines.push(format!("{:>2}. [{}] {}", index + 1, bar(*height), tooltip));
    }
    lines
}

fn fit(text: &str, width: usize) -> String {
    let mut cell: String = text.chars().take(width).collect();
    let len = cell.chars().count();
    cell.extend(std::iter::repeat_n(' ', width - len));
    cell
}

pub fn history_lines(table: &HistoryTable, rows: &[&HistoryRow]) -> Vec<String> {
    let mut lines = vec![format!(
        "History Records ({})",
        record_count_label(rows.len())
    )];
    let header: Vec<String> = table
        .headers
        .iter()
        .map(|h| fit(&h.label, h.width as usize))
        .collect();
    lines.push(format!("{:>4}  {}", "#", header.join(" ")).trim_end().to_string());
    for row in rows {
        let cells: Vec<String> = table
            .headers
            .iter()
            .enumerate()
            .map(|(position, h)| fit(&row.cell_text(position), h.width as usize))
            .collect();
        lines.push(
            format!("{:>4}  {}", row.row_index, cells.join(" "))
                .trim_end()
                .to_string(),
        );
    }
    lines
}

/// Prints a finished component load.
pub fn print_update(update: &ComponentUpdate) {
    let lines = match update {
        ComponentUpdate::Best(load) => best_lines(load),
        ComponentUpdate::Worst(load) => worst_lines(load),
        ComponentUpdate::History(Ok(table)) => {
            history_lines(table, &table.rows.iter().collect::<Vec<_>>())
        }
        ComponentUpdate::History(Err(message)) => vec![format!("Error: {}", message)],
        ComponentUpdate::Avatar(_) | ComponentUpdate::Login(_) => return,
    };
    for line in lines {
        println!("{}", line);
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gviz::parse_response;

    const PERFORMANCE: &str = r#"x({"table":{"rows":[
        {"c":[null,null,{"v":"A"},{"v":10},{"v":10},{"v":0}]},
        {"c":[null,null,{"v":"B"},{"v":10},{"v":5},{"v":-30}]}
    ]}})"#;

    #[test]
    fn test_best_lines_list_tooltips_in_rank_order() {
        let chart = DoughnutChart::from_table(&parse_response(PERFORMANCE).unwrap());
        assert_eq!(
            best_lines(&ChartLoad::Ready(chart)),
            vec!["Best Performers", " 1. A: 0", " 2. B: -30"]
        );
    }

    #[test]
    fn test_worst_lines_draw_rank_bars() {
        let chart = BarChart::from_table(&parse_response(PERFORMANCE).unwrap());
        let lines = worst_lines(&ChartLoad::Ready(chart));
        assert_eq!(
            lines[1],
            " 1. [####################] B: -30% work not done"
        );
        assert_eq!(
            lines[2],
            " 2. [#################...] A: 0% work not done"
        );
    }

    #[test]
    fn test_failed_chart_shows_reason_and_placeholder() {
        let load = ChartLoad::Failed {
            chart: BarChart::error(),
            reason: "No table data found".to_string(),
        };
        let lines = worst_lines(&load);
        assert_eq!(lines[1], "Failed to load data: No table data found");
        assert_eq!(lines[2], " 1. [##########..........] Error loading data");
        assert_eq!(
            best_lines(&ChartLoad::Loading),
            vec!["Best Performers", "Loading..."]
        );
    }

    #[test]
    fn test_history_lines_pad_to_column_widths() {
        let table = HistoryTable::from_table(
            &parse_response(
                r#"x({"table":{"cols":[{"id":"A","label":"Status"}],"rows":[{"c":[{"v":"Done"}]}]}})"#,
            )
            .unwrap(),
        );
        let rows: Vec<_> = table.rows.iter().collect();
        assert_eq!(
            history_lines(&table, &rows),
            vec!["History Records (1 Record)", "   #  Status", "   1  Done"]
        );
    }
}
