//! Best performers panel
//!
//! One gauge per ranked slice; the gauge shows the slice's share of the doughnut

use super::super::state::DashboardState;
use super::super::utils::hex_color;
use crate::charts::{ChartLoad, DoughnutChart};

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph};

/// Share of each slice in the doughnut, in `0.0..=1.0`.
pub fn slice_ratios(chart: &DoughnutChart) -> Vec<f64> {
    let total: f64 = chart.values.iter().map(|v| v.abs()).sum();
    chart
        .values
        .iter()
        .map(|v| {
            let ratio = v.abs() / total;
            if ratio.is_finite() { ratio } else { 0.0 }
        })
        .collect()
}

fn render_slices(f: &mut Frame, area: Rect, chart: &DoughnutChart) {
    if chart.is_empty() {
        f.render_widget(
            Paragraph::new("No data").style(Style::default().fg(Color::DarkGray)),
            area,
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); chart.labels.len()])
        .split(area);

    for (index, ratio) in slice_ratios(chart).into_iter().enumerate() {
        let color = chart
            .colors
            .get(index)
            .map(|hex| hex_color(hex))
            .unwrap_or(Color::Gray);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Rgb(40, 44, 52)))
            .ratio(ratio)
            .label(chart.tooltip(index).unwrap_or_default());
        if let Some(row) = rows.get(index) {
            f.render_widget(gauge, *row);
        }
    }
}

/// Render the best performers panel.
pub fn render_best_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("BEST PERFORMERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &state.best {
        ChartLoad::Loading => f.render_widget(Paragraph::new("Loading..."), inner),
        ChartLoad::Ready(chart) => render_slices(f, inner, chart),
        ChartLoad::Failed { chart, reason } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Fill(1)])
                .split(inner);
            f.render_widget(
                Paragraph::new(Line::styled(
                    format!("Failed to load data: {}", reason),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                )),
                chunks[0],
            );
            render_slices(f, chunks[1], chart);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_ratios_use_magnitudes() {
        let mut chart = DoughnutChart::error();
        assert_eq!(slice_ratios(&chart), vec![1.0]);

        chart.values = vec![-30.0, 10.0];
        assert_eq!(slice_ratios(&chart), vec![0.75, 0.25]);

        chart.values = vec![0.0, 0.0];
        assert_eq!(slice_ratios(&chart), vec![0.0, 0.0]);

        chart.values = vec![f64::INFINITY, 5.0];
        assert_eq!(slice_ratios(&chart), vec![0.0, 0.0]);
    }
}
