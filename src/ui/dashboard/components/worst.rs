//! Worst performers panel
//!
//! Bars are drawn at their rank height against a fixed axis of 100

use super::super::state::DashboardState;
use super::super::utils::hex_color;
use crate::charts::{BarChart, ChartLoad};
use crate::consts::cli_consts::ranking::BAR_AXIS_MAX;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{self, Bar, BarGroup, Block, BorderType, Borders, Padding, Paragraph};

fn render_bars(f: &mut Frame, area: Rect, chart: &BarChart, error: Option<&str>) {
    let mut notes: Vec<Line> = Vec::new();
    if let Some(reason) = error {
        notes.push(Line::styled(
            format!("Failed to load data: {}", reason),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ));
    }
    if chart.is_empty() {
        notes.push(Line::styled("No data", Style::default().fg(Color::DarkGray)));
    }
    notes.extend(
        (0..chart.labels.len())
            .filter_map(|index| chart.tooltip(index))
            .map(|tooltip| Line::styled(tooltip, Style::default().fg(Color::Gray))),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(notes.len() as u16)])
        .split(area);

    let bars: Vec<Bar> = chart
        .labels
        .iter()
        .zip(&chart.heights)
        .enumerate()
        .map(|(index, (label, height))| {
            let color = chart
                .colors
                .get(index)
                .map(|hex| hex_color(hex))
                .unwrap_or(Color::Gray);
            Bar::default()
                .value(*height)
                .text_value(String::new())
                .label(Line::from(label.clone()))
                .style(Style::default().fg(color))
        })
        .collect();

    let bar_width = if bars.is_empty() {
        1
    } else {
        (chunks[0].width / bars.len() as u16)
            .saturating_sub(1)
            .clamp(1, 12)
    };
    let bar_chart = widgets::BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .max(BAR_AXIS_MAX);
    f.render_widget(bar_chart, chunks[0]);
    f.render_widget(Paragraph::new(notes), chunks[1]);
}

/// Render the worst performers panel.
pub fn render_worst_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("WORST PERFORMERS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &state.worst {
        ChartLoad::Loading => f.render_widget(Paragraph::new("Loading..."), inner),
        ChartLoad::Ready(chart) => render_bars(f, inner, chart, None),
        ChartLoad::Failed { chart, reason } => render_bars(f, inner, chart, Some(reason)),
    }
}
