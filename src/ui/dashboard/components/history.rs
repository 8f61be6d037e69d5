//! History grid component
//!
//! Renders the search box, the employee filter and the visible rows

use super::super::state::{DashboardState, HistoryLoad};
use crate::history::record_count_label;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};

fn render_filters(f: &mut Frame, area: Rect, state: &DashboardState) {
    let search_style = if state.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let cursor = if state.search_active && state.tick % 10 < 5 {
        "_"
    } else {
        ""
    };
    let employee = state
        .selected_employee()
        .map(|option| option.display_name.clone())
        .unwrap_or_else(|| "All Employees".to_string());

    let line = Line::from(vec![
        Span::styled("Search: ", search_style),
        Span::raw(format!("{}{}", state.search, cursor)),
        Span::styled("   Employee: ", Style::default().fg(Color::DarkGray)),
        Span::styled(employee, Style::default().fg(Color::LightCyan)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Render the history grid.
pub fn render_history_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = state.visible_rows();
    let title = match &state.history {
        HistoryLoad::Ready(_) => format!("HISTORY RECORDS ({})", record_count_label(rows.len())),
        _ => "HISTORY RECORDS".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Fill(1)])
        .split(inner);
    render_filters(f, chunks[0], state);

    let table = match &state.history {
        HistoryLoad::Loading => {
            f.render_widget(Paragraph::new("Loading history..."), chunks[1]);
            return;
        }
        HistoryLoad::Failed(message) => {
            f.render_widget(
                Paragraph::new(Line::styled(
                    format!("Error: {}", message),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                )),
                chunks[1],
            );
            return;
        }
        HistoryLoad::Ready(table) => table,
    };

    if rows.is_empty() {
        f.render_widget(
            Paragraph::new("No records found").style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );
        return;
    }

    let mut widths = vec![Constraint::Length(4)];
    widths.extend(table.headers.iter().map(|h| Constraint::Min(h.width)));

    let header = Row::new(
        std::iter::once(Cell::from("#")).chain(
            table
                .headers
                .iter()
                .map(|h| Cell::from(h.label.clone())),
        ),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let body: Vec<Row> = rows
        .iter()
        .skip(state.scroll)
        .map(|row| {
            let cells = (0..table.headers.len()).map(|position| Cell::from(row.cell_text(position)));
            Row::new(std::iter::once(Cell::from(row.row_index.to_string())).chain(cells))
        })
        .collect();

    f.render_widget(
        Table::new(body, widths).header(header).column_spacing(1),
        chunks[1],
    );
}
