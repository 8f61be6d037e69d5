//! Dashboard header component
//!
//! Renders the title and the signed-in user

use super::super::state::DashboardState;
use crate::drive::Avatar;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

fn avatar_span(avatar: Option<&Avatar>, tick: usize) -> Span<'static> {
    match avatar {
        Some(Avatar::Image(_)) => Span::styled(
            "[IMG]",
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        ),
        Some(Avatar::Initials(letters)) => Span::styled(
            format!("[{}]", letters),
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
        ),
        None => {
            const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
            Span::styled(
                format!("[{}]", SPINNER[(tick / 2) % SPINNER.len()]),
                Style::default().fg(Color::DarkGray),
            )
        }
    }
}

/// Render header with title and user summary.
pub fn render_header(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title = Paragraph::new(format!("KPI DASHBOARD v{}", env!("CARGO_PKG_VERSION")))
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let user = &state.user;
    let label = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        avatar_span(state.avatar.as_ref(), state.tick),
        Span::raw(" "),
        Span::styled(
            user.username.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Role: ", label),
        Span::styled(
            format!("{} ({})", user.role, user.destination()),
            if user.is_admin() {
                Style::default().fg(Color::LightMagenta)
            } else {
                Style::default()
            },
        ),
    ];
    if !user.designations.is_empty() {
        spans.push(Span::styled("  Designation: ", label));
        spans.push(Span::raw(user.designations.join(" | ")));
    }
    match &user.performance {
        Some(performance) => {
            spans.push(Span::styled("  Target: ", label));
            spans.push(Span::raw(performance.target.clone()));
            spans.push(Span::styled("  Actual: ", label));
            spans.push(Span::raw(performance.actual_work_done.clone()));
            spans.push(Span::styled("  Not Done: ", label));
            spans.push(Span::styled(
                performance.work_not_done.clone(),
                Style::default().fg(Color::LightYellow),
            ));
        }
        None => spans.push(Span::styled("  No performance data", label)),
    }

    let summary = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(summary, header_chunks[1]);
}
