//! Dashboard footer component
//!
//! Renders the key help, or the search prompt while searching

use super::super::state::DashboardState;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render enhanced footer.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let (footer_text, footer_color) = if state.search_active {
        ("[Enter/Esc] Finish search | [Backspace] Delete", Color::Yellow)
    } else {
        (
            "[/] Search | [E] Employee | [C] Clear | [↑↓] Scroll | [R] Retry | [L] Logout | [Q] Quit",
            Color::Cyan,
        )
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(footer_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
