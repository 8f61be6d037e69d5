//! Login screen module

use crate::auth::AuthError;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// What the app should do after a key press on the login screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginAction {
    None,
    Submit { username: String, password: String },
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    pub show_password: bool,
    pub error: Option<String>,
    /// A sign-in request is in flight; input is ignored until it returns.
    pub submitting: bool,
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> LoginAction {
        if self.submitting {
            return LoginAction::None;
        }
        match key.code {
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
            }
            KeyCode::F(2) => self.show_password = !self.show_password,
            KeyCode::Char(c) => {
                self.focused_mut().push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.focused_mut().pop();
            }
            KeyCode::Enter => return self.submit(),
            _ => {}
        }
        LoginAction::None
    }

    fn submit(&mut self) -> LoginAction {
        if self.username.is_empty() || self.password.is_empty() {
            self.error = Some(AuthError::MissingCredentials.to_string());
            return LoginAction::None;
        }
        self.error = None;
        self.submitting = true;
        LoginAction::Submit {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Records the outcome of a sign-in that did not succeed.
    pub fn fail(&mut self, message: String) {
        self.submitting = false;
        self.error = Some(message);
    }

    fn password_text(&self) -> String {
        if self.show_password {
            self.password.clone()
        } else {
            "•".repeat(self.password.chars().count())
        }
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width.min(area.width)),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

/// Renders the sign-in form.
pub fn render_login(f: &mut Frame, form: &LoginForm) {
    let area = centered(f.area(), 50, 14);
    let outer = Block::default()
        .title(" KPI DASHBOARD - Sign in ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .margin(1)
        .split(inner);

    let username = Paragraph::new(form.username.as_str()).block(field_block(
        "Username",
        form.focus == LoginField::Username,
    ));
    f.render_widget(username, chunks[0]);

    let password_title = if form.show_password {
        "Password (F2 to hide)"
    } else {
        "Password (F2 to show)"
    };
    let password = Paragraph::new(form.password_text()).block(field_block(
        password_title,
        form.focus == LoginField::Password,
    ));
    f.render_widget(password, chunks[1]);

    let status = if form.submitting {
        Line::from(Span::styled(
            "Signing in...",
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        ))
    } else if let Some(error) = &form.error {
        Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::LightRed),
        ))
    } else {
        Line::from("")
    };
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[2],
    );

    let help = Paragraph::new("[Tab] Switch field | [Enter] Sign in | [Esc] Quit")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
