//! TUI rendering
//!
//! Layout: display and keypad stacked on the left, help on the right, and
//! an error popup over everything while an error is pending.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget, Wrap},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Screen regions of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    /// Display panel
    pub display: Rect,
    /// Keypad panel, bordered
    pub keypad: Rect,
    /// Help sidebar
    pub help: Rect,
}

impl Panels {
    /// Splits the full terminal area into panels
    #[must_use]
    pub fn split(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Min(30),    // Display + keypad
                Constraint::Length(24), // Help sidebar
            ])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Display
                Constraint::Min(8),    // Keypad
            ])
            .split(columns[0]);

        Self {
            display: rows[0],
            keypad: rows[1],
            help: columns[1],
        }
    }
}

/// Returns where the keypad is drawn inside the full terminal area
#[must_use]
pub fn keypad_area(area: Rect) -> Rect {
    Panels::split(area).keypad
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    /// Renders the display: pending expression above, entry below
    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                self.app.pending_expression(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                self.app.display().to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    /// Renders the help sidebar
    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Shortcuts
                Constraint::Length(3), // Operators
            ])
            .split(area);

        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(HELP_OPERATORS, Style::default().fg(Color::Cyan)))
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::RIGHT | Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(chunks[1], buf);
    }

    /// Renders the error popup centered in `area`
    fn render_error(&self, area: Rect, buf: &mut Buffer) {
        let Some(err) = self.app.error() else {
            return;
        };
        let popup = centered(area, 36, 6);
        Clear.render(popup, buf);

        let lines = vec![
            Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Press any key",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(" Error ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            )
            .render(popup, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let panels = Panels::split(area);
        self.render_display(panels.display, buf);
        KeypadWidget::new(self.app.keypad()).render(panels.keypad, buf);
        self.render_help(panels.help, buf);
        self.render_error(area, buf);
    }
}

/// Rectangle of at most `width` x `height` centered in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Window title
pub const TITLE: &str = " decicalc ";

/// Key bindings shown in the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("Enter", "Evaluate"),
    ("Bksp", "Delete digit"),
    ("Del", "Clear entry"),
    ("Esc", "Clear all"),
    ("F9", "Toggle sign"),
    ("%", "Percent"),
    ("Ctrl+C", "Quit"),
];

/// Operators help
pub const HELP_OPERATORS: &str = "Ops: + - * / =";
