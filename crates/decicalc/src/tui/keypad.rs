//! On-screen keypad for the terminal front end
//!
//! Buttons can be clicked with the mouse and light up when the matching key
//! is pressed, so keyboard and mouse users see the same thing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::core::{CalcEvent, Digit, Operation};

/// Visual category of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// 0 through 9
    Digit,
    /// The four operators and `=`
    Operator,
    /// CE, C and backspace
    Clear,
    /// Dot, sign and percent
    Other,
}

impl ButtonKind {
    /// Classifies an event for styling
    #[must_use]
    pub const fn of(event: CalcEvent) -> Self {
        match event {
            CalcEvent::Operator(_) | CalcEvent::Evaluate => Self::Operator,
            CalcEvent::ClearEntry | CalcEvent::ClearAll | CalcEvent::Backspace => Self::Clear,
            CalcEvent::Digit(_) => Self::Digit,
            CalcEvent::Dot | CalcEvent::ToggleSign | CalcEvent::Percent => Self::Other,
        }
    }

    fn style(self) -> Style {
        match self {
            Self::Digit => Style::default().fg(Color::White),
            Self::Other => Style::default().fg(Color::Gray),
            Self::Operator => Style::default().fg(Color::LightBlue),
            Self::Clear => Style::default().fg(Color::LightRed),
        }
    }
}

/// A single keypad button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButton {
    /// Text on the button
    pub label: String,
    /// Event sent when the button is pressed
    pub event: CalcEvent,
    /// Styling category
    pub kind: ButtonKind,
    /// Whether the button is currently highlighted
    pub pressed: bool,
}

impl KeypadButton {
    /// Creates a button for an event
    #[must_use]
    pub fn new(event: CalcEvent) -> Self {
        Self {
            label: event.label(),
            event,
            kind: ButtonKind::of(event),
            pressed: false,
        }
    }

    /// Creates a digit button
    #[must_use]
    pub fn digit(d: u8) -> Self {
        Self::new(CalcEvent::Digit(Digit::from_literal(d)))
    }

    /// Creates an operator button
    #[must_use]
    pub fn operator(op: Operation) -> Self {
        Self::new(CalcEvent::Operator(op))
    }

    /// Sets the pressed state
    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }
}

/// The keypad layout, a 6x4 grid with three blank cells
/// ```text
/// [CE] [C ] [⌫ ] [/ ]
/// [7 ] [8 ] [9 ] [* ]
/// [4 ] [5 ] [6 ] [- ]
/// [1 ] [2 ] [3 ] [+ ]
/// [± ] [0 ] [. ] [= ]
/// [% ]
/// ```
#[derive(Debug, Clone)]
pub struct Keypad {
    /// Cells in row-major order; `None` is an empty cell
    cells: Vec<Option<KeypadButton>>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard desk calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let cells = vec![
            // Row 1: CE C ⌫ /
            Some(KeypadButton::new(CalcEvent::ClearEntry)),
            Some(KeypadButton::new(CalcEvent::ClearAll)),
            Some(KeypadButton::new(CalcEvent::Backspace)),
            Some(KeypadButton::operator(Operation::Divide)),
            // Row 2: 7 8 9 *
            Some(KeypadButton::digit(7)),
            Some(KeypadButton::digit(8)),
            Some(KeypadButton::digit(9)),
            Some(KeypadButton::operator(Operation::Multiply)),
            // Row 3: 4 5 6 -
            Some(KeypadButton::digit(4)),
            Some(KeypadButton::digit(5)),
            Some(KeypadButton::digit(6)),
            Some(KeypadButton::operator(Operation::Subtract)),
            // Row 4: 1 2 3 +
            Some(KeypadButton::digit(1)),
            Some(KeypadButton::digit(2)),
            Some(KeypadButton::digit(3)),
            Some(KeypadButton::operator(Operation::Add)),
            // Row 5: ± 0 . =
            Some(KeypadButton::new(CalcEvent::ToggleSign)),
            Some(KeypadButton::digit(0)),
            Some(KeypadButton::new(CalcEvent::Dot)),
            Some(KeypadButton::new(CalcEvent::Evaluate)),
            // Row 6: %
            Some(KeypadButton::new(CalcEvent::Percent)),
            None,
            None,
            None,
        ];

        Self {
            cells,
            cols: 4,
            rows: 6,
        }
    }

    /// Returns the number of buttons (blank cells excluded)
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets the button in a cell, if the cell is not blank
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.cells.get(index).and_then(Option::as_ref)
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        if row < self.rows && col < self.cols {
            self.get_button(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by its label
    #[must_use]
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|b| b.label == label))
    }

    /// Finds the button that sends `event`
    #[must_use]
    pub fn find_by_event(&self, event: CalcEvent) -> Option<usize> {
        self.cells
            .iter()
            .position(|cell| cell.as_ref().is_some_and(|b| b.event == event))
    }

    /// Releases all buttons
    pub fn release_all(&mut self) {
        for btn in self.cells.iter_mut().flatten() {
            btn.set_pressed(false);
        }
    }

    /// Highlights only the button that sends `event`
    pub fn highlight(&mut self, event: CalcEvent) {
        self.release_all();
        if let Some(btn) = self
            .cells
            .iter_mut()
            .flatten()
            .find(|b| b.event == event)
        {
            btn.set_pressed(true);
        }
    }

    /// Returns the highlighted button, if any
    #[must_use]
    pub fn pressed(&self) -> Option<&KeypadButton> {
        self.cells.iter().flatten().find(|b| b.pressed)
    }

    /// Returns an iterator over buttons with their (row, col) positions
    pub fn buttons_with_positions(&self) -> impl Iterator<Item = ((usize, usize), &KeypadButton)> {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.as_ref().map(|btn| ((i / self.cols, i % self.cols), btn))
        })
    }

    /// Converts a click position inside the bordered `area` to a cell index
    #[must_use]
    pub fn hit_test(&self, area: Rect, x: u16, y: u16) -> Option<usize> {
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }

        let rel_x = x - area.x;
        let rel_y = y - area.y;

        // Border is one cell on each side
        if rel_x == 0 || rel_y == 0 || rel_x >= area.width - 1 || rel_y >= area.height - 1 {
            return None;
        }

        let btn_width = (area.width - 2) / self.cols as u16;
        let btn_height = (area.height - 2) / self.rows as u16;
        if btn_width == 0 || btn_height == 0 {
            return None;
        }

        let col = ((rel_x - 1) / btn_width) as usize;
        let row = ((rel_y - 1) / btn_height) as usize;
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    /// Returns the event of the button under a click, if any
    #[must_use]
    pub fn event_at(&self, area: Rect, x: u16, y: u16) -> Option<CalcEvent> {
        self.hit_test(area, x, y)
            .and_then(|index| self.get_button(index))
            .map(|btn| btn.event)
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self { keypad }
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let inner = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        let (rows, cols) = self.keypad.dimensions();
        if inner.width < cols as u16 || inner.height < rows as u16 {
            return;
        }

        let btn_width = inner.width / cols as u16;
        let btn_height = inner.height / rows as u16;

        for ((row, col), btn) in self.keypad.buttons_with_positions() {
            let x = inner.x + (col as u16 * btn_width);
            let y = inner.y + (row as u16 * btn_height);

            let style = if btn.pressed {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                btn.kind.style()
            };

            let label = format!("[{:^2}]", btn.label);
            let label_width = label.chars().count() as u16;
            if btn_width >= label_width {
                let label_x = x + (btn_width - label_width) / 2;
                let label_y = y + btn_height / 2;
                buf.set_span(label_x, label_y, &Span::styled(label, style), btn_width);
            }
        }
    }
}
