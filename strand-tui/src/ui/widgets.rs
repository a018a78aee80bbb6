//! Widgets for the strand TUI: the two text boxes and the main menu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// The narrator's text box, fed from the reveal buffer.
pub struct NarratorBox<'a> {
    text: &'a str,
    revealing: bool,
}

impl<'a> NarratorBox<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            revealing: false,
        }
    }

    pub fn revealing(mut self, revealing: bool) -> Self {
        self.revealing = revealing;
        self
    }
}

impl Widget for NarratorBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Narrator ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(area);
        block.render(area, buf);

        let style = Style::default().fg(Color::White);
        let mut lines: Vec<Line> = self
            .text
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), style)))
            .collect();
        if self.revealing {
            lines.push(Line::from(Span::styled(
                "▌",
                style.add_modifier(Modifier::DIM),
            )));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// The player's text box, showing the pending typed command.
pub struct PlayerBox<'a> {
    content: &'a str,
    active: bool,
}

impl<'a> PlayerBox<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            active: false,
        }
    }

    /// Whether the engine is waiting for keyword input.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

impl Widget for PlayerBox<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .title(" You ")
            .borders(Borders::ALL)
            .border_style(border);
        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(self.content),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}

/// The main menu item list.
pub struct MenuWidget<'a> {
    items: &'a [&'a str],
    selected: usize,
}

impl<'a> MenuWidget<'a> {
    pub fn new(items: &'a [&'a str], selected: usize) -> Self {
        Self { items, selected }
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.selected {
                    Line::from(Span::styled(
                        format!("> {item}"),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::raw(format!("  {item}")))
                }
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }
}
