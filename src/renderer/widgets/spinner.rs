use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::runtime::SpinnerNode;

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render_spinner(frame: &mut Frame<'_>, area: Rect, view: &SpinnerNode) {
    let glyph = SPINNER_FRAMES[view.frame % SPINNER_FRAMES.len()];
    let mut spans = vec![Span::styled(glyph, Style::default().fg(Color::Cyan))];
    if let Some(label) = &view.label {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(label.clone(), Style::default().fg(Color::Gray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
