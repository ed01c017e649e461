use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::runtime::TextNode;

pub fn render_text(frame: &mut Frame<'_>, area: Rect, view: &TextNode) {
    let mut style = Style::default().fg(view.color.unwrap_or(Color::White));
    if view.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    let widget = Paragraph::new(Line::from(view.content.clone())).style(style);
    frame.render_widget(widget, area);
}
