use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;

use crate::runtime::IconNode;

pub fn render_icon(frame: &mut Frame<'_>, area: Rect, view: &IconNode) {
    let badge = Rect {
        width: view.width.min(area.width),
        height: 1,
        ..area
    };
    let style = Style::default()
        .fg(Color::White)
        .bg(view.background.unwrap_or(Color::DarkGray))
        .add_modifier(Modifier::BOLD);
    let widget = Paragraph::new(view.glyph.clone())
        .alignment(Alignment::Center)
        .style(style);
    frame.render_widget(widget, badge);

    if let Some(label) = &view.label {
        let offset = badge.width + 1;
        if area.width > offset {
            let rest = Rect {
                x: area.x + offset,
                width: area.width - offset,
                height: 1,
                ..area
            };
            let label = Paragraph::new(label.clone())
                .style(Style::default().add_modifier(Modifier::BOLD));
            frame.render_widget(label, rest);
        }
    }
}
