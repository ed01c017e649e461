use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::renderer::layout::{preferred_height, split_column};
use crate::runtime::AccordionView;

use super::RenderFn;

const OPEN_MARKER: &str = "▾ ";
const CLOSED_MARKER: &str = "▸ ";

/// One header line per item; open items draw their content right under the
/// header and share the rows the headers leave over.
pub fn render_accordion(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &AccordionView,
    render_child: RenderFn,
) {
    let accent = view.accent.unwrap_or(Color::Cyan);
    let mut sizes = Vec::with_capacity(view.items.len() * 2);
    for item in &view.items {
        sizes.push(Some(1));
        if let Some(content) = &item.content {
            sizes.push(preferred_height(content));
        }
    }
    let mut areas = split_column(area, &sizes).into_iter();

    for (index, item) in view.items.iter().enumerate() {
        let Some(header) = areas.next() else { break };
        let marker = if item.content.is_some() {
            OPEN_MARKER
        } else {
            CLOSED_MARKER
        };
        let mut style = Style::default().fg(accent);
        if index == view.selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(accent)),
            Span::styled(item.label.clone(), style),
        ]);
        frame.render_widget(Paragraph::new(line), header);

        if let Some(content) = &item.content {
            if let Some(body) = areas.next() {
                if body.height > 0 {
                    render_child(frame, body, content);
                }
            }
        }
    }
}
