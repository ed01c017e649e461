use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Padding};

use crate::runtime::BlockView;

use super::RenderFn;

pub fn render_block(frame: &mut Frame<'_>, area: Rect, view: &BlockView, render_child: RenderFn) {
    let borders = if view.frame.bordered {
        Borders::ALL
    } else {
        Borders::NONE
    };
    let mut widget = Block::default()
        .borders(borders)
        .padding(Padding::uniform(view.frame.padding));
    if let Some(accent) = view.frame.accent {
        widget = widget.border_style(Style::default().fg(accent));
    }
    if let Some(title) = &view.title {
        widget = widget
            .title(title.as_str())
            .title_style(Style::default().add_modifier(Modifier::BOLD));
    }
    let inner = widget.inner(area);
    frame.render_widget(widget, area);

    if let Some(child) = view.child.as_ref() {
        render_child(frame, inner, child);
    }
}
