use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::renderer::layout::split_column;
use crate::runtime::{FormFieldNode, FormFieldStatus, FormNode};

pub fn render_form(frame: &mut Frame<'_>, area: Rect, view: &FormNode) {
    if view.rows.is_empty() {
        return;
    }
    let columns = view.columns.max(1);
    let heights: Vec<Option<u16>> = view
        .rows
        .iter()
        .map(|row| {
            let caption = row.iter().any(|field| field.caption.is_some());
            Some(2 + u16::from(caption))
        })
        .collect();
    let row_areas = split_column(area, &heights);

    for (row, row_area) in view.rows.iter().zip(row_areas) {
        if row_area.height == 0 {
            break;
        }
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(row_area);
        for (field, cell) in row.iter().zip(cells.iter()) {
            render_field(frame, *cell, field);
        }
    }
}

fn render_field(frame: &mut Frame<'_>, area: Rect, field: &FormFieldNode) {
    if field.status == FormFieldStatus::Placeholder {
        return;
    }
    // Keep a gap between neighbouring cells.
    let area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    let mut label = Vec::new();
    if field.required && field.status == FormFieldStatus::Input {
        label.push(Span::styled("* ", Style::default().fg(Color::Red)));
    }
    label.push(Span::styled(
        field.label.clone(),
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![
        Line::from(label),
        Line::from(Span::styled(field.value.clone(), value_style(field))),
    ];
    if let Some(caption) = &field.caption {
        lines.push(Line::from(Span::styled(
            caption.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);

    if let (true, Some(cursor)) = (field.focused, field.cursor) {
        if area.width > 0 && area.height > 1 {
            let x = area.x + cursor.min(area.width - 1);
            frame.set_cursor(x, area.y + 1);
        }
    }
}

fn value_style(field: &FormFieldNode) -> Style {
    match field.status {
        FormFieldStatus::Input if field.focused => Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED),
        FormFieldStatus::Input => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::UNDERLINED),
        FormFieldStatus::ReadOnly => Style::default().fg(Color::White),
        FormFieldStatus::Disabled => Style::default().fg(Color::DarkGray),
        FormFieldStatus::Placeholder => Style::default(),
    }
}
