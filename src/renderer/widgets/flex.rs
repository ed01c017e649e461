use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::renderer::layout::{preferred_height, split_column};
use crate::runtime::{FlexDirection, FlexView};

use super::RenderFn;

pub fn render_flex(frame: &mut Frame<'_>, area: Rect, view: &FlexView, render_child: RenderFn) {
    if view.children.is_empty() {
        return;
    }

    let chunks = if !view.weights.is_empty() {
        let total: u32 = view.weights.iter().sum::<u32>().max(1);
        let constraints: Vec<Constraint> = view
            .weights
            .iter()
            .map(|weight| Constraint::Ratio(*weight, total))
            .collect();
        Layout::default()
            .direction(Direction::from(view.direction))
            .constraints(constraints)
            .split(area)
            .to_vec()
    } else {
        match view.direction {
            FlexDirection::Column => {
                let sizes: Vec<Option<u16>> =
                    view.children.iter().map(preferred_height).collect();
                split_column(area, &sizes)
            }
            FlexDirection::Row => {
                let chunk_count = view.children.len();
                let constraints = vec![Constraint::Ratio(1, chunk_count as u32); chunk_count];
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(constraints)
                    .split(area)
                    .to_vec()
            }
        }
    };
    for (child, rect) in view.children.iter().zip(chunks.iter()) {
        render_child(frame, *rect, child);
    }
}

impl From<FlexDirection> for Direction {
    fn from(value: FlexDirection) -> Self {
        match value {
            FlexDirection::Row => Direction::Horizontal,
            FlexDirection::Column => Direction::Vertical,
        }
    }
}
