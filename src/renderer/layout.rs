use ratatui::layout::Rect;

use crate::runtime::{FlexDirection, View};

/// Rows a view needs when drawn at its natural size. `None` means it takes
/// whatever space it is given.
pub fn preferred_height(view: &View) -> Option<u16> {
    match view {
        View::Empty => Some(0),
        View::Text(_) | View::Spinner(_) | View::Icon(_) => Some(1),
        View::Form(form) => Some(
            form.rows
                .iter()
                .map(|row| {
                    let caption = row.iter().any(|field| field.caption.is_some());
                    2 + u16::from(caption)
                })
                .sum(),
        ),
        View::Block(block) => {
            let border = if block.frame.bordered { 2 } else { 0 };
            let chrome = border + block.frame.padding * 2;
            match block.child.as_deref() {
                Some(child) => preferred_height(child).map(|height| height + chrome),
                None => Some(chrome),
            }
        }
        View::Flex(flex) => {
            if !flex.weights.is_empty() && flex.direction == FlexDirection::Column {
                return None;
            }
            let heights = flex
                .children
                .iter()
                .map(preferred_height)
                .collect::<Option<Vec<_>>>()?;
            match flex.direction {
                FlexDirection::Column => Some(heights.iter().sum()),
                FlexDirection::Row => heights.into_iter().max(),
            }
        }
        View::Accordion(accordion) => {
            let headers = accordion.items.len() as u16;
            let mut body = 0;
            for item in &accordion.items {
                if let Some(content) = &item.content {
                    body += preferred_height(content)?;
                }
            }
            Some(headers + body)
        }
        View::Tabs(_) | View::Layered(_) | View::ToastStack(_) => None,
    }
}

/// Splits `area` top to bottom. Sized entries get their height while space
/// lasts; unsized ones share what remains.
pub(crate) fn split_column(area: Rect, sizes: &[Option<u16>]) -> Vec<Rect> {
    let fixed: u16 = sizes.iter().flatten().copied().sum();
    let flexible = sizes.iter().filter(|size| size.is_none()).count() as u16;
    let spare = area.height.saturating_sub(fixed);
    let share = if flexible > 0 { spare / flexible } else { 0 };
    let mut leftover = if flexible > 0 { spare % flexible } else { 0 };

    let mut y = area.y;
    let bottom = area.y + area.height;
    let mut rects = Vec::with_capacity(sizes.len());
    for size in sizes {
        let wanted = match size {
            Some(height) => *height,
            None => {
                let extra = u16::from(leftover > 0);
                leftover = leftover.saturating_sub(1);
                share + extra
            }
        };
        let height = wanted.min(bottom.saturating_sub(y));
        rects.push(Rect::new(area.x, y, area.width, height));
        y += height;
    }
    rects
}
