use crate::runtime::{Color, Element};
use crate::section::PanelError;

/// Red panel with the top-level message and one bullet per detail.
pub fn errors_panel(error: &PanelError) -> Element {
    if error.is_empty() {
        return Element::Empty;
    }
    let mut lines = Vec::new();
    if let Some(message) = error.message.as_deref().filter(|message| !message.is_empty()) {
        lines.push(Element::strong_text(message, Some(Color::Red)));
    }
    lines.extend(
        error
            .detail_lines()
            .into_iter()
            .map(|line| Element::colored_text(line, Color::LightRed)),
    );
    Element::vstack(lines)
}
