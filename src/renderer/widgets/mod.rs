use ratatui::Frame;
use ratatui::layout::Rect;

use crate::runtime::View;

pub type RenderFn = fn(&mut Frame<'_>, Rect, &View);

pub mod accordion;
pub mod block;
pub mod flex;
pub mod form;
pub mod icon;
pub mod layers;
pub mod spinner;
pub mod tabs;
pub mod text;
pub mod toast;

pub use accordion::render_accordion;
pub use block::render_block;
pub use flex::render_flex;
pub use form::render_form;
pub use icon::render_icon;
pub use layers::render_layers;
pub use spinner::render_spinner;
pub use tabs::render_tabs;
pub use text::render_text;
pub use toast::render_toast_stack;
