//! Record page components built on the layout view-models.

mod accordion;
mod container;
mod errors;
mod focus;
mod object_icon;
mod page;
mod section;
mod section_card;
mod tabs;
#[cfg(test)]
mod tests;

pub use accordion::section_accordion;
pub use container::ContainerProps;
pub use errors::errors_panel;
pub use focus::{
    CONTAINER_REGION, PageFocus, TOAST_TTL, TimedToast, Toasts, card_region, expire_toasts,
    toast_stack,
};
pub use object_icon::{IconSize, ObjectIconProps, icon_node, object_icon, parse_hex_color};
pub use page::{PageMode, PageProps, ParsePageModeError, record_page};
pub use section::{SUCCESS_TOAST, SectionProps, section, section_form};
pub use section_card::{CardProps, HeaderMode, section_card};
pub use tabs::section_tabs;
