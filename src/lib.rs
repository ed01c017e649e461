//! Record-detail pages in the terminal, driven by page-layout metadata.
//!
//! `layout` turns a record-UI metadata graph into section view-models;
//! `components` draws them as accordion, tab and card sections on a small
//! hook-based component runtime rendered with ratatui.

pub mod components;
pub mod config;
pub mod context;
pub mod events;
pub mod hooks;
pub mod layout;
pub mod metadata;
pub mod platform;
pub mod renderer;
pub mod runtime;
pub mod section;

pub use components::{CardProps, HeaderMode, IconSize, PageMode, PageProps, record_page};
pub use config::{Overrides, PageConfig};
pub use events::{FrameworkEvent, is_ctrl_c};
pub use hooks::{ReducerDispatch, RefHandle, Scope, StateHandle};
pub use layout::{SectionRequest, SectionView, extract_section, visible_sections};
pub use metadata::{LayoutMode, LayoutType, MetadataGraph};
pub use platform::Platform;
pub use runtime::{App, AppConfig, ComponentElement, Element, View, component};
