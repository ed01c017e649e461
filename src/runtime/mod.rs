mod app;
mod component;
mod dispatcher;
mod element;
mod tasks;
#[cfg(test)]
mod tests;
mod view;

pub use app::{App, AppConfig};
pub use component::{ComponentElement, ComponentFn, ComponentId, component};
pub use dispatcher::{AppMessage, Dispatcher};
pub use element::{
    AccordionItemNode, AccordionNode, BlockFrame, BlockNode, Element, FlexDirection, FlexNode,
    FormFieldNode, FormFieldStatus, FormNode, IconNode, SpinnerNode, TabNode, TabsNode, TextNode,
    ToastLevel, ToastNode, ToastStackNode,
};
pub use ratatui::style::Color;
pub use tasks::{DefaultRuntimeDriver, METADATA_POLL_INTERVAL, RuntimeDriver, spawn_metadata_watcher};
pub use view::{
    AccordionItemView, AccordionView, BlockView, FlexView, LayersView, TabView, TabsView, View,
};
