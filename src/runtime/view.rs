use ratatui::style::Color;

use super::element::{BlockFrame, FlexDirection, FormNode, IconNode, SpinnerNode, TextNode, ToastStackNode};

/// Resolved tree the renderer draws. Components are gone; leaf nodes are
/// carried over from the element tree as-is.
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    Empty,
    Text(TextNode),
    Flex(FlexView),
    Block(BlockView),
    Form(FormNode),
    Accordion(AccordionView),
    Tabs(TabsView),
    Spinner(SpinnerNode),
    Icon(IconNode),
    Layered(LayersView),
    ToastStack(ToastStackNode),
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlexView {
    pub direction: FlexDirection,
    pub children: Vec<View>,
    pub weights: Vec<u32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BlockView {
    pub title: Option<String>,
    pub child: Option<Box<View>>,
    pub frame: BlockFrame,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccordionView {
    pub items: Vec<AccordionItemView>,
    pub selected: usize,
    pub accent: Option<Color>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AccordionItemView {
    pub label: String,
    pub content: Option<View>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabsView {
    pub tabs: Vec<TabView>,
    pub active: usize,
    pub accent: Option<Color>,
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TabView {
    pub label: String,
    pub content: View,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LayersView {
    pub layers: Vec<View>,
}
