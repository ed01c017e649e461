use ratatui::style::Color;

use super::component::ComponentElement;

#[derive(Clone, Debug)]
pub enum Element {
    Empty,
    Text(TextNode),
    Flex(FlexNode),
    Block(BlockNode),
    Form(FormNode),
    Accordion(AccordionNode),
    Tabs(TabsNode),
    Spinner(SpinnerNode),
    Icon(IconNode),
    Layered(Vec<Element>),
    ToastStack(ToastStackNode),
    Component(ComponentElement),
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub color: Option<Color>,
    pub bold: bool,
}

#[derive(Clone, Debug)]
pub struct FlexNode {
    pub direction: FlexDirection,
    pub children: Vec<Element>,
    /// Relative sizes of the children; empty splits evenly.
    pub weights: Vec<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
}

#[derive(Clone, Debug)]
pub struct BlockNode {
    pub title: Option<String>,
    pub child: Box<Element>,
    pub frame: BlockFrame,
}

/// Border and padding of a block, usually parsed from an outer class string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockFrame {
    pub bordered: bool,
    pub padding: u16,
    pub accent: Option<Color>,
}

impl Default for BlockFrame {
    fn default() -> Self {
        Self {
            bordered: true,
            padding: 0,
            accent: None,
        }
    }
}

impl BlockFrame {
    /// Reads whitespace separated tokens: `p-<n>` pads the content and
    /// `borderless` drops the border. Other tokens are ignored.
    pub fn from_class(class: &str) -> Self {
        let mut frame = Self::default();
        for token in class.split_whitespace() {
            if token == "borderless" {
                frame.bordered = false;
            } else if let Some(padding) = token
                .strip_prefix("p-")
                .and_then(|value| value.parse::<u16>().ok())
            {
                frame.padding = padding;
            }
        }
        frame
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }
}

impl Element {
    pub fn text(content: impl Into<String>) -> Self {
        Element::Text(TextNode {
            content: content.into(),
            color: None,
            bold: false,
        })
    }

    pub fn colored_text(content: impl Into<String>, color: Color) -> Self {
        Element::Text(TextNode {
            content: content.into(),
            color: Some(color),
            bold: false,
        })
    }

    pub fn strong_text(content: impl Into<String>, color: Option<Color>) -> Self {
        Element::Text(TextNode {
            content: content.into(),
            color,
            bold: true,
        })
    }

    pub fn vstack(children: Vec<Element>) -> Self {
        Element::Flex(FlexNode {
            direction: FlexDirection::Column,
            children,
            weights: Vec::new(),
        })
    }

    pub fn framed(title: Option<String>, frame: BlockFrame, child: Element) -> Self {
        Element::Block(BlockNode {
            title,
            child: Box::new(child),
            frame,
        })
    }

    pub fn layered(layers: Vec<Element>) -> Self {
        Element::Layered(layers)
    }

    pub fn form(node: FormNode) -> Self {
        Element::Form(node)
    }

    pub fn accordion(node: AccordionNode) -> Self {
        Element::Accordion(node)
    }

    pub fn tabs(node: TabsNode) -> Self {
        Element::Tabs(node)
    }

    pub fn spinner(node: SpinnerNode) -> Self {
        Element::Spinner(node)
    }

    pub fn icon(node: IconNode) -> Self {
        Element::Icon(node)
    }

    pub fn toasts(node: ToastStackNode) -> Self {
        Element::ToastStack(node)
    }
}

/// Grid of labelled fields, one inner vector per row.
#[derive(Clone, Debug, PartialEq)]
pub struct FormNode {
    pub rows: Vec<Vec<FormFieldNode>>,
    pub columns: usize,
}

impl FormNode {
    pub fn new(rows: Vec<Vec<FormFieldNode>>) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        Self { rows, columns }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormFieldStatus {
    /// Value being edited.
    Input,
    ReadOnly,
    /// Greyed out; the value cannot be changed here.
    Disabled,
    /// Keeps a grid position without content.
    Placeholder,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormFieldNode {
    pub label: String,
    pub value: String,
    /// Secondary line under the value.
    pub caption: Option<String>,
    pub status: FormFieldStatus,
    pub required: bool,
    pub focused: bool,
    /// Display columns from the start of the value to the caret.
    pub cursor: Option<u16>,
}

impl FormFieldNode {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            caption: None,
            status: FormFieldStatus::ReadOnly,
            required: false,
            focused: false,
            cursor: None,
        }
    }

    pub fn placeholder() -> Self {
        Self::new("", "").status(FormFieldStatus::Placeholder)
    }

    pub fn status(mut self, status: FormFieldStatus) -> Self {
        self.status = status;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn focused(mut self, cursor: u16) -> Self {
        self.focused = true;
        self.cursor = Some(cursor);
        self
    }
}

#[derive(Clone, Debug)]
pub struct AccordionNode {
    pub items: Vec<AccordionItemNode>,
    pub selected: usize,
    pub accent: Option<Color>,
}

#[derive(Clone, Debug)]
pub struct AccordionItemNode {
    pub label: String,
    /// Body of the open item; closed items carry none.
    pub content: Option<Element>,
}

impl AccordionNode {
    pub fn new(items: Vec<AccordionItemNode>, selected: usize) -> Self {
        Self {
            items,
            selected,
            accent: None,
        }
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }
}

impl AccordionItemNode {
    pub fn closed(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: None,
        }
    }

    pub fn open(label: impl Into<String>, content: Element) -> Self {
        Self {
            label: label.into(),
            content: Some(content),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TabsNode {
    pub tabs: Vec<TabNode>,
    pub active: usize,
    pub accent: Option<Color>,
    pub title: Option<String>,
}

#[derive(Clone, Debug)]
pub struct TabNode {
    pub label: String,
    pub content: Element,
}

impl TabsNode {
    pub fn new(tabs: Vec<TabNode>, active: usize) -> Self {
        Self {
            tabs,
            active,
            accent: None,
            title: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn accent(mut self, color: Color) -> Self {
        self.accent = Some(color);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinnerNode {
    pub label: Option<String>,
    pub frame: usize,
}

impl SpinnerNode {
    pub fn new(frame: usize) -> Self {
        Self { label: None, frame }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Square badge in the object's theme color, optionally followed by a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconNode {
    pub glyph: String,
    pub background: Option<Color>,
    pub width: u16,
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastNode {
    pub title: String,
    pub body: Option<String>,
    pub level: ToastLevel,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastStackNode {
    pub toasts: Vec<ToastNode>,
}
