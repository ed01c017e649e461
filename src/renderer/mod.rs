use std::io::{Stdout, stdout};

use anyhow::Context;
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::{Backend, CrosstermBackend, TestBackend};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::runtime::View;

mod layout;
mod widgets;

pub use layout::preferred_height;
use widgets::{
    render_accordion, render_block, render_flex, render_form, render_icon, render_layers,
    render_spinner, render_tabs, render_text, render_toast_stack,
};

/// Draws view trees onto a terminal. Interactive renderers own the real
/// terminal and restore it on drop; headless ones draw into memory.
pub struct Renderer<B: Backend> {
    terminal: Terminal<B>,
    interactive: bool,
}

impl Renderer<CrosstermBackend<Stdout>> {
    pub fn interactive(title: &str) -> anyhow::Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, Hide, SetTitle(title)).context("prepare terminal")?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("build terminal")?;
        Ok(Self {
            terminal,
            interactive: true,
        })
    }
}

impl Renderer<TestBackend> {
    pub fn headless(width: u16, height: u16) -> anyhow::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height)).context("build terminal")?;
        Ok(Self {
            terminal,
            interactive: false,
        })
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Rendered frame as one string per row, trailing blanks trimmed.
    pub fn lines(&self) -> Vec<String> {
        let buffer = self.buffer();
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                let row: String = (area.left()..area.right())
                    .map(|x| buffer.get(x, y).symbol())
                    .collect();
                row.trim_end().to_string()
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl<B: Backend> Renderer<B> {
    pub fn draw(&mut self, view: &View) -> anyhow::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.size();
            render_view(frame, area, view);
        })?;
        Ok(())
    }
}

impl<B: Backend> Drop for Renderer<B> {
    fn drop(&mut self) {
        if !self.interactive {
            return;
        }
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen, SetTitle("Terminal"));
    }
}

fn render_view(frame: &mut Frame<'_>, area: Rect, view: &View) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    match view {
        View::Empty => {}
        View::Text(text) => render_text(frame, area, text),
        View::Flex(flex) => render_flex(frame, area, flex, render_view),
        View::Block(block) => render_block(frame, area, block, render_view),
        View::Form(form) => render_form(frame, area, form),
        View::Accordion(accordion) => render_accordion(frame, area, accordion, render_view),
        View::Tabs(tabs) => render_tabs(frame, area, tabs, render_view),
        View::Spinner(spinner) => render_spinner(frame, area, spinner),
        View::Icon(icon) => render_icon(frame, area, icon),
        View::Layered(layers) => render_layers(frame, area, layers, render_view),
        View::ToastStack(toasts) => render_toast_stack(frame, area, toasts),
    }
}
