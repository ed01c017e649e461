use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::hooks::StateHandle;
use crate::runtime::{ToastLevel, ToastNode, ToastStackNode};

pub const TOAST_TTL: Duration = Duration::from_secs(4);
pub const CONTAINER_REGION: &str = "container";

/// Which page region receives keys, and whether a section is mid-edit.
/// Provided by the page root.
#[derive(Clone, Debug)]
pub struct PageFocus {
    focused: String,
    editing: Arc<Mutex<Option<String>>>,
}

impl PageFocus {
    pub fn new(focused: impl Into<String>, editing: Arc<Mutex<Option<String>>>) -> Self {
        Self {
            focused: focused.into(),
            editing,
        }
    }

    pub fn is_focused(&self, region: &str) -> bool {
        self.focused == region
    }

    /// True while any section holds an open edit form.
    pub fn is_editing(&self) -> bool {
        self.editing.lock().is_some()
    }

    pub fn set_editing(&self, region: &str, editing: bool) {
        let mut cell = self.editing.lock();
        if editing {
            *cell = Some(region.to_string());
        } else if cell.as_deref() == Some(region) {
            *cell = None;
        }
    }
}

pub fn card_region(section_name: &str) -> String {
    format!("card:{section_name}")
}

#[derive(Clone, Debug)]
pub struct TimedToast {
    pub toast: ToastNode,
    pub shown_at: Instant,
}

/// Toast queue shared through context; the page root draws and expires it.
#[derive(Clone)]
pub struct Toasts {
    handle: StateHandle<Vec<TimedToast>>,
}

impl Toasts {
    pub fn new(handle: StateHandle<Vec<TimedToast>>) -> Self {
        Self { handle }
    }

    pub fn push(&self, title: impl Into<String>, body: Option<String>, level: ToastLevel) {
        let toast = ToastNode {
            title: title.into(),
            body,
            level,
        };
        self.handle.update(|toasts| {
            toasts.push(TimedToast {
                toast,
                shown_at: Instant::now(),
            })
        });
    }

    pub fn success(&self, title: impl Into<String>) {
        self.push(title, None, ToastLevel::Success);
    }
}

/// Drops toasts older than `ttl`; returns whether any were dropped.
pub fn expire_toasts(toasts: &mut Vec<TimedToast>, now: Instant, ttl: Duration) -> bool {
    let before = toasts.len();
    toasts.retain(|toast| now.saturating_duration_since(toast.shown_at) < ttl);
    toasts.len() != before
}

pub fn toast_stack(toasts: &[TimedToast]) -> ToastStackNode {
    ToastStackNode {
        toasts: toasts.iter().map(|timed| timed.toast.clone()).collect(),
    }
}
