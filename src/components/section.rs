use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};
use unicode_width::UnicodeWidthStr;

use crate::events::{FrameworkEvent, is_ctrl};
use crate::hooks::{ReducerDispatch, Scope, StateHandle};
use crate::layout::{Column, SectionRequest, SectionView, extract_section};
use crate::metadata::Record;
use crate::platform::{Platform, RecordUiRequest, SubmitRequest};
use crate::runtime::{
    BlockFrame, Color, Dispatcher, Element, FormFieldNode, FormFieldStatus, FormNode, SpinnerNode,
};
use crate::section::{FormDraft, PanelError, SectionAction, SectionState};

use super::errors::errors_panel;
use super::focus::{PageFocus, Toasts};

pub const SUCCESS_TOAST: &str = "Success!";
const FOCUS_ACCENT: Color = Color::Cyan;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionProps {
    pub request: SectionRequest,
    pub outer_class: String,
    /// Page region whose focus this section follows.
    pub region: String,
    pub focused: bool,
    pub show_title: bool,
}

impl SectionProps {
    pub fn new(request: SectionRequest, region: impl Into<String>) -> Self {
        Self {
            request,
            outer_class: String::new(),
            region: region.into(),
            focused: false,
            show_title: true,
        }
    }

    pub fn outer_class(mut self, outer_class: impl Into<String>) -> Self {
        self.outer_class = outer_class.into();
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn show_title(mut self, show_title: bool) -> Self {
        self.show_title = show_title;
        self
    }
}

/// One layout section as a view form that can switch into an edit form.
/// Hidden when the section does not exist or has no rows.
pub fn section(scope: &mut Scope, props: &SectionProps) -> Element {
    let request = props.request.clone();
    let wire = scope.use_record_ui(
        RecordUiRequest::new(request.record_id.clone())
            .layout_type(request.layout_type)
            .mode(request.mode),
    );
    let (state, actions) = scope.use_reducer(SectionState::default, SectionState::reduce);
    let (draft, draft_handle) = scope.use_state(FormDraft::default);
    let (spinner_frame, spinner_handle) = scope.use_state(|| 0usize);

    let extracted = {
        let graph = wire.data.clone();
        let request = request.clone();
        scope.use_memo((props.request.clone(), wire.version), move || {
            graph.map(|graph| extract_section(&graph, &request))
        })
    };

    {
        let actions = actions.clone();
        let loading = wire.loading;
        let version = wire.version;
        let failure = match (&wire.error, &*extracted) {
            (Some(err), _) => Some(PanelError::from_error(&**err)),
            (None, Some(Err(err))) => Some(PanelError::from_error(err)),
            _ => None,
        };
        scope.use_effect((loading, version), move |_| {
            if loading {
                actions.dispatch(SectionAction::LoadStarted);
            } else if let Some(error) = failure {
                actions.dispatch(SectionAction::LoadFailed(error));
            } else if version > 0 {
                actions.dispatch(SectionAction::LoadSucceeded);
            }
            None
        });
    }

    let focus = scope.use_context::<PageFocus>();
    {
        let focus = focus.clone();
        let region = props.region.clone();
        let editing = state.is_editing();
        scope.use_effect((props.region.clone(), state.mode), move |_| {
            let focus = focus?;
            focus.set_editing(&region, editing);
            Some(Box::new(move || focus.set_editing(&region, false)))
        });
    }

    let view = match &*extracted {
        Some(Ok(view)) => Some(view.clone()),
        _ => None,
    };
    let record = wire
        .data
        .as_ref()
        .and_then(|graph| graph.records.get(&request.record_id).cloned());

    let keys = SectionKeys {
        props: props.clone(),
        view: view.clone(),
        record: record.clone(),
        actions,
        draft: draft_handle,
        spinner: spinner_handle,
        focus,
        toasts: scope.use_context::<Toasts>(),
        platform: scope.platform().clone(),
        dispatcher: scope.dispatcher().clone(),
    };
    scope.use_event_listener(
        (props.focused, state.mode, state.display_spinner, wire.version),
        move |event| keys.handle(event),
    );

    let body = match (&*extracted, view) {
        (_, Some(view)) if !view.is_displayed() => return Element::Empty,
        (_, Some(view)) => {
            let editing = state.is_editing().then_some(&draft);
            let mut children = Vec::new();
            if let Some(error) = &state.error {
                children.push(errors_panel(error));
            }
            children.push(Element::form(section_form(&view, record.as_ref(), editing)));
            if state.display_spinner {
                let label = if state.is_editing() { "Saving" } else { "Refreshing" };
                children.push(Element::spinner(SpinnerNode::new(spinner_frame).label(label)));
            }
            if props.focused {
                children.push(Element::colored_text(key_hint(&state, &view), Color::DarkGray));
            }
            let title = if props.show_title { view.title.clone() } else { None };
            return framed(props, title, Element::vstack(children));
        }
        (Some(Err(_)), None) => state
            .error
            .as_ref()
            .map(errors_panel)
            .unwrap_or(Element::Empty),
        (None, None) if wire.error.is_some() => state
            .error
            .as_ref()
            .map(errors_panel)
            .unwrap_or_else(|| Element::colored_text("Unable to load section", Color::Red)),
        _ => Element::spinner(
            SpinnerNode::new(spinner_frame).label(format!("Loading {}", request.section_name)),
        ),
    };
    let title = props
        .show_title
        .then(|| request.section_name.clone())
        .filter(|name| !name.is_empty());
    framed(props, title, body)
}

fn framed(props: &SectionProps, title: Option<String>, body: Element) -> Element {
    let mut frame = BlockFrame::from_class(&props.outer_class);
    if props.focused {
        frame = frame.accent(FOCUS_ACCENT);
    }
    Element::framed(title, frame, body)
}

fn key_hint(state: &SectionState, view: &SectionView) -> &'static str {
    if state.is_editing() {
        "Enter save · Esc cancel · Tab next field"
    } else if view.can_edit() {
        "e edit · r refresh"
    } else {
        "r refresh"
    }
}

/// Form grid for a section. With a draft, editable columns become inputs
/// holding the draft values; every other column shows the record's value.
pub fn section_form(view: &SectionView, record: Option<&Record>, draft: Option<&FormDraft>) -> FormNode {
    let focused = draft
        .and_then(FormDraft::focused)
        .map(|field| field.field_name.as_str());
    let rows = view
        .rows
        .iter()
        .map(|row| {
            row.columns
                .iter()
                .map(|column| field_node(column, record, draft, focused))
                .collect()
        })
        .collect();
    FormNode::new(rows)
}

fn field_node(
    column: &Column,
    record: Option<&Record>,
    draft: Option<&FormDraft>,
    focused: Option<&str>,
) -> FormFieldNode {
    if !column.is_field {
        return FormFieldNode::placeholder();
    }
    let name = column.field_name.as_deref().unwrap_or_default();
    if column.editable {
        if let Some(field) = draft.and_then(|draft| draft.draft(name)) {
            let node = FormFieldNode::new(column.label(), field.value.clone())
                .status(FormFieldStatus::Input)
                .required(field.required);
            return if focused == Some(name) {
                node.focused(field.before_cursor().width() as u16)
            } else {
                node
            };
        }
    }

    let value = column
        .field_value
        .clone()
        .unwrap_or_else(|| record.map(|record| record.display_text(name)).unwrap_or_default());
    let status = if column.disabled {
        FormFieldStatus::Disabled
    } else {
        FormFieldStatus::ReadOnly
    };
    let node = FormFieldNode::new(column.label(), value)
        .status(status)
        .required(column.required.unwrap_or(false));
    match column
        .field_date
        .as_deref()
        .and_then(|date| record.map(|record| record.display_text(date)))
        .filter(|caption| !caption.is_empty())
    {
        Some(caption) => node.caption(caption),
        None => node,
    }
}

/// Everything the key listener needs from the render that installed it.
/// Section state is read through `actions` when an event arrives, since
/// several events can land before the next render.
struct SectionKeys {
    props: SectionProps,
    view: Option<SectionView>,
    record: Option<Record>,
    actions: ReducerDispatch<SectionState, SectionAction>,
    draft: StateHandle<FormDraft>,
    spinner: StateHandle<usize>,
    focus: Option<Arc<PageFocus>>,
    toasts: Option<Arc<Toasts>>,
    platform: Arc<Platform>,
    dispatcher: Dispatcher,
}

impl SectionKeys {
    fn handle(&self, event: &FrameworkEvent) -> bool {
        match event {
            FrameworkEvent::Tick => {
                if self.actions.with_state(|state| state.display_spinner) {
                    self.spinner.update(|frame| *frame = frame.wrapping_add(1));
                }
            }
            FrameworkEvent::Key(key) if self.props.focused => self.handle_key(key, event),
            _ => {}
        }
        true
    }

    fn handle_key(&self, key: &KeyEvent, event: &FrameworkEvent) {
        let state = self.actions.with_state(SectionState::clone);
        if state.is_editing() {
            if key.code == KeyCode::Esc {
                self.actions.dispatch(SectionAction::Cancel);
                self.sync_focus();
            } else if key.code == KeyCode::Enter || is_ctrl(event, 's') {
                self.submit();
            } else if !state.display_spinner {
                self.draft.update_if(|draft| draft.handle_key(key));
            }
            return;
        }
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }
        match key.code {
            KeyCode::Char('e') => self.enter_edit(),
            KeyCode::Char('r') => {
                debug!(section = %self.props.request.section_name, "refresh requested");
                self.platform.bump_revision();
                self.dispatcher.request_render();
            }
            _ => {}
        }
    }

    fn enter_edit(&self) {
        let Some(view) = &self.view else { return };
        if !view.can_edit() {
            debug!(section = %self.props.request.section_name, "section has no editable fields");
            return;
        }
        self.draft.set(FormDraft::from_view(view, self.record.as_ref()));
        self.actions.dispatch(SectionAction::EnterEdit {
            editable: view.editable,
        });
        self.sync_focus();
    }

    fn submit(&self) {
        if self.actions.with_state(|state| state.display_spinner) {
            debug!(section = %self.props.request.section_name, "submission already in flight");
            return;
        }
        let request = SubmitRequest {
            record_id: self.props.request.record_id.clone(),
            object_api_name: self.props.request.object_api_name.clone(),
            values: self.draft.with(FormDraft::changes),
        };
        self.actions.dispatch(SectionAction::SubmitStarted);

        let pending = self.platform.submitter().submit(request);
        let section = self.props.request.section_name.clone();
        let region = self.props.region.clone();
        let actions = self.actions.clone();
        let toasts = self.toasts.clone();
        let focus = self.focus.clone();
        let platform = self.platform.clone();
        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move {
            match pending.await {
                Ok(()) => {
                    info!(section = %section, "section saved");
                    actions.dispatch(SectionAction::SubmitSucceeded);
                    if let Some(toasts) = toasts {
                        toasts.success(SUCCESS_TOAST);
                    }
                    if let Some(focus) = focus {
                        focus.set_editing(&region, actions.with_state(SectionState::is_editing));
                    }
                    platform.bump_revision();
                    dispatcher.request_render();
                }
                Err(err) => {
                    warn!(section = %section, error = %err, "section save rejected");
                    actions.dispatch(SectionAction::SubmitFailed(PanelError::from(&err)));
                }
            }
        });
    }

    /// Mirrors the reducer's mode into the page's editing flag.
    fn sync_focus(&self) {
        if let Some(focus) = &self.focus {
            let editing = self.actions.with_state(SectionState::is_editing);
            focus.set_editing(&self.props.region, editing);
        }
    }
}
