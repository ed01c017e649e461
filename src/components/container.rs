use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::hooks::{RecordUi, Scope};
use crate::layout::{LayoutError, SectionRequest, SectionSummary, visible_sections};
use crate::metadata::{LayoutMode, LayoutType};
use crate::platform::RecordUiRequest;
use crate::runtime::{ComponentElement, Element, SpinnerNode};
use crate::section::PanelError;

use super::errors::errors_panel;
use super::focus::{CONTAINER_REGION, PageFocus};
use super::section::{SectionProps, section};

/// Props shared by the accordion and tab containers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProps {
    pub record_id: String,
    pub object_api_name: String,
    pub outer_class: String,
}

/// Visible sections of the record's full view layout, shared by the
/// accordion and tab containers.
pub(crate) fn use_visible_sections(
    scope: &mut Scope,
    props: &ContainerProps,
) -> (RecordUi, Arc<Option<Result<Vec<SectionSummary>, LayoutError>>>) {
    let wire = scope.use_record_ui(RecordUiRequest::new(props.record_id.clone()));
    let sections = {
        let graph = wire.data.clone();
        let record_id = props.record_id.clone();
        let object = props.object_api_name.clone();
        scope.use_memo((props.clone(), wire.version), move || {
            graph.map(|graph| {
                visible_sections(&graph, &record_id, &object, LayoutType::Full, LayoutMode::View)
            })
        })
    };
    (wire, sections)
}

/// Placeholder drawn while the section list is not available.
pub(crate) fn pending_sections(wire: &RecordUi, failure: Option<&LayoutError>) -> Element {
    if let Some(err) = &wire.error {
        return errors_panel(&PanelError::from_error(&**err));
    }
    if let Some(err) = failure {
        return errors_panel(&PanelError::from_error(err));
    }
    Element::spinner(SpinnerNode::new(0).label("Loading layout"))
}

/// Focus of the container region. Without a page around it the container
/// owns the keyboard.
#[derive(Clone)]
pub(crate) struct ContainerFocus {
    pub focused: bool,
    page: Option<Arc<PageFocus>>,
}

impl ContainerFocus {
    pub fn from_scope(scope: &Scope) -> Self {
        let page = scope.use_context::<PageFocus>();
        Self {
            focused: page
                .as_ref()
                .is_none_or(|focus| focus.is_focused(CONTAINER_REGION)),
            page,
        }
    }

    /// Read at event time, since a section may have opened its form after
    /// the container last rendered.
    pub fn accepts_keys(&self) -> bool {
        self.focused && !self.page.as_ref().is_some_and(|focus| focus.is_editing())
    }
}

pub(crate) fn section_child(
    props: &ContainerProps,
    summary: &SectionSummary,
    focused: bool,
) -> Element {
    let request = SectionRequest::new(
        props.record_id.clone(),
        props.object_api_name.clone(),
        summary.name.clone(),
    );
    ComponentElement::with_props(
        "Section",
        SectionProps::new(request, CONTAINER_REGION)
            .outer_class(props.outer_class.clone())
            .focused(focused)
            .show_title(false),
        section,
    )
    .key(format!("{}:{}", summary.id, summary.name))
    .into()
}
