use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ratatui::backend::Backend;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::context::ContextStack;
use crate::events::{DEFAULT_TICK_RATE, EventBus};
use crate::hooks::{HookRegistry, PendingEffect, Scope};
use crate::platform::Platform;
use crate::renderer::Renderer;

use super::component::{ComponentElement, ComponentId};
use super::dispatcher::{AppMessage, Dispatcher};
use super::element::Element;
use super::tasks::{DefaultRuntimeDriver, RuntimeDriver};
use super::view::{
    AccordionItemView, AccordionView, BlockView, FlexView, LayersView, TabView, TabsView, View,
};

const HEADLESS_SIZE: (u16, u16) = (100, 40);

#[derive(Clone, Copy)]
enum RendererMode {
    Interactive,
    Headless,
}

#[derive(Clone)]
pub struct App {
    name: &'static str,
    root: ComponentElement,
    hooks: Arc<HookRegistry>,
    event_bus: EventBus,
    config: AppConfig,
    platform: Arc<Platform>,
    driver: Arc<dyn RuntimeDriver>,
    metadata_watch: Option<PathBuf>,
    renderer_mode: RendererMode,
}

#[derive(Clone, Copy)]
pub struct AppConfig {
    pub tick_rate: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl App {
    pub fn new(name: &'static str, root: ComponentElement, platform: Platform) -> Self {
        Self {
            name,
            root,
            hooks: Arc::new(HookRegistry::new()),
            event_bus: EventBus::new(64),
            config: AppConfig::default(),
            platform: Arc::new(platform),
            driver: Arc::new(DefaultRuntimeDriver),
            metadata_watch: None,
            renderer_mode: RendererMode::Interactive,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Refetches metadata in every mounted component when the document at
    /// `path` changes.
    pub fn watch_metadata<P>(mut self, path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        let candidate = path.into();
        let resolved = if candidate.is_absolute() {
            candidate
        } else {
            match env::current_dir() {
                Ok(cwd) => cwd.join(&candidate),
                Err(_) => candidate,
            }
        };
        self.metadata_watch = Some(resolved);
        self
    }

    pub fn with_driver<D>(mut self, driver: D) -> Self
    where
        D: RuntimeDriver + 'static,
    {
        self.driver = Arc::new(driver);
        self
    }

    pub fn headless(mut self) -> Self {
        self.renderer_mode = RendererMode::Headless;
        self
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.renderer_mode {
            RendererMode::Interactive => {
                let renderer = Renderer::interactive(self.name).context("initialize renderer")?;
                self.run_with(renderer).await.map(drop)
            }
            RendererMode::Headless => {
                let (width, height) = HEADLESS_SIZE;
                let renderer = Renderer::headless(width, height).context("initialize renderer")?;
                self.run_with(renderer).await.map(drop)
            }
        }
    }

    /// Drives the runtime loop against the given renderer until shutdown and
    /// hands the renderer back, so headless callers can inspect the last frame.
    pub async fn run_with<B: Backend>(self, mut renderer: Renderer<B>) -> anyhow::Result<Renderer<B>> {
        info!(app = self.name, "starting runtime");
        let (tx, mut rx) = mpsc::channel(128);
        let dispatcher = Dispatcher::new(tx.clone(), self.event_bus.clone());
        let mut last_view: Option<View> = None;

        let event_task = self.driver.spawn_terminal_events(tx.clone());
        let tick_task = self
            .driver
            .spawn_tick_loop(tx.clone(), self.config.tick_rate);
        let shutdown_task = self.driver.spawn_shutdown_watcher(tx.clone());
        let metadata_task = self
            .metadata_watch
            .clone()
            .map(|path| self.driver.spawn_metadata_watcher(path, tx.clone()));

        if tx.send(AppMessage::RequestRender).await.is_err() {
            warn!(app = self.name, "failed to enqueue initial render request");
        }
        let mut live_components = HashSet::new();

        while let Some(message) = rx.recv().await {
            trace!(app = self.name, message = ?message, "processing app message");
            match message {
                AppMessage::RequestRender => {
                    live_components.clear();
                    let mut effects = Vec::new();
                    let mut context = ContextStack::new();
                    let mut path = vec![0usize];
                    let view = self
                        .render_element(
                            Element::from(self.root.clone()),
                            &dispatcher,
                            &mut path,
                            &mut context,
                            &mut live_components,
                            &mut effects,
                        )?
                        .unwrap_or(View::Empty);

                    let should_render =
                        last_view.as_ref().map(|prev| prev != &view).unwrap_or(true);
                    if should_render {
                        renderer.draw(&view).map_err(|err| {
                            warn!(app = self.name, error = ?err, "renderer draw failed");
                            err
                        })?;
                        trace!(app = self.name, "frame drawn");
                    }
                    last_view = Some(view);
                    trace!(
                        app = self.name,
                        effect_count = effects.len(),
                        "render completed"
                    );
                    self.run_effects(effects, &dispatcher);
                    self.hooks.prune(&live_components);
                }
                AppMessage::ExternalEvent(event) => {
                    trace!(app = self.name, event = ?event, "dispatching external event");
                    self.event_bus.publish(event);
                }
                AppMessage::Shutdown => {
                    info!(app = self.name, "shutdown requested");
                    break;
                }
                AppMessage::MetadataChanged => {
                    let revision = self.platform.bump_revision();
                    debug!(app = self.name, revision, "metadata revision bumped");
                    dispatcher.request_render();
                }
            }
        }

        trace!(app = self.name, "tearing down runtime tasks");
        abort_and_log("terminal_events", event_task).await;
        abort_and_log("tick_loop", tick_task).await;
        abort_and_log("shutdown_watcher", shutdown_task).await;
        if let Some(task) = metadata_task {
            abort_and_log("metadata_watcher", task).await;
        }
        self.hooks.prune(&HashSet::new());
        info!(app = self.name, "runtime stopped");
        Ok(renderer)
    }

    fn run_effects(&self, effects: Vec<PendingEffect>, dispatcher: &Dispatcher) {
        for effect in effects {
            trace!(component = %effect.component_id, slot = effect.slot, "running effect");
            effect.apply(&self.hooks, dispatcher);
        }
    }

    fn render_children(
        &self,
        children: Vec<Element>,
        dispatcher: &Dispatcher,
        path: &mut Vec<usize>,
        context: &mut ContextStack,
        live: &mut HashSet<ComponentId>,
        effects: &mut Vec<PendingEffect>,
    ) -> anyhow::Result<Vec<View>> {
        let mut views = Vec::with_capacity(children.len());
        for (index, child) in children.into_iter().enumerate() {
            path.push(index);
            let view = self.render_element(child, dispatcher, path, context, live, effects)?;
            path.pop();
            views.push(view.unwrap_or(View::Empty));
        }
        Ok(views)
    }

    fn render_element(
        &self,
        element: Element,
        dispatcher: &Dispatcher,
        path: &mut Vec<usize>,
        context: &mut ContextStack,
        live: &mut HashSet<ComponentId>,
        effects: &mut Vec<PendingEffect>,
    ) -> anyhow::Result<Option<View>> {
        match element {
            Element::Empty => Ok(Some(View::Empty)),
            Element::Text(node) => Ok(Some(View::Text(node))),
            Element::Form(node) => Ok(Some(View::Form(node))),
            Element::Spinner(node) => Ok(Some(View::Spinner(node))),
            Element::Icon(node) => Ok(Some(View::Icon(node))),
            Element::Flex(node) => {
                let rendered =
                    self.render_children(node.children, dispatcher, path, context, live, effects)?;
                // Empty children give up their space; their weights go with them.
                let mut children = Vec::new();
                let mut weights = Vec::new();
                for (index, view) in rendered.into_iter().enumerate() {
                    if view != View::Empty {
                        if let Some(weight) = node.weights.get(index) {
                            weights.push(*weight);
                        }
                        children.push(view);
                    }
                }
                if children.is_empty() {
                    Ok(Some(View::Empty))
                } else {
                    if weights.len() != children.len() {
                        weights.clear();
                    }
                    Ok(Some(View::Flex(FlexView {
                        direction: node.direction,
                        children,
                        weights,
                    })))
                }
            }
            Element::Block(node) => {
                path.push(0);
                let child =
                    self.render_element(*node.child, dispatcher, path, context, live, effects)?;
                path.pop();
                Ok(Some(View::Block(BlockView {
                    title: node.title,
                    child: child.map(Box::new),
                    frame: node.frame,
                })))
            }
            Element::Accordion(node) => {
                let mut items = Vec::with_capacity(node.items.len());
                for (index, item) in node.items.into_iter().enumerate() {
                    let content = match item.content {
                        Some(content) => {
                            path.push(index);
                            let view =
                                self.render_element(content, dispatcher, path, context, live, effects)?;
                            path.pop();
                            Some(view.unwrap_or(View::Empty))
                        }
                        None => None,
                    };
                    items.push(AccordionItemView {
                        label: item.label,
                        content,
                    });
                }
                if items.is_empty() {
                    return Ok(Some(View::Empty));
                }
                let selected = node.selected.min(items.len() - 1);
                Ok(Some(View::Accordion(AccordionView {
                    items,
                    selected,
                    accent: node.accent,
                })))
            }
            Element::Tabs(node) => {
                if node.tabs.is_empty() {
                    return Ok(Some(View::Empty));
                }
                let active = node.active.min(node.tabs.len() - 1);
                let mut tabs = Vec::with_capacity(node.tabs.len());
                for (index, tab) in node.tabs.into_iter().enumerate() {
                    // Only the active tab is mounted.
                    let content = if index == active {
                        path.push(index);
                        let view =
                            self.render_element(tab.content, dispatcher, path, context, live, effects)?;
                        path.pop();
                        view.unwrap_or(View::Empty)
                    } else {
                        View::Empty
                    };
                    tabs.push(TabView {
                        label: tab.label,
                        content,
                    });
                }
                Ok(Some(View::Tabs(TabsView {
                    tabs,
                    active,
                    accent: node.accent,
                    title: node.title,
                })))
            }
            Element::Layered(layers) => {
                let layers: Vec<View> = self
                    .render_children(layers, dispatcher, path, context, live, effects)?
                    .into_iter()
                    .filter(|view| view != &View::Empty)
                    .collect();
                match layers.len() {
                    0 => Ok(Some(View::Empty)),
                    1 => Ok(layers.into_iter().next()),
                    _ => Ok(Some(View::Layered(LayersView { layers }))),
                }
            }
            Element::ToastStack(node) => {
                if node.toasts.is_empty() {
                    Ok(Some(View::Empty))
                } else {
                    Ok(Some(View::ToastStack(node)))
                }
            }
            Element::Component(component) => {
                self.render_component(component, dispatcher, path, context, live, effects)
            }
        }
    }

    fn render_component(
        &self,
        component: ComponentElement,
        dispatcher: &Dispatcher,
        path: &mut Vec<usize>,
        context: &mut ContextStack,
        live: &mut HashSet<ComponentId>,
        effects: &mut Vec<PendingEffect>,
    ) -> anyhow::Result<Option<View>> {
        let id = ComponentId::new(path, component.name, component.key.as_deref());
        live.insert(id.clone());
        let slots = self.hooks.slots_for(&id);
        let mut scope = Scope::new(
            id.clone(),
            slots,
            dispatcher.clone(),
            context,
            self.platform.clone(),
        );
        let child = (component.render)(&mut scope);
        effects.extend(scope.take_effects());
        let provided = scope.take_provided();
        drop(scope);
        let view = self.render_element(child, dispatcher, path, context, live, effects);
        context.release(&provided);
        view
    }
}

async fn abort_and_log(label: &str, handle: JoinHandle<()>) {
    handle.abort();
    match handle.await {
        Ok(_) => trace!(task = label, "task aborted cleanly"),
        Err(err) if err.is_cancelled() => trace!(task = label, "task cancellation confirmed"),
        Err(err) => warn!(task = label, error = ?err, "task join failed"),
    }
}
