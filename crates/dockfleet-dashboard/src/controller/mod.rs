//! Dashboard controller
//!
//! One [`DashboardController`] owns the whole [`ViewState`]. Operations are
//! async methods that fetch, then write the state in one synchronous step and
//! notify the listener. The state is never borrowed across an `.await`.

mod containers;
mod form;
mod graphs;
mod nodes;
mod servers;
mod state;
mod views;

pub use graphs::GraphKind;
pub use state::{
    ContainerCard, ContainerLayout, ContainerPanel, ContainerStats, FormField, NodeOption, RequestSequences,
    Sequence, ServerForm, ServerPanel, ServerRow, TestOutcome, ViewKind, ViewState,
};

use crate::api::{DashboardApi, Dialogs};
use crate::config::DashboardConfig;
use crate::graph::{self, BuiltinLayout, GraphEngine};
use std::cell::RefCell;

pub struct DashboardController<A, D> {
    api: A,
    dialogs: D,
    config: DashboardConfig,
    engine: Box<dyn GraphEngine>,
    state: RefCell<ViewState>,
    listener: RefCell<Option<Box<dyn Fn()>>>,
}

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    pub fn new(api: A, dialogs: D, config: DashboardConfig) -> Self {
        let state = ViewState::new(config.initial_view, &config.reserved_node_id);
        Self {
            api,
            dialogs,
            config,
            engine: Box::new(BuiltinLayout),
            state: RefCell::new(state),
            listener: RefCell::new(None),
        }
    }

    /// Replace the layout engine graphs are drawn with.
    pub fn with_engine<E: GraphEngine + 'static>(mut self, engine: E) -> Self {
        self.engine = Box::new(engine);
        self
    }

    /// Called after every state write.
    pub fn set_listener<F: Fn() + 'static>(&self, listener: F) {
        *self.listener.borrow_mut() = Some(Box::new(listener));
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        self.notify();
        result
    }

    fn notify(&self) {
        if let Some(listener) = self.listener.borrow().as_ref() {
            listener();
        }
    }

    fn is_reserved(&self, id: &str) -> bool {
        id == self.config.reserved_node_id
    }

    /// First load: fill the node selector, then show the initial view.
    pub async fn start(&self) {
        log::info!("dashboard starting against {}", self.config.api_base_url);
        self.update_node_select().await;
        self.switch_view(self.config.initial_view).await;
    }

    pub fn dismiss_toast(&self, id: u64) {
        self.update(|s| {
            s.notifier.dismiss(id);
        });
    }
}

/// Rebuild the container graph from the cached list.
fn redraw_container_graph(engine: &dyn GraphEngine, state: &mut ViewState) {
    let ViewState {
        container_graph,
        containers,
        container_detail,
        ..
    } = state;
    container_graph.render_with(|generation| graph::render_container_graph(engine, containers, generation));
    *container_detail = None;
}

/// Rebuild the server graph from the cached roster.
fn redraw_server_graph(engine: &dyn GraphEngine, state: &mut ViewState) {
    let ViewState {
        server_graph,
        servers,
        server_detail,
        ..
    } = state;
    server_graph.render_with(|generation| graph::render_server_graph(engine, servers, generation));
    *server_detail = None;
}
