//! Graph interaction: selection, re-layout and fit.

use super::{DashboardController, ViewState};
use crate::api::{DashboardApi, Dialogs};
use crate::graph::{ContainerDetail, GraphSlot, ServerDetail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphKind {
    Container,
    Server,
}

fn slot_mut(state: &mut ViewState, kind: GraphKind) -> &mut GraphSlot {
    match kind {
        GraphKind::Container => &mut state.container_graph,
        GraphKind::Server => &mut state.server_graph,
    }
}

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    /// Select a node and open its details. The hub is ignored.
    pub fn select_graph_node(&self, kind: GraphKind, id: &str) {
        self.update(|s| {
            let selected = slot_mut(s, kind)
                .instance_mut()
                .map(|g| g.select_node(id))
                .unwrap_or(false);
            if !selected {
                return;
            }
            match kind {
                GraphKind::Container => s.container_detail = ContainerDetail::find(&s.containers, id),
                GraphKind::Server => s.server_detail = ServerDetail::find(&s.servers, id),
            }
        });
    }

    /// Click on empty canvas, or closing the detail view.
    pub fn clear_graph_selection(&self, kind: GraphKind) {
        self.update(|s| {
            if let Some(g) = slot_mut(s, kind).instance_mut() {
                g.clear_selection();
            }
            match kind {
                GraphKind::Container => s.container_detail = None,
                GraphKind::Server => s.server_detail = None,
            }
        });
    }

    pub fn reset_graph_layout(&self, kind: GraphKind) {
        let engine = &*self.engine;
        self.update(|s| {
            if let Some(g) = slot_mut(s, kind).instance_mut() {
                if let Err(err) = g.reset_layout(engine) {
                    log::error!("layout reset failed: {}", err);
                }
            }
        });
    }

    pub fn fit_graph(&self, kind: GraphKind) {
        self.update(|s| {
            if let Some(g) = slot_mut(s, kind).instance_mut() {
                g.fit();
            }
        });
    }
}
