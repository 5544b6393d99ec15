//! View switching

use super::{redraw_container_graph, ContainerLayout, DashboardController, ViewKind};
use crate::api::{DashboardApi, Dialogs};

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    /// Show exactly one view and load its data. Never blocked: a second
    /// switch simply issues a newer load, and the older response is dropped.
    pub async fn switch_view(&self, kind: ViewKind) {
        log::info!("switching to {} view", kind.as_str());
        let node = self.update(|s| {
            s.active_view = kind;
            s.container_detail = None;
            s.server_detail = None;
            s.selected_node.clone()
        });

        match kind {
            ViewKind::Container => self.reload_containers(&node).await,
            // The server graph is drawn by the roster load itself, once the
            // list has arrived.
            ViewKind::Server | ViewKind::ServerGraph => {
                let _ = self.load_server_list().await;
            }
        }
    }

    /// Toggle cards/graph in the container view. The graph is drawn from the
    /// cached list without refetching.
    pub fn set_container_layout(&self, layout: ContainerLayout) {
        let engine = &*self.engine;
        self.update(|s| {
            s.container_layout = layout;
            match layout {
                ContainerLayout::Graph => redraw_container_graph(engine, s),
                ContainerLayout::Cards => {
                    s.container_graph.teardown();
                    s.container_detail = None;
                }
            }
        });
    }
}
