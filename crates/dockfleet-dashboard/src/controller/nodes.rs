//! Node selector

use super::{DashboardController, NodeOption};
use crate::api::{DashboardApi, Dialogs};

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    /// Repopulate the selector from `GET /api/nodes`. The current selection
    /// survives if the node still exists, otherwise the first node is taken.
    /// Failures leave the selector as it was.
    pub async fn update_node_select(&self) {
        let token = self.update(|s| s.sequences.nodes.issue());
        let result = self.api.list_nodes().await;

        self.update(|s| {
            if !s.sequences.nodes.is_current(token) {
                return;
            }
            match result {
                Ok(nodes) => {
                    s.node_options = nodes.iter().map(NodeOption::from).collect();
                    let keep = s.node_options.iter().any(|o| o.id == s.selected_node);
                    if !keep {
                        if let Some(first) = s.node_options.first() {
                            log::debug!("selected node {} is gone, falling back to {}", s.selected_node, first.id);
                            s.selected_node = first.id.clone();
                        }
                    }
                }
                Err(err) => log::error!("failed to update node selector: {}", err),
            }
        });
    }

    /// User picked another node: show its containers.
    pub async fn select_node(&self, id: &str) {
        self.update(|s| s.selected_node = id.to_string());
        self.reload_containers(id).await;
    }
}
