//! Container panel operations

use super::{redraw_container_graph, ContainerLayout, ContainerPanel, ContainerStats, DashboardController, ViewKind};
use crate::api::{DashboardApi, Dialogs};
use crate::error::ApiError;
use crate::types::{ActionRequest, ContainerAction};

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    /// Fetch every container of `node_id` and redraw the panel. Failures keep
    /// the previous cache.
    pub async fn reload_containers(&self, node_id: &str) {
        let token = self.update(|s| {
            s.loading = true;
            s.notifier.set_status_line("");
            s.sequences.containers.issue()
        });

        let result = self.api.list_containers(node_id).await;

        let engine = &*self.engine;
        self.update(|s| {
            if !s.sequences.containers.is_current(token) {
                log::debug!("discarding stale container list for {}", node_id);
                return;
            }
            s.loading = false;

            match result {
                Ok(containers) => {
                    log::info!("loaded {} containers from {}", containers.len(), node_id);
                    s.stats = ContainerStats::from_containers(&containers);
                    s.containers = containers;
                    s.container_panel = ContainerPanel::Loaded;
                    if s.active_view == ViewKind::Container && s.container_layout == ContainerLayout::Graph {
                        redraw_container_graph(engine, s);
                    }
                    let status = format!(
                        "node: {} · {} containers · updated {}",
                        node_id,
                        s.containers.len(),
                        chrono::Local::now().format("%H:%M:%S")
                    );
                    s.notifier.set_status_line(status);
                }
                Err(ApiError::UnexpectedShape(detail)) => {
                    log::error!("container list for {} is malformed: {}", node_id, detail);
                    s.container_panel = ContainerPanel::Malformed;
                }
                Err(err) => {
                    log::error!("failed to load containers for {}: {}", node_id, err);
                    s.container_panel = ContainerPanel::Failed(err.to_string());
                    s.notifier.set_status_line("error (see console)");
                }
            }
        });
    }

    /// Confirm, then issue a lifecycle action. Success reloads the panel;
    /// failure only toasts. Returns whether the action was accepted.
    pub async fn do_action(&self, action: ContainerAction, node_id: &str, container_id: &str) -> bool {
        let status = self.read(|s| {
            s.containers
                .iter()
                .find(|c| c.id == container_id)
                .map(|c| c.status.clone())
        });
        if let Some(status) = status {
            if !action.is_enabled_for(&status) {
                log::warn!("{} is not available for {} container {}", action, status, container_id);
                return false;
            }
        }

        let prompt = format!("{} container {}?", action.label(), container_id);
        if !self.dialogs.confirm(&prompt) {
            return false;
        }

        self.update(|s| s.loading = true);
        let request = ActionRequest {
            node_id: node_id.to_string(),
            container_id: container_id.to_string(),
        };

        match self.api.container_action(action, &request).await {
            Ok(()) => {
                self.reload_containers(node_id).await;
                self.update(|s| {
                    s.notifier.success(format!("{} request completed.", action.label()));
                });
                true
            }
            Err(err) => {
                log::error!("{} {} on {} failed: {}", action, container_id, node_id, err);
                self.update(|s| {
                    s.loading = false;
                    s.notifier.error(format!("{} request failed: {}", action.label(), err));
                });
                false
            }
        }
    }
}
