//! Server registry operations

use super::{redraw_server_graph, DashboardController, ServerPanel, TestOutcome, ViewKind};
use crate::api::{DashboardApi, Dialogs};
use crate::error::ApiError;

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    /// Fetch the annotated roster. On failure the cache is emptied and the
    /// list shows a retry button. Redraws the server graph when it is the
    /// active view.
    pub async fn load_server_list(&self) -> Result<(), ApiError> {
        let token = self.update(|s| s.sequences.servers.issue());
        let result = self.api.list_server_status().await;

        let engine = &*self.engine;
        self.update(|s| {
            if !s.sequences.servers.is_current(token) {
                log::debug!("discarding stale server list");
                return result.map(drop);
            }

            let outcome = match result {
                Ok(servers) => {
                    log::info!("loaded {} servers", servers.len());
                    s.servers = servers;
                    s.server_panel = ServerPanel::Loaded;
                    Ok(())
                }
                Err(err) => {
                    log::error!("failed to load server list: {}", err);
                    s.servers.clear();
                    s.server_panel = ServerPanel::Failed(err.to_string());
                    Err(err)
                }
            };

            if s.active_view == ViewKind::ServerGraph {
                redraw_server_graph(engine, s);
            }
            outcome
        })
    }

    /// Delete a server after confirmation. The reserved central node is
    /// refused without a prompt or a request. Returns whether the backend
    /// accepted the delete.
    pub async fn delete_server(&self, id: &str) -> bool {
        if self.is_reserved(id) {
            self.update(|s| {
                s.notifier.error("The central server cannot be deleted.");
            });
            return false;
        }

        if !self.dialogs.confirm(&format!("Delete server {}?", id)) {
            return false;
        }

        // Removed from the list before the request and never put back
        let was_selected = self.update(|s| {
            s.servers.retain(|server| server.id != id);
            s.selected_node == id
        });

        match self.api.delete_node(id).await {
            Ok(response) => {
                log::info!("deleted server {}", id);
                self.update(|s| {
                    s.notifier
                        .success(response.message.unwrap_or_else(|| "Server deleted.".to_string()));
                });

                let policy = &self.config.delete_reload_retry;
                let reloaded = policy
                    .run(
                        |_| self.load_server_list(),
                        ApiError::is_retryable,
                        |delay| self.api.pause(delay),
                    )
                    .await;
                if let Err(err) = reloaded {
                    log::error!(
                        "server list still unavailable after delete ({:?}): {}",
                        err.kind(),
                        err
                    );
                    self.update(|s| {
                        s.notifier
                            .error("Could not refresh the server list. Please reload the page.");
                    });
                }

                self.update_node_select().await;

                if was_selected {
                    let fallback = self.config.reserved_node_id.clone();
                    self.update(|s| s.selected_node = fallback.clone());
                    self.reload_containers(&fallback).await;
                }
                true
            }
            Err(err) => {
                log::error!("failed to delete server {}: {}", id, err);
                self.update(|s| {
                    s.notifier.error(err.to_string());
                });
                let _ = self.load_server_list().await;
                false
            }
        }
    }

    /// Test a persisted server from its list row, then refresh the roster
    /// so the badges pick up the new status.
    pub async fn test_server_connection_by_id(&self, id: &str) -> TestOutcome {
        self.update(|s| {
            s.notifier.info(format!("Testing connection to {}...", id));
        });

        let outcome = match self.api.test_node(id).await {
            Ok(result) => TestOutcome::from(result),
            Err(err) => TestOutcome::Failed(err.to_string()),
        };

        self.update(|s| {
            if outcome.is_success() {
                s.notifier.success(outcome.summary());
            } else {
                s.notifier.error(outcome.summary());
            }
        });

        let _ = self.load_server_list().await;
        outcome
    }
}
