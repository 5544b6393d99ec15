//! Add/edit server modal

use super::{DashboardController, FormField, ServerForm, TestOutcome};
use crate::api::{DashboardApi, Dialogs};
use crate::types::NodePayload;

/// Label given to the throwaway node registered for a form connection test.
const TEMPORARY_LABEL: &str = "Connection test";

impl<A: DashboardApi, D: Dialogs> DashboardController<A, D> {
    pub fn open_add_form(&self) {
        self.update(|s| {
            s.form = Some(ServerForm::default());
            s.editing_id = None;
        });
    }

    /// Load a server and open the form prefilled for editing.
    pub async fn edit_server(&self, id: &str) {
        if self.is_reserved(id) {
            self.update(|s| {
                s.notifier.error("The central server cannot be edited.");
            });
            return;
        }

        match self.api.get_node(id).await {
            Ok(server) => self.update(|s| {
                s.form = Some(ServerForm::from_server(&server));
                s.editing_id = Some(server.id.clone());
            }),
            Err(err) => {
                log::error!("failed to load server {} for editing: {}", id, err);
                self.update(|s| {
                    s.notifier
                        .error(format!("Could not load server details: {}", err));
                });
            }
        }
    }

    /// Cancel, close button and outside click all end up here.
    pub fn close_form(&self) {
        self.update(|s| s.close_form());
    }

    /// The id is read-only while editing.
    pub fn set_form_field(&self, field: FormField, value: String) {
        self.update(|s| {
            let editing = s.editing_id.is_some();
            if let Some(form) = s.form.as_mut() {
                if field == FormField::Id && editing {
                    return;
                }
                form.set(field, value);
            }
        });
    }

    pub fn set_form_tls(&self, tls: bool) {
        self.update(|s| {
            if let Some(form) = s.form.as_mut() {
                form.tls = tls;
            }
        });
    }

    /// Validate, then create or update. Success refreshes the roster and the
    /// node selector and closes the modal. Returns whether it was saved.
    pub async fn save_server(&self) -> bool {
        let Some((form, editing)) = self.read(|s| s.form.clone().map(|f| (f, s.editing_id.clone()))) else {
            return false;
        };

        let payload = match form.validate() {
            Ok(payload) => payload,
            Err(err) => {
                self.update(|s| {
                    s.notifier.error(err.to_string());
                });
                return false;
            }
        };

        self.update(|s| {
            if let Some(f) = s.form.as_mut() {
                f.saving = true;
            }
        });

        let result = match &editing {
            Some(id) => self.api.update_node(id, &payload).await,
            None => self.api.create_node(&payload).await,
        };

        match result {
            Ok(response) => {
                log::info!("saved server {}", payload.id);
                self.update(|s| {
                    s.notifier
                        .success(response.message.unwrap_or_else(|| "Server saved.".to_string()));
                });
                let _ = self.load_server_list().await;
                self.update_node_select().await;
                self.close_form();
                true
            }
            Err(err) => {
                log::error!("failed to save server {}: {}", payload.id, err);
                self.update(|s| {
                    if let Some(f) = s.form.as_mut() {
                        f.saving = false;
                    }
                    s.notifier.error(err.to_string());
                });
                false
            }
        }
    }

    /// Test the connection described by the form. A server that is not yet
    /// registered is registered temporarily, tested and removed again, with
    /// no roster refresh. While editing, the persisted server is tested
    /// directly.
    pub async fn test_form_connection(&self) -> Option<TestOutcome> {
        let (form, editing) = self.read(|s| s.form.clone().map(|f| (f, s.editing_id.is_some())))?;

        let (id, url) = match form.validate_for_test() {
            Ok(fields) => fields,
            Err(err) => {
                self.update(|s| {
                    s.notifier.error(err.to_string());
                });
                return None;
            }
        };

        self.update(|s| {
            if let Some(f) = s.form.as_mut() {
                f.test = Some(None);
            }
        });

        let outcome = self.run_connection_test(&id, &url, form.tls, editing).await;

        self.update(|s| {
            if let Some(f) = s.form.as_mut() {
                f.test = Some(Some(outcome.clone()));
            }
        });
        Some(outcome)
    }

    async fn run_connection_test(&self, id: &str, url: &str, tls: bool, editing: bool) -> TestOutcome {
        let mut temporary = false;

        if !editing {
            match self.api.get_node(id).await {
                Ok(_) => {}
                Err(err) if err.is_not_found() => {
                    let payload = NodePayload {
                        id: id.to_string(),
                        label: TEMPORARY_LABEL.to_string(),
                        base_url: url.to_string(),
                        tls,
                    };
                    if let Err(err) = self.api.create_node(&payload).await {
                        return TestOutcome::Failed(format!("could not register server for testing: {}", err));
                    }
                    temporary = true;
                }
                Err(err) => return TestOutcome::Failed(err.to_string()),
            }
        }

        let outcome = match self.api.test_node(id).await {
            Ok(result) => TestOutcome::from(result),
            Err(err) => TestOutcome::Failed(err.to_string()),
        };

        if temporary {
            if let Err(err) = self.api.delete_node(id).await {
                log::warn!("could not remove temporary server {}: {}", id, err);
            }
        }
        outcome
    }
}
