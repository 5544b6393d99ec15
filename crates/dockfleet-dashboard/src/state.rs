//! Application state management for the Dockfleet Dashboard
//!
//! Components never hold view data of their own. They read the controller's
//! [`ViewState`] through [`DashboardContext::read`], which subscribes them to
//! a revision signal bumped after every controller write.

use crate::api::{BrowserDialogs, HttpClient};
use crate::config::DashboardConfig;
use crate::controller::{DashboardController, ViewState};
use leptos::*;
use std::future::Future;
use std::rc::Rc;

/// Controller wired to the browser.
pub type Controller = DashboardController<HttpClient, BrowserDialogs>;

/// Dashboard context shared by every component
#[derive(Clone, Copy)]
pub struct DashboardContext {
    pub revision: RwSignal<u64>,
    controller: StoredValue<Rc<Controller>>,
}

impl DashboardContext {
    pub fn new(config: DashboardConfig) -> Self {
        let revision = create_rw_signal(0u64);
        let controller = Rc::new(DashboardController::new(
            HttpClient::new(&config),
            BrowserDialogs,
            config,
        ));
        controller.set_listener(move || revision.update(|r| *r = r.wrapping_add(1)));

        Self {
            revision,
            controller: store_value(controller),
        }
    }

    /// Read view state inside a reactive scope.
    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        self.revision.with(|_| ());
        self.controller.with_value(|c| c.read(f))
    }

    pub fn controller(&self) -> Rc<Controller> {
        self.controller.get_value()
    }

    /// Run a synchronous controller operation.
    pub fn act(&self, f: impl FnOnce(&Controller)) {
        let controller = self.controller();
        f(&controller);
    }

    /// Spawn an async controller operation on the event loop.
    pub fn spawn<F, Fut>(&self, f: F)
    where
        F: FnOnce(Rc<Controller>) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(f(self.controller()));
    }
}

/// Provide the dashboard context to child components
pub fn provide_dashboard_context(config: DashboardConfig) -> DashboardContext {
    let ctx = DashboardContext::new(config);
    provide_context(ctx);
    ctx
}

/// Get the dashboard context from the component tree
pub fn use_dashboard_context() -> DashboardContext {
    expect_context::<DashboardContext>()
}
