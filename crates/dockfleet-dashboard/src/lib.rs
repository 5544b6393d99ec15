//! Dockfleet Dashboard - Leptos Web Interface
//!
//! Browser dashboard for a small federation of Docker hosts: container
//! lifecycle on a selected node, plus the roster of registered servers drawn
//! as a list and as a network graph.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod graph;
pub mod notifier;
pub mod pages;
pub mod retry;
pub mod state;
pub mod status;
pub mod types;

use leptos::*;
use leptos_router::*;

use pages::Dashboard;

/// Main application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main>
                <Routes>
                    <Route path="/" view=Dashboard />
                    <Route path="/*any" view=Dashboard />
                </Routes>
            </main>
        </Router>
    }
}

/// Mount the application to the DOM
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Debug);

    mount_to_body(App);
}
