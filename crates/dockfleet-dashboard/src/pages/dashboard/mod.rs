//! Dashboard module - one shell, three views

pub mod containers;
pub mod graph_canvas;
pub mod server_graph;
pub mod servers;
pub mod sidebar;
pub mod toasts;

pub use containers::{ContainerDetailModal, ContainersPage};
pub use graph_canvas::GraphCanvas;
pub use server_graph::ServerGraphPage;
pub use servers::{ServerFormModal, ServersPage};
pub use sidebar::Sidebar;
pub use toasts::ToastStack;

use crate::config::DashboardConfig;
use crate::controller::ViewKind;
use crate::state::provide_dashboard_context;
use leptos::*;
use leptos_router::*;

/// Main dashboard component
#[component]
pub fn Dashboard() -> impl IntoView {
    let mut config = DashboardConfig::from_document();

    // `?view=server` etc. overrides the configured initial view
    let query = use_query_map();
    if let Some(view) = query.with_untracked(|q| q.get("view").cloned()) {
        config.initial_view = ViewKind::parse(&view);
    }

    let ctx = provide_dashboard_context(config);
    ctx.spawn(|c| async move { c.start().await });

    let active_view = create_memo(move |_| ctx.read(|s| s.active_view));
    let loading = create_memo(move |_| ctx.read(|s| s.loading));

    let page_title = move || match active_view.get() {
        ViewKind::Container => "Containers",
        ViewKind::Server => "Server Management",
        ViewKind::ServerGraph => "Server Network",
    };

    view! {
        <div class="dashboard-layout">
            <Sidebar />

            <main class="main-content">
                <header class="content-header">
                    <h1>{page_title}</h1>
                </header>

                <Show when=move || loading.get() && active_view.get() == ViewKind::Container>
                    <div class="loading-overlay">
                        <div class="spinner"></div>
                        <p>"Loading..."</p>
                    </div>
                </Show>

                <div class="page-content">
                    {move || match active_view.get() {
                        ViewKind::Container => view! { <ContainersPage /> }.into_view(),
                        ViewKind::Server => view! { <ServersPage /> }.into_view(),
                        ViewKind::ServerGraph => view! { <ServerGraphPage /> }.into_view(),
                    }}
                </div>
            </main>

            <ServerFormModal />
            <ContainerDetailModal />
            <ToastStack />
        </div>
    }
}
