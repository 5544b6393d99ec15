//! Dashboard sidebar navigation component

use crate::controller::ViewKind;
use crate::state::use_dashboard_context;
use leptos::*;

/// Sidebar navigation component
#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <aside class="sidebar">
            <div class="sidebar-header">
                <i class="fab fa-docker sidebar-logo"></i>
                <span class="sidebar-title">"Dockfleet"</span>
            </div>

            <nav class="sidebar-nav">
                <NavItem kind=ViewKind::ServerGraph />
                <NavItem kind=ViewKind::Server />
                <NavItem kind=ViewKind::Container />
            </nav>
        </aside>
    }
}

/// Individual navigation item
#[component]
fn NavItem(kind: ViewKind) -> impl IntoView {
    let ctx = use_dashboard_context();
    let is_active = create_memo(move |_| ctx.read(|s| s.active_view == kind));

    view! {
        <button
            class=move || if is_active.get() { "nav-item active" } else { "nav-item" }
            on:click=move |_| ctx.spawn(move |c| async move { c.switch_view(kind).await })
        >
            <i class=format!("fas {} nav-icon", kind.icon())></i>
            <span>{kind.label()}</span>
        </button>
    }
}
