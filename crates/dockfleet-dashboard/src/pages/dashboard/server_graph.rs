//! Server network view: topology graph plus detail panel

use super::graph_canvas::GraphCanvas;
use crate::controller::GraphKind;
use crate::state::use_dashboard_context;
use crate::status::{server_role_badge, server_status_badge};
use leptos::*;

#[component]
pub fn ServerGraphPage() -> impl IntoView {
    let ctx = use_dashboard_context();

    let reload = move |_| {
        ctx.spawn(|c| async move {
            let _ = c.load_server_list().await;
        })
    };

    view! {
        <div class="server-graph-page">
            <div class="graph-toolbar">
                <button class="btn btn-secondary" on:click=reload>
                    <i class="fas fa-sync-alt"></i>
                    <span>"Refresh"</span>
                </button>
                <button class="btn btn-primary" on:click=move |_| ctx.act(|c| c.open_add_form())>
                    <i class="fas fa-plus"></i>
                    <span>"Add Server"</span>
                </button>
                <button class="btn btn-small" on:click=move |_| ctx.act(|c| c.reset_graph_layout(GraphKind::Server))>
                    <i class="fas fa-redo"></i>
                    <span>"Reset layout"</span>
                </button>
                <button class="btn btn-small" on:click=move |_| ctx.act(|c| c.fit_graph(GraphKind::Server))>
                    <i class="fas fa-expand"></i>
                    <span>"Fit"</span>
                </button>
            </div>

            <div class="server-graph-body">
                <GraphCanvas kind=GraphKind::Server />
                <ServerDetailPanel />
            </div>
        </div>
    }
}

/// Side panel for the selected server node
#[component]
fn ServerDetailPanel() -> impl IntoView {
    let ctx = use_dashboard_context();
    let detail = create_memo(move |_| ctx.read(|s| s.server_detail.clone()));

    move || {
        detail.get().map(|d| {
            let (status_class, status_icon, status_label) = server_status_badge(d.status);
            let (role_class, _, role_label) = server_role_badge(d.role);
            view! {
                <aside class="detail-panel">
                    <div class="detail-panel-header">
                        <h3>{d.label.clone()}</h3>
                        <button
                            class="modal-close"
                            on:click=move |_| ctx.act(|c| c.clear_graph_selection(GraphKind::Server))
                        >
                            "×"
                        </button>
                    </div>
                    <div class="detail-grid">
                        <DetailItem label="ID" value=d.id.clone() />
                        <div class="detail-item">
                            <span class="detail-label">"Status"</span>
                            <span class=format!("status-badge {}", status_class)>
                                <i class=format!("fas {}", status_icon)></i>
                                " "
                                {status_label}
                            </span>
                        </div>
                        <div class="detail-item">
                            <span class="detail-label">"Role"</span>
                            <span class=format!("role-badge {}", role_class)>{role_label}</span>
                        </div>
                        <DetailItem label="Endpoint" value=d.base_url.clone() />
                        <DetailItem label="Type" value=d.node_type.clone() />
                        <DetailItem
                            label="Last check"
                            value=d.last_check.clone().unwrap_or_else(|| "Never".to_string())
                        />
                        {d.error.clone().map(|err| view! {
                            <div class="detail-item error">
                                <span class="detail-label">"Error"</span>
                                <span class="detail-value">{err}</span>
                            </div>
                        })}
                    </div>
                </aside>
            }
        })
    }
}

#[component]
fn DetailItem(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="detail-item">
            <span class="detail-label">{label}</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}
