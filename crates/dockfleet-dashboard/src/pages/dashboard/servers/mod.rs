//! Server management page components

mod server_form;

pub use server_form::ServerFormModal;

use crate::controller::{ServerPanel, ServerRow};
use crate::state::use_dashboard_context;
use leptos::*;

/// Server roster with inline actions
#[component]
pub fn ServersPage() -> impl IntoView {
    let ctx = use_dashboard_context();
    let panel = create_memo(move |_| ctx.read(|s| s.server_panel.clone()));
    let rows = create_memo(move |_| {
        let reserved = ctx.controller().config().reserved_node_id.clone();
        ctx.read(|s| s.server_rows(&reserved))
    });

    let reload = move |_| {
        ctx.spawn(|c| async move {
            let _ = c.load_server_list().await;
        })
    };

    view! {
        <div class="servers-page">
            <div class="page-actions">
                <button class="btn btn-primary" on:click=move |_| ctx.act(|c| c.open_add_form())>
                    <i class="fas fa-plus"></i>
                    <span>"Add Server"</span>
                </button>
                <button class="btn btn-secondary" on:click=reload>
                    <i class="fas fa-sync-alt"></i>
                    <span>"Refresh"</span>
                </button>
            </div>

            <div class="server-list">
                {move || match panel.get() {
                    ServerPanel::Idle => view! { <div class="loading">"Loading servers..."</div> }.into_view(),
                    ServerPanel::Failed(message) => view! {
                        <div class="empty-state error">
                            <i class="fas fa-exclamation-circle"></i>
                            <h3>"Could not load servers"</h3>
                            <p>{message}</p>
                            <button class="btn btn-primary" on:click=reload>
                                <i class="fas fa-redo"></i>
                                <span>"Retry"</span>
                            </button>
                        </div>
                    }.into_view(),
                    ServerPanel::Loaded => {
                        let list = rows.get();
                        if list.is_empty() {
                            view! {
                                <div class="empty-state">
                                    <p>"No servers registered."</p>
                                </div>
                            }.into_view()
                        } else {
                            list.into_iter().map(|row| view! { <ServerItem row=row /> }).collect_view()
                        }
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn ServerItem(row: ServerRow) -> impl IntoView {
    let ctx = use_dashboard_context();
    let (status_class, status_icon, status_label) = row.status;
    let (role_class, role_icon, role_label) = row.role;

    let actions = row.actions_enabled.then(|| {
        let (test_id, edit_id, delete_id) = (row.id.clone(), row.id.clone(), row.id.clone());
        view! {
            <div class="server-actions">
                <button
                    class="action-btn"
                    title="Test connection"
                    on:click=move |_| {
                        let id = test_id.clone();
                        ctx.spawn(move |c| async move {
                            c.test_server_connection_by_id(&id).await;
                        })
                    }
                >
                    <i class="fas fa-plug"></i>
                </button>
                <button
                    class="action-btn"
                    title="Edit"
                    on:click=move |_| {
                        let id = edit_id.clone();
                        ctx.spawn(move |c| async move { c.edit_server(&id).await })
                    }
                >
                    <i class="fas fa-edit"></i>
                </button>
                <button
                    class="action-btn danger"
                    title="Delete"
                    on:click=move |_| {
                        let id = delete_id.clone();
                        ctx.spawn(move |c| async move {
                            c.delete_server(&id).await;
                        })
                    }
                >
                    <i class="fas fa-trash"></i>
                </button>
            </div>
        }
    });

    view! {
        <div class="server-item">
            <div class="server-info">
                <div class="server-name">
                    {row.label}
                    <span class=format!("role-badge {}", role_class)>
                        <i class=format!("fas {}", role_icon)></i>
                        " "
                        {role_label}
                    </span>
                    <span class=format!("status-badge {}", status_class)>
                        <i class=format!("fas {}", status_icon)></i>
                        " "
                        {status_label}
                    </span>
                </div>
                <div class="server-details">
                    <span><i class="fas fa-server"></i>" "{row.id.clone()}</span>
                    <span><i class="fas fa-link"></i>" "{row.base_url}</span>
                </div>
            </div>
            {actions}
        </div>
    }
}
