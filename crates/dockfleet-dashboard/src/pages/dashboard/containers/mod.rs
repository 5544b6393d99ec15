//! Container view components

mod container_detail;

pub use container_detail::ContainerDetailModal;

use super::graph_canvas::GraphCanvas;
use crate::controller::{ContainerCard, ContainerLayout, ContainerPanel, GraphKind};
use crate::state::use_dashboard_context;
use crate::types::ContainerAction;
use leptos::*;

/// Container view: node selector, counters, and cards or graph
#[component]
pub fn ContainersPage() -> impl IntoView {
    let ctx = use_dashboard_context();

    let layout = create_memo(move |_| ctx.read(|s| s.container_layout));
    let stats = create_memo(move |_| ctx.read(|s| s.stats));
    let status_line = create_memo(move |_| ctx.read(|s| s.notifier.status_line().to_string()));

    let reload = move |_| {
        ctx.spawn(|c| async move {
            let node = c.read(|s| s.selected_node.clone());
            c.reload_containers(&node).await;
        })
    };

    view! {
        <div class="containers-page">
            <div class="toolbar">
                <NodeSelect />
                <button class="btn btn-secondary" on:click=reload>
                    <i class="fas fa-sync-alt"></i>
                    <span>"Refresh"</span>
                </button>
                <div class="layout-toggle">
                    <button
                        class=move || if layout.get() == ContainerLayout::Cards { "toggle-btn active" } else { "toggle-btn" }
                        on:click=move |_| ctx.act(|c| c.set_container_layout(ContainerLayout::Cards))
                    >
                        <i class="fas fa-th-large"></i>
                        <span>"Cards"</span>
                    </button>
                    <button
                        class=move || if layout.get() == ContainerLayout::Graph { "toggle-btn active" } else { "toggle-btn" }
                        on:click=move |_| ctx.act(|c| c.set_container_layout(ContainerLayout::Graph))
                    >
                        <i class="fas fa-project-diagram"></i>
                        <span>"Graph"</span>
                    </button>
                </div>
            </div>

            <div class="stats-section">
                <div class="stat-card">
                    <div class="stat-value">{move || stats.get().total}</div>
                    <div class="stat-title">"Total"</div>
                </div>
                <div class="stat-card running">
                    <div class="stat-value">{move || stats.get().running}</div>
                    <div class="stat-title">"Running"</div>
                </div>
                <div class="stat-card stopped">
                    <div class="stat-value">{move || stats.get().stopped}</div>
                    <div class="stat-title">"Stopped"</div>
                </div>
            </div>

            <p class="status-text">{move || status_line.get()}</p>

            {move || match layout.get() {
                ContainerLayout::Cards => view! { <ContainerGrid /> }.into_view(),
                ContainerLayout::Graph => view! {
                    <div class="graph-toolbar">
                        <button class="btn btn-small" on:click=move |_| ctx.act(|c| c.reset_graph_layout(GraphKind::Container))>
                            <i class="fas fa-redo"></i>
                            <span>"Reset layout"</span>
                        </button>
                        <button class="btn btn-small" on:click=move |_| ctx.act(|c| c.fit_graph(GraphKind::Container))>
                            <i class="fas fa-expand"></i>
                            <span>"Fit"</span>
                        </button>
                    </div>
                    <GraphCanvas kind=GraphKind::Container />
                }.into_view(),
            }}
        </div>
    }
}

/// Node selector drop-down
#[component]
fn NodeSelect() -> impl IntoView {
    let ctx = use_dashboard_context();
    let options = create_memo(move |_| ctx.read(|s| s.node_options.clone()));
    let selected = create_memo(move |_| ctx.read(|s| s.selected_node.clone()));

    view! {
        <select
            class="node-select"
            prop:value=move || selected.get()
            on:change=move |e| {
                let id = event_target_value(&e);
                ctx.spawn(move |c| async move { c.select_node(&id).await });
            }
        >
            {move || options.get().into_iter().map(|option| {
                let is_selected = option.id == selected.get_untracked();
                view! {
                    <option value=option.id selected=is_selected>{option.text}</option>
                }
            }).collect_view()}
        </select>
    }
}

#[component]
fn ContainerGrid() -> impl IntoView {
    let ctx = use_dashboard_context();
    let panel = create_memo(move |_| ctx.read(|s| s.container_panel.clone()));
    let cards = create_memo(move |_| ctx.read(|s| s.cards()));

    move || match panel.get() {
        ContainerPanel::Idle => view! { <div class="container-grid"></div> }.into_view(),
        ContainerPanel::Malformed => view! {
            <div class="empty-state">
                <i class="fas fa-exclamation-triangle"></i>
                <h3>"Malformed data"</h3>
                <p>"The server did not return a container list."</p>
            </div>
        }
        .into_view(),
        ContainerPanel::Failed(_) => view! {
            <div class="empty-state">
                <i class="fas fa-exclamation-circle"></i>
                <h3>"Failed to load"</h3>
                <p>"Something went wrong while loading containers."</p>
            </div>
        }
        .into_view(),
        ContainerPanel::Loaded => {
            let list = cards.get();
            if list.is_empty() {
                view! {
                    <div class="empty-state">
                        <i class="fas fa-inbox"></i>
                        <h3>"No containers"</h3>
                        <p>"This node has no containers."</p>
                    </div>
                }
                .into_view()
            } else {
                view! {
                    <div class="container-grid">
                        {list.into_iter().map(|card| view! { <ContainerCardView card=card /> }).collect_view()}
                    </div>
                }
                .into_view()
            }
        }
    }
}

#[component]
fn ContainerCardView(card: ContainerCard) -> impl IntoView {
    let ctx = use_dashboard_context();

    let buttons = card
        .actions
        .iter()
        .map(|&(action, enabled)| {
            let container_id = card.id.clone();
            let icon = match action {
                ContainerAction::Start => "fa-play",
                ContainerAction::Stop => "fa-stop",
                ContainerAction::Restart => "fa-redo",
            };
            view! {
                <button
                    class=format!("btn-action {}", action.as_path())
                    disabled={!enabled}
                    on:click=move |_| {
                        let container_id = container_id.clone();
                        ctx.spawn(move |c| async move {
                            let node = c.read(|s| s.selected_node.clone());
                            c.do_action(action, &node, &container_id).await;
                        })
                    }
                >
                    <i class=format!("fas {}", icon)></i>
                    <span>{action.label()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class=format!("container-card {}", card.style.card_class)>
            <div class="card-header">
                <div>
                    <div class="card-title">{card.title}</div>
                    <div class="card-id">{card.id.clone()}</div>
                </div>
                <span class=format!("card-badge {}", card.style.badge_class)>
                    <i class=format!("fas {}", card.style.icon)></i>
                    " "
                    {card.status_text}
                </span>
            </div>
            <div class="card-body">
                <div class="card-info">
                    <i class="fas fa-image"></i>
                    <span class="card-info-label">"Image:"</span>
                    <span class="card-info-value">{card.image}</span>
                </div>
                {card.ports.map(|ports| view! {
                    <div class="card-info">
                        <i class="fas fa-network-wired"></i>
                        <span class="card-info-label">"Ports:"</span>
                        <span class="card-info-value">{ports}</span>
                    </div>
                })}
            </div>
            <div class="card-actions">{buttons}</div>
        </div>
    }
}
