//! Container detail modal component

use crate::controller::GraphKind;
use crate::state::use_dashboard_context;
use crate::status::classify;
use leptos::*;

/// Modal opened by selecting a container in the graph
#[component]
pub fn ContainerDetailModal() -> impl IntoView {
    let ctx = use_dashboard_context();
    let detail = create_memo(move |_| ctx.read(|s| s.container_detail.clone()));

    let close_modal = move |_| ctx.act(|c| c.clear_graph_selection(GraphKind::Container));

    view! {
        <Show when=move || detail.get().is_some()>
            <div class="modal-overlay" on:click=close_modal>
                <div class="modal-content container-detail-modal" on:click=|e| e.stop_propagation()>
                    {move || detail.get().map(|d| {
                        let style = classify(&d.status);
                        view! {
                            <div class="modal-header">
                                <h2>{d.name.clone()}</h2>
                                <button class="modal-close" on:click=close_modal>"×"</button>
                            </div>
                            <div class="modal-body">
                                <div class="detail-grid">
                                    <div class="detail-item">
                                        <span class="detail-label">"ID"</span>
                                        <span class="detail-value mono">{d.id.clone()}</span>
                                    </div>
                                    <div class="detail-item">
                                        <span class="detail-label">"Status"</span>
                                        <span class=format!("card-badge {}", style.badge_class)>
                                            <i class=format!("fas {}", style.icon)></i>
                                            " "
                                            {d.status.to_string()}
                                        </span>
                                    </div>
                                    <div class="detail-item">
                                        <span class="detail-label">"Image"</span>
                                        <span class="detail-value">{d.image.clone()}</span>
                                    </div>
                                    <div class="detail-item">
                                        <span class="detail-label">"Ports"</span>
                                        <span class="detail-value">{d.ports.clone()}</span>
                                    </div>
                                </div>
                            </div>
                        }
                    })}
                </div>
            </div>
        </Show>
    }
}
