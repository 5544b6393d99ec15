//! SVG canvas for the container and server graphs

use crate::controller::GraphKind;
use crate::graph::{GraphInstance, GraphSurface, Placeholder, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::state::{use_dashboard_context, DashboardContext};
use leptos::*;

const EDGE_COLOR: &str = "#9CA3AF";
const EDGE_SELECTED: &str = "#6366F1";

/// Draws whatever the graph slot currently holds: a placeholder, a textual
/// fallback, or the laid-out graph.
#[component]
pub fn GraphCanvas(kind: GraphKind) -> impl IntoView {
    let ctx = use_dashboard_context();
    let surface = create_memo(move |_| {
        ctx.read(|s| match kind {
            GraphKind::Container => s.container_graph.surface().clone(),
            GraphKind::Server => s.server_graph.surface().clone(),
        })
    });

    // Hover lives here so that entering a node only restyles its rect.
    let hovered = create_rw_signal(None::<String>);
    let generation = create_memo(move |_| surface.with(|s| s.instance().map(GraphInstance::generation)));
    create_effect(move |_| {
        generation.with(|_| ());
        hovered.set(None);
    });

    view! {
        <div class="graph-container">
            {move || match surface.get() {
                GraphSurface::Blank => view! { <div class="graph-blank"></div> }.into_view(),
                GraphSurface::Placeholder(placeholder) => view! { <GraphPlaceholder placeholder=placeholder /> }.into_view(),
                GraphSurface::Unavailable(message) => view! {
                    <div class="graph-fallback">
                        <i class="fas fa-exclamation-triangle"></i>
                        <p>{message}</p>
                    </div>
                }.into_view(),
                GraphSurface::Ready(instance) => render_instance(ctx, kind, instance, hovered).into_view(),
            }}
        </div>
    }
}

#[component]
fn GraphPlaceholder(placeholder: Placeholder) -> impl IntoView {
    let ctx = use_dashboard_context();

    view! {
        <div class="graph-empty-state">
            <i class=format!("fas {}", placeholder.icon())></i>
            <h3>{placeholder.title()}</h3>
            <p>{placeholder.hint()}</p>
            {placeholder.call_to_action().map(|label| view! {
                <button class="btn btn-primary" on:click=move |_| ctx.act(|c| c.open_add_form())>
                    <i class="fas fa-plus"></i>
                    <span>{label}</span>
                </button>
            })}
        </div>
    }
}

/// Point where the segment from `from` to the center `to` crosses the
/// border of a `w` x `h` box around `to`.
fn clip_to_box(from: (f64, f64), to: (f64, f64), w: f64, h: f64) -> (f64, f64) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if dx == 0.0 && dy == 0.0 {
        return to;
    }
    let tx = if dx == 0.0 { f64::INFINITY } else { (w / 2.0) / dx.abs() };
    let ty = if dy == 0.0 { f64::INFINITY } else { (h / 2.0) / dy.abs() };
    let t = tx.min(ty).min(1.0);
    (to.0 - dx * t, to.1 - dy * t)
}

fn render_instance(
    ctx: DashboardContext,
    kind: GraphKind,
    graph: GraphInstance,
    hovered: RwSignal<Option<String>>,
) -> impl IntoView {
    let viewport = graph.viewport();
    let marker_id = match kind {
        GraphKind::Container => "arrow-container",
        GraphKind::Server => "arrow-server",
    };

    let edges = graph
        .elements()
        .edges
        .iter()
        .filter_map(|edge| {
            let from = graph.position(&edge.source)?;
            let to = graph.position(&edge.target)?;
            let fp = graph.footprint(&edge.target, false)?;
            let (x2, y2) = clip_to_box(from, to, fp.width, fp.height);
            let selected = graph.is_edge_selected(&edge.id);
            let color = if selected { EDGE_SELECTED } else { EDGE_COLOR };
            Some(view! {
                <line
                    class={if selected { "graph-edge selected" } else { "graph-edge" }}
                    x1={from.0}
                    y1={from.1}
                    x2=x2
                    y2=y2
                    stroke=color
                    stroke-width={if selected { "1.5" } else { "1" }}
                    marker-end={edge.directed.then(|| format!("url(#{})", marker_id))}
                />
            })
        })
        .collect_view();

    let nodes = graph
        .elements()
        .nodes
        .iter()
        .filter_map(|node| {
            let (x, y) = graph.position(&node.id)?;
            let rest = graph.footprint(&node.id, false)?;
            let hot = graph.footprint(&node.id, true)?;
            let selected = graph.is_node_selected(&node.id);
            let interactive = graph.accepts_hover(&node.id);
            let id_click = node.id.clone();
            let id_enter = node.id.clone();
            let id_leave = node.id.clone();
            let id_hot = node.id.clone();
            let fp = create_memo(move |_| {
                if hovered.with(|h| h.as_deref() == Some(id_hot.as_str())) {
                    hot
                } else {
                    rest
                }
            });

            let mut class = String::from("graph-node");
            if selected {
                class.push_str(" selected");
            }
            if !interactive {
                class.push_str(" hub");
            }

            Some(view! {
                <g
                    class=class
                    transform=format!("translate({:.1}, {:.1})", x, y)
                    on:click=move |e| {
                        e.stop_propagation();
                        ctx.act(|c| c.select_graph_node(kind, &id_click));
                    }
                    on:mouseenter=move |_| {
                        if interactive {
                            hovered.set(Some(id_enter.clone()));
                        }
                    }
                    on:mouseleave=move |_| {
                        hovered.update(|h| {
                            if h.as_deref() == Some(id_leave.as_str()) {
                                *h = None;
                            }
                        })
                    }
                >
                    <rect
                        x=move || -fp.get().width / 2.0
                        y=move || -fp.get().height / 2.0
                        width=move || fp.get().width
                        height=move || fp.get().height
                        rx="10"
                        fill="#F6F8FC"
                        stroke=node.border_color
                        stroke-width=move || fp.get().border_width
                    />
                    <text text-anchor="middle" dy="5" font-size="13">{node.caption()}</text>
                </g>
            })
        })
        .collect_view();

    view! {
        <svg
            class="graph-svg"
            viewBox=format!("0 0 {} {}", CANVAS_WIDTH, CANVAS_HEIGHT)
            on:click=move |_| ctx.act(|c| c.clear_graph_selection(kind))
        >
            <defs>
                <marker
                    id=marker_id
                    viewBox="0 0 10 10"
                    refX="10"
                    refY="5"
                    markerWidth="8"
                    markerHeight="8"
                    orient="auto-start-reverse"
                >
                    <path d="M 0 0 L 10 5 L 0 10 z" fill=EDGE_COLOR />
                </marker>
            </defs>
            <g transform=viewport.transform()>
                {edges}
                {nodes}
            </g>
        </svg>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_to_box_stops_at_border() {
        let (x, y) = clip_to_box((0.0, 0.0), (100.0, 0.0), 40.0, 20.0);
        assert!((x - 80.0).abs() < 1e-9);
        assert_eq!(y, 0.0);

        let (x, y) = clip_to_box((0.0, 0.0), (0.0, 100.0), 40.0, 20.0);
        assert_eq!(x, 0.0);
        assert!((y - 90.0).abs() < 1e-9);
    }
}
