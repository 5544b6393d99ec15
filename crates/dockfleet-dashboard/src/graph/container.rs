//! Container star graph: one hub for the Docker host, one leaf per container.

use super::{
    GraphEdge, GraphElements, GraphEngine, GraphInstance, GraphNode, GraphSurface, LayoutAlgorithm, NodeKind,
    Placeholder,
};
use crate::status::classify;
use crate::types::{Container, ContainerStatus};

/// Id of the synthetic hub node.
pub const HUB_ID: &str = "__docker_host__";

const HUB_LABEL: &str = "Docker Host";
const HUB_BORDER: &str = "#475569";

pub fn container_elements(containers: &[Container]) -> GraphElements {
    let hub_style = classify(&ContainerStatus::Running);
    let mut nodes = Vec::with_capacity(containers.len() + 1);
    nodes.push(GraphNode {
        id: HUB_ID.to_string(),
        label: HUB_LABEL.to_string(),
        glyph: hub_style.glyph,
        status: ContainerStatus::Running.to_string(),
        border_color: HUB_BORDER,
        kind: NodeKind::Hub,
    });

    let mut edges = Vec::with_capacity(containers.len());
    for c in containers {
        let style = classify(&c.status);
        nodes.push(GraphNode {
            id: c.id.clone(),
            label: c.display_name(),
            glyph: style.glyph,
            status: c.status.to_string(),
            border_color: style.color,
            kind: NodeKind::Container,
        });
        edges.push(GraphEdge {
            id: format!("edge-{}", c.id),
            source: HUB_ID.to_string(),
            target: c.id.clone(),
            directed: false,
        });
    }

    GraphElements { nodes, edges }
}

/// Build the surface for a container list. An empty list never creates a
/// graph.
pub fn render_container_graph(engine: &dyn GraphEngine, containers: &[Container], generation: u64) -> GraphSurface {
    if containers.is_empty() {
        return GraphSurface::Placeholder(Placeholder::NoContainers);
    }
    GraphSurface::from_build(GraphInstance::build(
        engine,
        container_elements(containers),
        LayoutAlgorithm::Star {
            hub: HUB_ID.to_string(),
        },
        generation,
    ))
}

/// Fields shown in the container detail modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerDetail {
    pub id: String,
    pub name: String,
    pub status: ContainerStatus,
    pub image: String,
    pub ports: String,
}

impl ContainerDetail {
    pub fn find(containers: &[Container], id: &str) -> Option<Self> {
        containers.iter().find(|c| c.id == id).map(Self::from)
    }
}

impl From<&Container> for ContainerDetail {
    fn from(c: &Container) -> Self {
        let or_na = |v: &Option<String>| {
            v.as_deref()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or("N/A")
                .to_string()
        };
        Self {
            id: c.id.clone(),
            name: c.display_name(),
            status: c.status.clone(),
            image: or_na(&c.image),
            ports: or_na(&c.ports),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BuiltinLayout;

    fn containers(n: usize) -> Vec<Container> {
        (0..n)
            .map(|i| Container {
                id: format!("c{:02}", i),
                name: Some(format!("svc-{}", i)),
                status: if i % 2 == 0 { ContainerStatus::Running } else { ContainerStatus::Exited },
                image: Some("redis:7".to_string()),
                ports: None,
            })
            .collect()
    }

    #[test]
    fn test_star_shape() {
        for n in [1, 2, 7] {
            let elements = container_elements(&containers(n));
            assert_eq!(elements.nodes.len(), n + 1);
            assert_eq!(elements.edges.len(), n);
            assert!(elements.edges.iter().all(|e| e.source == HUB_ID));
            assert_eq!(elements.node(HUB_ID).map(|h| h.label.as_str()), Some("Docker Host"));
        }
    }

    #[test]
    fn test_leaf_border_matches_status() {
        let elements = container_elements(&containers(2));
        assert_eq!(elements.node("c00").map(|n| n.border_color), Some("#22C55E"));
        assert_eq!(elements.node("c01").map(|n| n.border_color), Some("#4C5D7A"));
    }

    #[test]
    fn test_empty_list_renders_placeholder() {
        let surface = render_container_graph(&BuiltinLayout, &[], 1);
        assert_eq!(surface.placeholder(), Some(Placeholder::NoContainers));
        assert_eq!(surface.element_count(), (0, 0));
    }

    #[test]
    fn test_render_counts() {
        let surface = render_container_graph(&BuiltinLayout, &containers(4), 3);
        assert_eq!(surface.element_count(), (5, 4));
        assert_eq!(surface.instance().map(|i| i.generation()), Some(3));
    }

    #[test]
    fn test_detail_fills_missing_fields() {
        let list = containers(1);
        let detail = ContainerDetail::find(&list, "c00").expect("present");
        assert_eq!(detail.name, "svc-0");
        assert_eq!(detail.image, "redis:7");
        assert_eq!(detail.ports, "N/A");
        assert!(ContainerDetail::find(&list, "nope").is_none());
    }
}
