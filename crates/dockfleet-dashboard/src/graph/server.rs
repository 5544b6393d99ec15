//! Server network graph: the central server on top, an arrow to every
//! client below it.

use super::{
    GraphEdge, GraphElements, GraphEngine, GraphInstance, GraphNode, GraphSurface, LayoutAlgorithm, NodeKind,
    Placeholder,
};
use crate::status::{server_border_color, server_glyph};
use crate::types::{NodeRole, NodeStatus, ServerNode};

/// A roster split by role.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerPartition<'a> {
    /// First server with the central role.
    pub central: Option<&'a ServerNode>,
    /// Further central servers. Drawn, but never connected.
    pub extra_centrals: Vec<&'a ServerNode>,
    pub clients: Vec<&'a ServerNode>,
}

pub fn partition(servers: &[ServerNode]) -> ServerPartition<'_> {
    let mut central = None;
    let mut extra_centrals = Vec::new();
    let mut clients = Vec::new();
    for server in servers {
        if !server.is_central() {
            clients.push(server);
        } else if central.is_none() {
            central = Some(server);
        } else {
            extra_centrals.push(server);
        }
    }
    if !extra_centrals.is_empty() {
        log::warn!(
            "{} additional central server(s) in roster; only the first is used as root",
            extra_centrals.len()
        );
    }
    ServerPartition {
        central,
        extra_centrals,
        clients,
    }
}

fn server_node(server: &ServerNode) -> GraphNode {
    GraphNode {
        id: server.id.clone(),
        label: server.display_label().to_string(),
        glyph: server_glyph(server.status),
        status: server.status.to_string(),
        border_color: server_border_color(server.role, server.status),
        kind: match server.role {
            NodeRole::Central => NodeKind::Central,
            NodeRole::Client => NodeKind::Client,
        },
    }
}

pub fn server_elements(servers: &[ServerNode]) -> GraphElements {
    let split = partition(servers);
    let nodes = servers.iter().map(server_node).collect();
    let edges = match split.central {
        Some(central) => split
            .clients
            .iter()
            .map(|client| GraphEdge {
                id: format!("edge-{}-{}", central.id, client.id),
                source: central.id.clone(),
                target: client.id.clone(),
                directed: true,
            })
            .collect(),
        None => Vec::new(),
    };
    GraphElements { nodes, edges }
}

pub fn render_server_graph(engine: &dyn GraphEngine, servers: &[ServerNode], generation: u64) -> GraphSurface {
    if servers.is_empty() {
        return GraphSurface::Placeholder(Placeholder::NoServers);
    }
    let split = partition(servers);
    if split.clients.is_empty() {
        return GraphSurface::Placeholder(Placeholder::NetworkConfigurationNeeded);
    }
    let root = split.central.map(|c| c.id.clone());
    GraphSurface::from_build(GraphInstance::build(
        engine,
        server_elements(servers),
        LayoutAlgorithm::Tree { root },
        generation,
    ))
}

/// Fields shown in the side panel for a selected server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerDetail {
    pub id: String,
    pub label: String,
    pub status: NodeStatus,
    pub role: NodeRole,
    pub node_type: String,
    pub base_url: String,
    pub last_check: Option<String>,
    pub error: Option<String>,
}

impl ServerDetail {
    pub fn find(servers: &[ServerNode], id: &str) -> Option<Self> {
        servers.iter().find(|s| s.id == id).map(Self::from)
    }
}

impl From<&ServerNode> for ServerDetail {
    fn from(s: &ServerNode) -> Self {
        Self {
            id: s.id.clone(),
            label: s.display_label().to_string(),
            status: s.status,
            role: s.role,
            node_type: s.node_type.clone().unwrap_or_else(|| "remote".to_string()),
            base_url: s.base_url.clone(),
            last_check: s.last_check.clone(),
            error: s.error.clone().filter(|e| !e.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::BuiltinLayout;

    fn server(id: &str, role: NodeRole, status: NodeStatus) -> ServerNode {
        ServerNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            base_url: format!("http://{}:2375", id),
            tls: false,
            role,
            status,
            node_type: None,
            last_check: None,
            error: None,
        }
    }

    #[test]
    fn test_empty_roster_placeholder() {
        let surface = render_server_graph(&BuiltinLayout, &[], 1);
        assert_eq!(surface.placeholder(), Some(Placeholder::NoServers));
    }

    #[test]
    fn test_central_only_needs_configuration() {
        let servers = vec![server("main", NodeRole::Central, NodeStatus::Online)];
        let surface = render_server_graph(&BuiltinLayout, &servers, 1);
        assert_eq!(surface.placeholder(), Some(Placeholder::NetworkConfigurationNeeded));
        assert_eq!(surface.element_count(), (0, 0));
    }

    #[test]
    fn test_one_edge_per_client() {
        let servers = vec![
            server("a", NodeRole::Client, NodeStatus::Offline),
            server("main", NodeRole::Central, NodeStatus::Online),
            server("b", NodeRole::Client, NodeStatus::Online),
            server("c", NodeRole::Client, NodeStatus::Unknown),
        ];
        let surface = render_server_graph(&BuiltinLayout, &servers, 1);
        assert_eq!(surface.element_count(), (4, 3));
        let instance = surface.instance().expect("graph drawn");
        assert!(instance.elements().edges.iter().all(|e| e.source == "main" && e.directed));
        assert_eq!(
            instance.elements().edges[0].id,
            "edge-main-a"
        );
    }

    #[test]
    fn test_clients_without_central_have_no_edges() {
        let servers = vec![
            server("a", NodeRole::Client, NodeStatus::Online),
            server("b", NodeRole::Client, NodeStatus::Online),
        ];
        let surface = render_server_graph(&BuiltinLayout, &servers, 1);
        assert_eq!(surface.element_count(), (2, 0));
    }

    #[test]
    fn test_extra_centrals_are_not_connected() {
        let servers = vec![
            server("main", NodeRole::Central, NodeStatus::Online),
            server("backup", NodeRole::Central, NodeStatus::Offline),
            server("a", NodeRole::Client, NodeStatus::Online),
        ];
        let split = partition(&servers);
        assert_eq!(split.central.map(|c| c.id.as_str()), Some("main"));
        assert_eq!(split.extra_centrals.len(), 1);

        let elements = server_elements(&servers);
        assert_eq!(elements.nodes.len(), 3);
        assert_eq!(elements.edges.len(), 1);
        assert_eq!(elements.incident_edges("backup").count(), 0);
    }

    #[test]
    fn test_detail_defaults_type_to_remote() {
        let servers = vec![server("edge", NodeRole::Client, NodeStatus::Unknown)];
        let detail = ServerDetail::find(&servers, "edge").expect("present");
        assert_eq!(detail.node_type, "remote");
        assert_eq!(detail.label, "EDGE");
        assert!(detail.error.is_none());
    }
}
