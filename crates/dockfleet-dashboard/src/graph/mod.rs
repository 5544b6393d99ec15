//! Topology graphs
//!
//! Two independent graphs are drawn: the container star of the selected node
//! and the server tree of the whole roster. Both follow the same lifecycle:
//! a [`GraphSlot`] tears its previous instance down completely and builds a
//! new one from whatever list it is handed. There is no incremental diffing.

mod container;
mod layout;
mod server;

pub use container::{container_elements, render_container_graph, ContainerDetail, HUB_ID};
pub use layout::{fit_viewport, BuiltinLayout, Layout, LayoutAlgorithm, Viewport, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use server::{partition, render_server_graph, server_elements, ServerDetail, ServerPartition};

use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

// =============================================================================
// Elements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic center of the container star. Not selectable.
    Hub,
    Container,
    Central,
    Client,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub glyph: &'static str,
    pub status: String,
    pub border_color: &'static str,
    pub kind: NodeKind,
}

impl GraphNode {
    /// Text drawn inside the node.
    pub fn caption(&self) -> String {
        format!("{} {}", self.glyph, self.label)
    }

    pub fn is_interactive(&self) -> bool {
        self.kind != NodeKind::Hub
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Drawn with an arrow head at `target`.
    pub directed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphElements {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphElements {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a GraphEdge> + 'a {
        self.edges
            .iter()
            .filter(move |e| e.source == id || e.target == id)
    }

    /// Reject element sets a renderer could not draw unambiguously.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Engine
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("edge {edge} references missing node {endpoint}")]
    DanglingEdge { edge: String, endpoint: String },

    #[error("graph engine unavailable: {0}")]
    Unavailable(String),
}

/// Layout capability the graphs are drawn with.
pub trait GraphEngine {
    fn layout(&self, elements: &GraphElements, algorithm: &LayoutAlgorithm) -> Result<Layout, GraphError>;
}

// =============================================================================
// Instance
// =============================================================================

/// On-screen size of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
    pub border_width: f64,
}

const CHAR_WIDTH: f64 = 7.5;
const HOVER_SCALE: f64 = 1.1;

/// Footprint of a node at rest: label-sized with a per-kind minimum.
pub fn resting_footprint(node: &GraphNode) -> Footprint {
    let (min_w, min_h, border_width) = match node.kind {
        NodeKind::Hub => (150.0, 90.0, 3.0),
        NodeKind::Container => (90.0, 70.0, 3.0),
        NodeKind::Central => (160.0, 70.0, 1.5),
        NodeKind::Client => (140.0, 60.0, 1.0),
    };
    let label_width = node.caption().chars().count() as f64 * CHAR_WIDTH + 24.0;
    Footprint {
        width: label_width.max(min_w),
        height: min_h,
        border_width,
    }
}

/// A laid-out graph plus its selection. Hover is held by the renderer and
/// passed in, so it never touches this value.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphInstance {
    generation: u64,
    elements: GraphElements,
    algorithm: LayoutAlgorithm,
    layout: Layout,
    viewport: Viewport,
    selected_node: Option<String>,
    selected_edges: BTreeSet<String>,
}

impl GraphInstance {
    pub fn build(
        engine: &dyn GraphEngine,
        elements: GraphElements,
        algorithm: LayoutAlgorithm,
        generation: u64,
    ) -> Result<Self, GraphError> {
        let layout = engine.layout(&elements, &algorithm)?;
        let viewport = fit_viewport(&layout, &elements);
        Ok(Self {
            generation,
            elements,
            algorithm,
            layout,
            viewport,
            selected_node: None,
            selected_edges: BTreeSet::new(),
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elements(&self) -> &GraphElements {
        &self.elements
    }

    pub fn node_count(&self) -> usize {
        self.elements.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.elements.edges.len()
    }

    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.layout.position(id)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn selected_node(&self) -> Option<&str> {
        self.selected_node.as_deref()
    }

    pub fn is_node_selected(&self, id: &str) -> bool {
        self.selected_node.as_deref() == Some(id)
    }

    pub fn is_edge_selected(&self, id: &str) -> bool {
        self.selected_edges.contains(id)
    }

    /// Select a node and its incident edges, replacing any prior selection.
    /// Returns false (and changes nothing) for the hub or unknown ids.
    pub fn select_node(&mut self, id: &str) -> bool {
        match self.elements.node(id) {
            Some(node) if node.is_interactive() => {}
            _ => return false,
        }
        self.selected_edges = self
            .elements
            .incident_edges(id)
            .map(|e| e.id.clone())
            .collect();
        self.selected_node = Some(id.to_string());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_node = None;
        self.selected_edges.clear();
    }

    /// Whether a node reacts to the pointer. The hub never does.
    pub fn accepts_hover(&self, id: &str) -> bool {
        self.elements.node(id).is_some_and(GraphNode::is_interactive)
    }

    /// Footprint of a node, hovered or at rest. Positions do not depend on
    /// hover, so siblings never move.
    pub fn footprint(&self, id: &str, hovered: bool) -> Option<Footprint> {
        let node = self.elements.node(id)?;
        let mut fp = resting_footprint(node);
        if hovered {
            match node.kind {
                NodeKind::Container => {
                    fp.width *= HOVER_SCALE;
                    fp.height *= HOVER_SCALE;
                    fp.border_width = 4.0;
                }
                NodeKind::Central | NodeKind::Client => fp.border_width = 1.5,
                NodeKind::Hub => {}
            }
        }
        if self.is_node_selected(id) {
            fp.border_width = fp.border_width.max(2.0);
        }
        Some(fp)
    }

    /// Run the layout again from scratch. Selection survives.
    pub fn reset_layout(&mut self, engine: &dyn GraphEngine) -> Result<(), GraphError> {
        self.layout = engine.layout(&self.elements, &self.algorithm)?;
        self.viewport = fit_viewport(&self.layout, &self.elements);
        Ok(())
    }

    pub fn fit(&mut self) {
        self.viewport = fit_viewport(&self.layout, &self.elements);
    }
}

// =============================================================================
// Surface
// =============================================================================

/// Empty states drawn instead of a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoContainers,
    NoServers,
    NetworkConfigurationNeeded,
}

impl Placeholder {
    pub fn icon(&self) -> &'static str {
        match self {
            Placeholder::NoContainers => "fa-inbox",
            Placeholder::NoServers => "fa-server",
            Placeholder::NetworkConfigurationNeeded => "fa-network-wired",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Placeholder::NoContainers => "No containers",
            Placeholder::NoServers => "No servers registered",
            Placeholder::NetworkConfigurationNeeded => "Network configuration needed",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Placeholder::NoContainers => "This node has no containers.",
            Placeholder::NoServers => "Add a server to build the network.",
            Placeholder::NetworkConfigurationNeeded => {
                "A central server alone cannot be drawn as a network. Add a client server."
            }
        }
    }

    /// Label of the add-server button, if the placeholder offers one.
    pub fn call_to_action(&self) -> Option<&'static str> {
        match self {
            Placeholder::NoContainers => None,
            Placeholder::NoServers => Some("Add server"),
            Placeholder::NetworkConfigurationNeeded => Some("Add client server"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GraphSurface {
    /// Nothing rendered yet, or torn down.
    #[default]
    Blank,
    Placeholder(Placeholder),
    /// Textual fallback when the engine could not draw the graph.
    Unavailable(String),
    Ready(GraphInstance),
}

impl GraphSurface {
    /// Build a ready surface, degrading to a fallback message on failure.
    pub fn from_build(result: Result<GraphInstance, GraphError>) -> Self {
        match result {
            Ok(instance) => GraphSurface::Ready(instance),
            Err(err) => {
                log::error!("graph rendering failed: {}", err);
                GraphSurface::Unavailable(format!("The graph could not be rendered: {}", err))
            }
        }
    }

    pub fn instance(&self) -> Option<&GraphInstance> {
        match self {
            GraphSurface::Ready(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        match self {
            GraphSurface::Placeholder(p) => Some(*p),
            _ => None,
        }
    }

    /// (nodes, edges) currently drawn.
    pub fn element_count(&self) -> (usize, usize) {
        self.instance()
            .map(|i| (i.node_count(), i.edge_count()))
            .unwrap_or((0, 0))
    }
}

/// Owner of one graph's lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSlot {
    surface: GraphSurface,
    generation: u64,
    teardowns: u64,
}

impl GraphSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy whatever is drawn, then draw the result of `build`.
    pub fn render_with<F>(&mut self, build: F)
    where
        F: FnOnce(u64) -> GraphSurface,
    {
        self.teardown();
        self.generation += 1;
        self.surface = build(self.generation);
    }

    pub fn teardown(&mut self) {
        if self.surface != GraphSurface::Blank {
            log::debug!("tearing down graph generation {}", self.generation);
            self.teardowns += 1;
        }
        self.surface = GraphSurface::Blank;
    }

    pub fn surface(&self) -> &GraphSurface {
        &self.surface
    }

    pub fn instance(&self) -> Option<&GraphInstance> {
        self.surface.instance()
    }

    pub fn instance_mut(&mut self) -> Option<&mut GraphInstance> {
        match &mut self.surface {
            GraphSurface::Ready(instance) => Some(instance),
            _ => None,
        }
    }

    /// Number of renders so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn teardowns(&self) -> u64 {
        self.teardowns
    }
}

// =============================================================================
// Tests
// =============================================================================
