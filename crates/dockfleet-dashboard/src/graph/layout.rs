//! Built-in graph layouts
//!
//! Positions are computed in an 800x600 canvas coordinate space; the viewport
//! then scales and pans that space so the whole graph is visible.

use super::{resting_footprint, GraphElements, GraphEngine, GraphError};
use std::collections::{HashMap, VecDeque};
use std::f64::consts::PI;

pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

const FIT_PADDING: f64 = 50.0;
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 2.0;

const STAR_MIN_RADIUS: f64 = 200.0;
const TREE_TOP: f64 = 80.0;
/// Vertical distance between tree layers.
const RANK_SEP: f64 = 190.0;
/// Horizontal distance between siblings in a layer.
const NODE_SEP: f64 = 180.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutAlgorithm {
    /// One hub in the middle, everything else on a ring around it.
    Star { hub: String },
    /// Layered top-down tree. Without a root every node sits in one row.
    Tree { root: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub positions: Vec<(String, f64, f64)>,
}

impl Layout {
    pub fn position(&self, id: &str) -> Option<(f64, f64)> {
        self.positions
            .iter()
            .find(|(node_id, _, _)| node_id == id)
            .map(|(_, x, y)| (*x, *y))
    }
}

/// Pan and zoom applied to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    /// SVG `transform` attribute for the content group.
    pub fn transform(&self) -> String {
        format!("translate({:.1}, {:.1}) scale({:.3})", self.pan_x, self.pan_y, self.zoom)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Deterministic in-process layout engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLayout;

impl GraphEngine for BuiltinLayout {
    fn layout(&self, elements: &GraphElements, algorithm: &LayoutAlgorithm) -> Result<Layout, GraphError> {
        elements.validate()?;
        let positions = match algorithm {
            LayoutAlgorithm::Star { hub } => star_layout(elements, hub),
            LayoutAlgorithm::Tree { root } => tree_layout(elements, root.as_deref()),
        };
        Ok(Layout { positions })
    }
}

fn star_layout(elements: &GraphElements, hub: &str) -> Vec<(String, f64, f64)> {
    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;

    let leaves: Vec<_> = elements.nodes.iter().filter(|n| n.id != hub).collect();
    // Keep neighbours from overlapping as the ring fills up
    let radius = STAR_MIN_RADIUS.max(leaves.len() as f64 * 110.0 / (2.0 * PI));

    let mut positions = Vec::with_capacity(elements.nodes.len());
    if elements.node(hub).is_some() {
        positions.push((hub.to_string(), center_x, center_y));
    }
    for (i, node) in leaves.iter().enumerate() {
        let angle = -PI / 2.0 + 2.0 * PI * (i as f64) / (leaves.len().max(1) as f64);
        positions.push((
            node.id.clone(),
            center_x + radius * angle.cos(),
            center_y + radius * angle.sin(),
        ));
    }
    positions
}

fn tree_layout(elements: &GraphElements, root: Option<&str>) -> Vec<(String, f64, f64)> {
    // Breadth-first depth from the root along directed edges
    let mut depth: HashMap<&str, usize> = HashMap::new();
    if let Some(root) = root.filter(|r| elements.node(r).is_some()) {
        depth.insert(root, 0);
        let mut queue = VecDeque::from([root]);
        while let Some(current) = queue.pop_front() {
            let next = depth[current] + 1;
            for edge in elements.edges.iter().filter(|e| e.source == current) {
                if !depth.contains_key(edge.target.as_str()) {
                    depth.insert(edge.target.as_str(), next);
                    queue.push_back(edge.target.as_str());
                }
            }
        }
    }

    // Unreached nodes hang one layer below the root, or form the only row
    let orphan_depth = if depth.is_empty() { 0 } else { 1 };
    let mut layers: Vec<Vec<&str>> = Vec::new();
    for node in &elements.nodes {
        let d = depth.get(node.id.as_str()).copied().unwrap_or(orphan_depth);
        if layers.len() <= d {
            layers.resize_with(d + 1, Vec::new);
        }
        layers[d].push(node.id.as_str());
    }

    let mut positions = Vec::with_capacity(elements.nodes.len());
    for (d, layer) in layers.iter().enumerate() {
        let row_width = (layer.len().saturating_sub(1)) as f64 * NODE_SEP;
        let start_x = CANVAS_WIDTH / 2.0 - row_width / 2.0;
        for (i, id) in layer.iter().enumerate() {
            positions.push((
                id.to_string(),
                start_x + i as f64 * NODE_SEP,
                TREE_TOP + d as f64 * RANK_SEP,
            ));
        }
    }
    positions
}

// =============================================================================
// Fit
// =============================================================================

/// Fit the whole graph into the canvas with a fixed padding. Zoom never goes
/// below 0.5 so large graphs stay legible (and scroll instead).
pub fn fit_viewport(layout: &Layout, elements: &GraphElements) -> Viewport {
    let mut bounds: Option<(f64, f64, f64, f64)> = None;
    for (id, x, y) in &layout.positions {
        let Some(node) = elements.node(id) else { continue };
        let fp = resting_footprint(node);
        let (hw, hh) = (fp.width / 2.0, fp.height / 2.0);
        bounds = Some(match bounds {
            None => (x - hw, y - hh, x + hw, y + hh),
            Some((min_x, min_y, max_x, max_y)) => (
                min_x.min(x - hw),
                min_y.min(y - hh),
                max_x.max(x + hw),
                max_y.max(y + hh),
            ),
        });
    }

    let Some((min_x, min_y, max_x, max_y)) = bounds else {
        return Viewport::default();
    };

    let width = (max_x - min_x).max(1.0);
    let height = (max_y - min_y).max(1.0);
    let zoom = ((CANVAS_WIDTH - 2.0 * FIT_PADDING) / width)
        .min((CANVAS_HEIGHT - 2.0 * FIT_PADDING) / height)
        .clamp(MIN_ZOOM, MAX_ZOOM);

    let center_x = (min_x + max_x) / 2.0;
    let center_y = (min_y + max_y) / 2.0;
    Viewport {
        zoom,
        pan_x: CANVAS_WIDTH / 2.0 - center_x * zoom,
        pan_y: CANVAS_HEIGHT / 2.0 - center_y * zoom,
    }
}
