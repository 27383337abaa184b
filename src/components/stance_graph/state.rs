//! Simulation state: owns the force-graph instance built from a
//! [`StanceGraph`] plus the view transform and interaction state.
//!
//! The solver crate handles integration, charge repulsion, damping and
//! anchor pinning. Rest length and stiffness are per edge here, so its
//! uniform spring is disabled and `tick` applies the per-edge link
//! parameters as positional corrections before each solver step.

use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::{GraphNode, NodeId, NodeKind, StanceGraph};

/// Radius of the ring the theses start on. Matches the neutral rest length,
/// so the seed layout is already near equilibrium for the neutral edges.
const THESIS_RING: f32 = 130.0;
/// Radius of the ring the parties start on, outside the theses.
const PARTY_RING: f32 = 360.0;

/// Per-tick gain of the link pass.
const LINK_GAIN: f32 = 6.0;
/// Largest positional correction a single edge may apply per tick.
const MAX_LINK_STEP: f32 = 30.0;

/// Extra world-space slack around a node when hit-testing the pointer.
const HIT_SLACK: f64 = 5.0;

/// User-toggled importance of a thesis or party. Scales the strength of
/// every incident edge and the node's drawn radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Relevance {
	/// Down-weighted by the user.
	Low,
	/// Untouched.
	#[default]
	Normal,
	/// Up-weighted by the user.
	High,
}

impl Relevance {
	/// Next level in the click cycle: Normal → High → Low → Normal.
	pub fn next(self) -> Self {
		match self {
			Relevance::Normal => Relevance::High,
			Relevance::High => Relevance::Low,
			Relevance::Low => Relevance::Normal,
		}
	}

	/// Multiplier applied to incident edge strengths.
	pub fn weight(self) -> f32 {
		match self {
			Relevance::Low => 0.5,
			Relevance::Normal => 1.0,
			Relevance::High => 2.0,
		}
	}

	/// Multiplier applied to the drawn radius.
	pub fn radius_scale(self) -> f64 {
		match self {
			Relevance::Low => 0.8,
			Relevance::Normal => 1.0,
			Relevance::High => 1.3,
		}
	}
}

/// Per-node rendering and interaction data stored in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeVisual {
	/// Display label, shown as the hover tooltip.
	pub label: String,
	/// Fill color.
	pub color: String,
	/// Radius before relevance scaling.
	pub base_radius: f64,
	/// True only for the neutral anchor: never moves, never toggles.
	pub pinned: bool,
	/// User-toggled weight.
	pub relevance: Relevance,
}

/// Per-edge parameters, all computed once at construction.
#[derive(Clone, Debug, Default)]
pub struct EdgeVisual {
	/// Rest length in the simulation.
	pub distance: f32,
	/// Spring stiffness before relevance scaling.
	pub strength: f32,
	/// Drawn stroke width.
	pub stroke_width: f64,
	/// Drawn dash pattern; empty means solid.
	pub dash: &'static [f64],
	/// Stroke color (the target node's color).
	pub color: String,
}

/// Pan/zoom transform from graph space to screen space.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Screen-space x of the graph origin.
	pub x: f64,
	/// Screen-space y of the graph origin.
	pub y: f64,
	/// Zoom factor.
	pub k: f64,
}

/// An in-flight node drag gesture.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// A gesture is active.
	pub active: bool,
	/// The grabbed node.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at mousedown, screen space.
	pub start_x: f64,
	/// Pointer position at mousedown, screen space.
	pub start_y: f64,
	/// Node position at mousedown, graph space.
	pub node_start_x: f32,
	/// Node position at mousedown, graph space.
	pub node_start_y: f32,
	/// The pointer left the click threshold, so this is a drag, not a click.
	pub moved: bool,
}

/// An in-flight background pan gesture.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A gesture is active.
	pub active: bool,
	/// Pointer position at mousedown.
	pub start_x: f64,
	/// Pointer position at mousedown.
	pub start_y: f64,
	/// Transform origin at mousedown.
	pub transform_start_x: f64,
	/// Transform origin at mousedown.
	pub transform_start_y: f64,
}

/// The node under the pointer and its direct neighbors.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
	/// Hovered node, if any.
	pub node: Option<DefaultNodeIdx>,
	/// Nodes sharing an edge with the hovered node.
	pub neighbors: HashSet<DefaultNodeIdx>,
}

/// Owns the running simulation and all interaction state.
pub struct StanceGraphState {
	/// The relaxing force graph.
	pub graph: ForceGraph<NodeVisual, EdgeVisual>,
	/// Pan/zoom transform.
	pub transform: ViewTransform,
	/// Drag gesture state.
	pub drag: DragState,
	/// Pan gesture state.
	pub pan: PanState,
	/// Hover state.
	pub hover: HoverState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// The animation loop advances the simulation while true.
	pub animation_running: bool,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
}

fn ring_position(i: usize, n: usize, radius: f32) -> (f32, f32) {
	let angle = (i as f32) * 2.0 * PI / (n.max(1) as f32);
	(radius * angle.cos(), radius * angle.sin())
}

impl StanceGraphState {
	/// Build the simulation from a stance graph. The neutral anchor is
	/// pinned at the graph-space origin; theses and parties start on
	/// deterministic rings around it.
	pub fn new(data: &StanceGraph, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			// Rest length and stiffness are per edge, applied in tick().
			force_spring: 0.0,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});

		let n_theses = data
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Thesis)
			.count();
		let n_parties = data
			.nodes
			.iter()
			.filter(|n| matches!(n.kind, NodeKind::Party { .. }))
			.count();

		let mut id_to_idx: HashMap<NodeId, DefaultNodeIdx> = HashMap::new();
		let (mut thesis_i, mut party_i) = (0, 0);
		for node in &data.nodes {
			let (x, y, pinned) = match node.kind {
				NodeKind::Thesis => {
					let (x, y) = ring_position(thesis_i, n_theses, THESIS_RING);
					thesis_i += 1;
					(x, y, false)
				}
				NodeKind::NeutralAnchor => (0.0, 0.0, true),
				NodeKind::Party { .. } => {
					let (x, y) = ring_position(party_i, n_parties, PARTY_RING);
					party_i += 1;
					(x, y, false)
				}
			};
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: pinned,
				user_data: NodeVisual {
					label: node.label.clone(),
					color: node.kind.color().to_string(),
					base_radius: node.kind.radius(),
					pinned,
					relevance: Relevance::default(),
				},
			});
			id_to_idx.insert(node.id, idx);
		}

		let by_id: HashMap<NodeId, &GraphNode> = data.nodes.iter().map(|n| (n.id, n)).collect();
		let mut edges = Vec::with_capacity(data.edges.len());
		for edge in &data.edges {
			if let (Some(&src), Some(&tgt), Some(target_node)) = (
				id_to_idx.get(&edge.source),
				id_to_idx.get(&edge.target),
				by_id.get(&edge.target),
			) {
				graph.add_edge(
					src,
					tgt,
					EdgeData {
						user_data: EdgeVisual {
							distance: edge.stance.link_distance() as f32,
							strength: edge.stance.link_strength() as f32,
							stroke_width: edge.stance.stroke_width(),
							dash: edge.stance.dash_pattern(),
							color: target_node.kind.color().to_string(),
						},
						..Default::default()
					},
				);
				edges.push((src, tgt));
			}
		}

		Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	/// Convert screen coordinates to graph space.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the given screen position, if any.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let v = &node.data.user_data;
			let r = v.base_radius * v.relevance.radius_scale() + HIT_SLACK;
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < r {
				found = Some(node.index());
			}
		});
		found
	}

	/// Whether the node is the permanently pinned neutral anchor.
	pub fn is_pinned(&self, idx: DefaultNodeIdx) -> bool {
		let mut pinned = false;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				pinned = node.data.user_data.pinned;
			}
		});
		pinned
	}

	/// Update the hovered node and recompute its neighbor set.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		self.hover.node = node;
		self.hover.neighbors.clear();
		if let Some(idx) = node {
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	/// The node is hovered or shares an edge with the hovered node.
	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.neighbors.contains(&idx)
	}

	/// Cycle the relevance level of a node. The pinned anchor is skipped.
	pub fn toggle_relevance(&mut self, idx: DefaultNodeIdx) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx && !node.data.user_data.pinned {
				node.data.user_data.relevance = node.data.user_data.relevance.next();
			}
		});
	}

	/// One simulation step: apply the per-edge link parameters as positional
	/// corrections, then let the solver handle repulsion and integration.
	pub fn tick(&mut self, dt: f32) {
		let mut shift: HashMap<DefaultNodeIdx, (f32, f32)> = HashMap::new();
		self.graph.visit_edges(|a, b, edge| {
			let (dx, dy) = (b.x() - a.x(), b.y() - a.y());
			let len = (dx * dx + dy * dy).sqrt().max(1.0);
			let strength = edge.user_data.strength
				* a.data.user_data.relevance.weight()
				* b.data.user_data.relevance.weight();
			// Half the correction per endpoint; anchors ignore theirs.
			let step = ((len - edge.user_data.distance) * 0.5 * strength * dt * LINK_GAIN)
				.clamp(-MAX_LINK_STEP, MAX_LINK_STEP);
			let (ux, uy) = (dx / len, dy / len);
			let entry = shift.entry(a.index()).or_default();
			entry.0 += ux * step;
			entry.1 += uy * step;
			let entry = shift.entry(b.index()).or_default();
			entry.0 -= ux * step;
			entry.1 -= uy * step;
		});
		self.graph.visit_nodes_mut(|node| {
			if node.data.is_anchor {
				return;
			}
			if let Some(&(sx, sy)) = shift.get(&node.index()) {
				node.data.x += sx;
				node.data.y += sy;
			}
		});
		self.graph.update(dt);
	}

	/// Track a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::stance_graph::builder::build_graph;
	use crate::components::stance_graph::parser::{parse_rows, SurveyRow};

	fn small_graph() -> StanceGraph {
		let rows: Vec<SurveyRow> = vec![
			vec![
				("These".to_string(), "Q1".to_string()),
				("A".to_string(), "#".to_string()),
				("B".to_string(), "x".to_string()),
			],
			vec![
				("These".to_string(), "Q2".to_string()),
				("A".to_string(), "-".to_string()),
				("B".to_string(), "#".to_string()),
			],
		];
		build_graph(&parse_rows(&rows).unwrap())
	}

	fn node_count(state: &StanceGraphState) -> usize {
		let mut n = 0;
		state.graph.visit_nodes(|_| n += 1);
		n
	}

	#[test]
	fn simulation_mirrors_the_built_graph() {
		let data = small_graph();
		let state = StanceGraphState::new(&data, 800.0, 600.0);
		assert_eq!(node_count(&state), data.nodes.len());
		let mut edges = 0;
		state.graph.visit_edges(|_, _, _| edges += 1);
		assert_eq!(edges, data.edges.len());
	}

	#[test]
	fn anchor_stays_at_the_origin_under_simulation() {
		let data = small_graph();
		let mut state = StanceGraphState::new(&data, 800.0, 600.0);
		for _ in 0..60 {
			state.tick(0.016);
		}
		let mut anchor_pos = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.pinned {
				anchor_pos = Some((node.x(), node.y()));
			}
			assert!(node.x().is_finite() && node.y().is_finite());
		});
		assert_eq!(anchor_pos, Some((0.0, 0.0)));
	}

	#[test]
	fn screen_to_graph_inverts_the_transform() {
		let state = StanceGraphState::new(&small_graph(), 800.0, 600.0);
		// Transform origin is the canvas center at k = 1.
		assert_eq!(state.screen_to_graph(400.0, 300.0), (0.0, 0.0));
		assert_eq!(state.screen_to_graph(500.0, 300.0), (100.0, 0.0));
	}

	#[test]
	fn hit_test_finds_the_anchor_at_the_center() {
		let state = StanceGraphState::new(&small_graph(), 800.0, 600.0);
		let idx = state.node_at_position(400.0, 300.0).unwrap();
		assert!(state.is_pinned(idx));
	}

	#[test]
	fn relevance_cycles_and_skips_the_anchor() {
		let data = small_graph();
		let mut state = StanceGraphState::new(&data, 800.0, 600.0);
		let mut free = None;
		let mut pinned = None;
		state.graph.visit_nodes(|node| {
			if node.data.user_data.pinned {
				pinned = Some(node.index());
			} else if free.is_none() {
				free = Some(node.index());
			}
		});
		let (free, pinned) = (free.unwrap(), pinned.unwrap());

		state.toggle_relevance(free);
		state.toggle_relevance(pinned);
		state.graph.visit_nodes(|node| {
			if node.index() == free {
				assert_eq!(node.data.user_data.relevance, Relevance::High);
			}
			if node.index() == pinned {
				assert_eq!(node.data.user_data.relevance, Relevance::Normal);
			}
		});
	}

	#[test]
	fn relevance_levels_cycle_back_to_normal() {
		let start = Relevance::default();
		assert_eq!(start.next().next().next(), start);
		assert!(Relevance::High.weight() > Relevance::Normal.weight());
		assert!(Relevance::Low.weight() < Relevance::Normal.weight());
	}

	#[test]
	fn hover_collects_direct_neighbors() {
		let data = small_graph();
		let mut state = StanceGraphState::new(&data, 800.0, 600.0);
		// The anchor is connected to every thesis: 2 neighbors.
		let anchor = state.node_at_position(400.0, 300.0).unwrap();
		state.set_hover(Some(anchor));
		assert_eq!(state.hover.neighbors.len(), 2);
		assert!(state.is_highlighted(anchor));
		state.set_hover(None);
		assert!(state.hover.neighbors.is_empty());
	}
}
