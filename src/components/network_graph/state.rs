use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::data::filter::FilteredView;
use crate::data::model::Node;

/// Node fill colors by `type` tag.
const NODE_COLORS: &[(&str, &str)] = &[
	("secret-society", "#660000"),
	("policy", "#8B7355"),
	("cross-ref", "#4A6670"),
];
/// Edge stroke colors by `type` tag.
const EDGE_COLORS: &[(&str, &str)] = &[
	("society-connection", "#8B0000"),
	("policy-connection", "#8B7355"),
];
const NODE_COLOR_FALLBACK: &str = "#C5A572";
const EDGE_COLOR_FALLBACK: &str = "#8B7355";

pub const HIT_RADIUS: f64 = 14.0;
const COLLISION_PADDING: f64 = 4.0;
const CENTERING_STRENGTH: f32 = 0.6;
const ENERGY_DECAY: f64 = 0.995;
const ENERGY_REST: f64 = 0.02;
/// Energy level used for gentle restarts (drag, resize).
const ENERGY_MILD: f64 = 0.3;

/// Per-node visual encoding, fixed for the lifetime of a view.
#[derive(Clone, Debug, Default)]
pub struct NodeVisual {
	pub id: String,
	pub label: String,
	pub color: String,
	pub radius: f64,
}

impl NodeVisual {
	fn from_node(node: &Node) -> Self {
		let color = NODE_COLORS
			.iter()
			.find(|(tag, _)| *tag == node.node_type)
			.map_or(NODE_COLOR_FALLBACK, |(_, c)| *c);
		Self {
			id: node.id.clone(),
			label: node.name.clone(),
			color: color.into(),
			radius: (6.0 + node.connection_count() as f64 * 0.2).min(16.0),
		}
	}
}

/// Per-edge visual encoding, fixed for the lifetime of a view.
#[derive(Clone, Debug)]
pub struct EdgeVisual {
	pub color: &'static str,
	pub width: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Selection highlight: the selected node, its direct neighbors, and an
/// eased dim factor for everything else.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
	pub id: Option<String>,
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
}

/// Zoom commands issued by the sidebar buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomCommand {
	In,
	Out,
	Reset,
}

/// Wraps the force simulation for the current filtered view and owns all
/// layout coordinates. Rebuilt (re-seeded) whenever the view changes, so a
/// stale tick can never resurrect a filtered-out node.
pub struct GraphState {
	pub graph: ForceGraph<NodeVisual, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub selection: SelectionState,
	pub width: f64,
	pub height: f64,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx, EdgeVisual)>,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	energy: f64,
	energy_floor: f64,
}

impl GraphState {
	pub fn new(view: &FilteredView, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(simulation_parameters()),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			selection: SelectionState::default(),
			width,
			height,
			edges: Vec::new(),
			id_to_idx: HashMap::new(),
			energy: 1.0,
			energy_floor: 0.0,
		};
		state.seed(view, &HashMap::new());
		state
	}

	/// Replace the simulation with the new view's nodes and edges. Nodes
	/// surviving the view change keep their positions; removed nodes are
	/// dropped outright, never merged.
	pub fn reseed(&mut self, view: &FilteredView) {
		let mut kept = HashMap::new();
		self.graph.visit_nodes(|node| {
			kept.insert(node.data.user_data.id.clone(), (node.x(), node.y()));
		});
		self.graph = ForceGraph::new(simulation_parameters());
		self.edges.clear();
		self.id_to_idx.clear();
		self.seed(view, &kept);
		self.energy = 1.0;
		let id = self.selection.id.take();
		self.selection.node = None;
		self.selection.neighbors.clear();
		self.set_selected(id);
	}

	fn seed(&mut self, view: &FilteredView, kept: &HashMap<String, (f32, f32)>) {
		let count = view.nodes.len().max(1);
		let ring = (self.width.min(self.height) / 4.0).max(60.0);
		for (i, node) in view.nodes.iter().enumerate() {
			let angle = i as f64 * 2.0 * PI / count as f64;
			let (x, y) = kept
				.get(&node.id)
				.copied()
				.unwrap_or(((ring * angle.cos()) as f32, (ring * angle.sin()) as f32));
			let idx = self.graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeVisual::from_node(node),
			});
			self.id_to_idx.insert(node.id.clone(), idx);
		}
		for edge in &view.edges {
			if let (Some(&src), Some(&tgt)) = (
				self.id_to_idx.get(&edge.source),
				self.id_to_idx.get(&edge.target),
			) {
				self.graph.add_edge(src, tgt, EdgeData::default());
				let color = EDGE_COLORS
					.iter()
					.find(|(tag, _)| *tag == edge.edge_type)
					.map_or(EDGE_COLOR_FALLBACK, |(_, c)| *c);
				self.edges.push((
					src,
					tgt,
					EdgeVisual {
						color,
						width: edge.weight * 1.5,
					},
				));
			}
		}
	}

	/// Styled edges of the current simulation.
	pub fn edges(&self) -> &[(DefaultNodeIdx, DefaultNodeIdx, EdgeVisual)] {
		&self.edges
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = node.data.user_data.radius.max(HIT_RADIUS);
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Id of the node at `idx`, if it is still in the simulation.
	pub fn node_id(&self, idx: DefaultNodeIdx) -> Option<String> {
		let mut found = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				found = Some(node.data.user_data.id.clone());
			}
		});
		found
	}

	pub fn set_selected(&mut self, id: Option<String>) {
		if self.selection.id == id && self.selection.node.is_some() == id.is_some() {
			return;
		}
		self.selection.id = id;
		self.selection.node = self
			.selection
			.id
			.as_ref()
			.and_then(|id| self.id_to_idx.get(id).copied());
		self.selection.neighbors.clear();
		if let Some(idx) = self.selection.node {
			for (src, tgt, _) in &self.edges {
				if *src == idx {
					self.selection.neighbors.insert(*tgt);
				} else if *tgt == idx {
					self.selection.neighbors.insert(*src);
				}
			}
		}
	}

	pub fn is_selected(&self, idx: DefaultNodeIdx) -> bool {
		self.selection.node == Some(idx)
	}

	pub fn is_neighbor(&self, idx: DefaultNodeIdx) -> bool {
		self.selection.neighbors.contains(&idx)
	}

	pub fn has_selection(&self) -> bool {
		self.selection.node.is_some()
	}

	/// Pin the dragged node to the pointer position.
	pub fn pin_drag_target(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
		self.energy_floor = ENERGY_MILD;
		self.energy = self.energy.max(ENERGY_MILD);
	}

	/// Release the pin so the node resumes free movement.
	pub fn release_drag_target(&mut self, idx: DefaultNodeIdx) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.is_anchor = false;
			}
		});
		self.energy_floor = 0.0;
	}

	pub fn apply_zoom(&mut self, command: ZoomCommand) {
		match command {
			ZoomCommand::In => self.zoom_about(self.width / 2.0, self.height / 2.0, 1.3),
			ZoomCommand::Out => self.zoom_about(self.width / 2.0, self.height / 2.0, 0.7),
			ZoomCommand::Reset => {
				self.transform = ViewTransform {
					x: self.width / 2.0,
					y: self.height / 2.0,
					k: 1.0,
				};
			}
		}
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_about(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(0.1, 10.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Advance the simulation one animation frame.
	pub fn tick(&mut self, dt: f32) {
		if self.energy > ENERGY_REST {
			let dt = dt * self.energy as f32;
			self.graph.update(dt);
			self.apply_centering(dt);
			self.apply_collisions();
			self.energy = (self.energy * ENERGY_DECAY).max(self.energy_floor);
		}

		// Ease the selection dim in and out.
		let target = if self.has_selection() { 1.0 } else { 0.0 };
		self.selection.highlight_t += (target - self.selection.highlight_t) * 1.8 * dt as f64;
		if self.selection.highlight_t < 0.01 && !self.has_selection() {
			self.selection.highlight_t = 0.0;
		}
	}

	// Mild pull toward the world origin; the view transform keeps the
	// origin at the viewport midpoint.
	fn apply_centering(&mut self, dt: f32) {
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x -= node.data.x * CENTERING_STRENGTH * dt;
				node.data.y -= node.data.y * CENTERING_STRENGTH * dt;
			}
		});
	}

	// Minimum-separation pass so node discs never overlap at rest.
	fn apply_collisions(&mut self) {
		let mut bodies: Vec<(DefaultNodeIdx, f64, f64, f64, bool)> = Vec::new();
		self.graph.visit_nodes(|node| {
			bodies.push((
				node.index(),
				node.x() as f64,
				node.y() as f64,
				node.data.user_data.radius,
				node.data.is_anchor,
			));
		});

		let mut push: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
		for i in 0..bodies.len() {
			for j in (i + 1)..bodies.len() {
				let (ai, ax, ay, ar, a_pinned) = bodies[i];
				let (bi, bx, by, br, b_pinned) = bodies[j];
				let (dx, dy) = (bx - ax, by - ay);
				let dist = (dx * dx + dy * dy).sqrt().max(0.001);
				let min_dist = ar + br + COLLISION_PADDING;
				if dist >= min_dist {
					continue;
				}
				let overlap = (min_dist - dist) / 2.0;
				let (ux, uy) = (dx / dist, dy / dist);
				if !a_pinned {
					let e = push.entry(ai).or_default();
					e.0 -= ux * overlap;
					e.1 -= uy * overlap;
				}
				if !b_pinned {
					let e = push.entry(bi).or_default();
					e.0 += ux * overlap;
					e.1 += uy * overlap;
				}
			}
		}
		if push.is_empty() {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if let Some(&(dx, dy)) = push.get(&node.index()) {
				node.data.x += dx as f32;
				node.data.y += dy as f32;
			}
		});
	}

	/// Recenter on a viewport resize and nudge the simulation back into a
	/// mild-energy state rather than snapping.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
		self.energy = self.energy.max(ENERGY_MILD);
	}
}

fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}
