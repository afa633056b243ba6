//! Summary statistics over the current filtered view.

use std::collections::HashMap;

use super::filter::FilteredView;

/// Aggregates shown in the statistics modal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkStats {
	/// Nodes in the view.
	pub node_count: usize,
	/// Edges in the view.
	pub edge_count: usize,
	/// Edges as a percentage of the maximum possible (n·(n−1)/2).
	pub density_pct: f64,
	/// Up to five most-connected node names with their in-view edge counts.
	pub top_connected: Vec<(String, u32)>,
}

impl NetworkStats {
	/// Compute statistics for `view`. Connection counts here are in-view
	/// edge incidence, not the dataset-wide `connections` field.
	pub fn from_view(view: &FilteredView) -> Self {
		let node_count = view.nodes.len();
		let edge_count = view.edges.len();
		let max_edges = node_count.saturating_sub(1) * node_count / 2;
		let density_pct = if max_edges == 0 {
			0.0
		} else {
			edge_count as f64 / max_edges as f64 * 100.0
		};

		let mut incidence: HashMap<&str, u32> = HashMap::new();
		for edge in &view.edges {
			*incidence.entry(edge.source.as_str()).or_default() += 1;
			*incidence.entry(edge.target.as_str()).or_default() += 1;
		}
		// Rank in dataset order so equal counts stay stable.
		let mut ranked: Vec<(String, u32)> = view
			.nodes
			.iter()
			.filter_map(|n| {
				let count = incidence.get(n.id.as_str()).copied().unwrap_or(0);
				(count > 0).then(|| (n.name.clone(), count))
			})
			.collect();
		ranked.sort_by(|a, b| b.1.cmp(&a.1));
		ranked.truncate(5);

		Self {
			node_count,
			edge_count,
			density_pct,
			top_connected: ranked,
		}
	}
}
