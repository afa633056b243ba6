//! Derives the filtered view of the dataset from the active criteria.
//!
//! `filter` is a pure function recomputed from scratch on every criteria
//! change; the view never patches itself incrementally.

use std::collections::HashSet;

use serde::Serialize;

use super::model::{Dataset, Edge, Node};

/// Earliest cohort year in the corpus (Skull & Bones founding).
pub const YEAR_MIN: i32 = 1832;
/// Latest cohort year in the corpus.
pub const YEAR_MAX: i32 = 2025;

/// Organization categories a node can be matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrgCategory {
	/// Skull & Bones membership.
	Skull,
	/// Bilderberg Group attendance.
	Bilderberg,
	/// Trilateral Commission membership.
	Trilateral,
	/// Nodes cross-referenced across multiple source lists.
	CrossRef,
}

impl OrgCategory {
	/// All categories, in sidebar display order.
	pub const ALL: [OrgCategory; 4] = [
		OrgCategory::Skull,
		OrgCategory::Bilderberg,
		OrgCategory::Trilateral,
		OrgCategory::CrossRef,
	];

	/// Human-readable label for the sidebar checkbox.
	pub fn label(self) -> &'static str {
		match self {
			OrgCategory::Skull => "Skull & Bones",
			OrgCategory::Bilderberg => "Bilderberg Group",
			OrgCategory::Trilateral => "Trilateral Commission",
			OrgCategory::CrossRef => "Cross-referenced",
		}
	}

	/// Lowercase keywords tested against the node's `orgs` entries.
	fn keywords(self) -> &'static [&'static str] {
		match self {
			OrgCategory::Skull => &["skull", "bones"],
			OrgCategory::Bilderberg => &["bilderberg"],
			OrgCategory::Trilateral => &["trilateral"],
			OrgCategory::CrossRef => &["cross-ref", "cross reference"],
		}
	}

	/// Whether `node` belongs to this category.
	///
	/// Membership is derived from the node's own `orgs` entries by
	/// case-insensitive substring match; `CrossRef` additionally matches on
	/// the structured `type` tag.
	pub fn matches(self, node: &Node) -> bool {
		if self == OrgCategory::CrossRef && node.node_type == "cross-ref" {
			return true;
		}
		node.orgs.iter().any(|org| {
			let org = org.to_lowercase();
			self.keywords().iter().any(|kw| org.contains(kw))
		})
	}
}

/// Active filter criteria.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterCriteria {
	/// Categories a node must match at least one of.
	pub active_orgs: HashSet<OrgCategory>,
	/// Inclusive cohort-year range. Nodes without a year always pass.
	pub year_range: (i32, i32),
	/// Case-insensitive substring match on the display name.
	pub search: String,
}

impl Default for FilterCriteria {
	fn default() -> Self {
		Self {
			active_orgs: OrgCategory::ALL.into_iter().collect(),
			year_range: (YEAR_MIN, YEAR_MAX),
			search: String::new(),
		}
	}
}

impl FilterCriteria {
	/// Whether a node passes all three criteria.
	pub fn matches(&self, node: &Node) -> bool {
		self.matches_org(node) && self.matches_year(node) && self.matches_search(node)
	}

	fn matches_org(&self, node: &Node) -> bool {
		self.active_orgs.iter().any(|cat| cat.matches(node))
	}

	fn matches_year(&self, node: &Node) -> bool {
		match node.cohort_year {
			Some(year) => self.year_range.0 <= year && year <= self.year_range.1,
			None => true,
		}
	}

	fn matches_search(&self, node: &Node) -> bool {
		if self.search.is_empty() {
			return true;
		}
		node.name.to_lowercase().contains(&self.search.to_lowercase())
	}
}

/// The derived subset of the dataset currently shown.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct FilteredView {
	/// Passing nodes, in dataset order.
	pub nodes: Vec<Node>,
	/// Edges whose both endpoints are in `nodes`, in dataset order.
	pub edges: Vec<Edge>,
}

impl FilteredView {
	/// Look up a node of this view by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Display names of the nodes directly connected to `id` in this view,
	/// in edge order.
	pub fn neighbor_names(&self, id: &str) -> Vec<String> {
		self.edges
			.iter()
			.filter_map(|e| {
				let other = if e.source == id {
					&e.target
				} else if e.target == id {
					&e.source
				} else {
					return None;
				};
				Some(self.node(other).map_or_else(|| other.clone(), |n| n.name.clone()))
			})
			.collect()
	}
}

/// Compute the filtered view. Pure and order-preserving; edges with a
/// dangling endpoint are dropped, never shown partially.
pub fn filter(dataset: &Dataset, criteria: &FilterCriteria) -> FilteredView {
	let nodes: Vec<Node> = dataset
		.nodes
		.iter()
		.filter(|n| criteria.matches(n))
		.cloned()
		.collect();
	let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges = dataset
		.edges
		.iter()
		.filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
		.cloned()
		.collect();
	FilteredView { nodes, edges }
}
