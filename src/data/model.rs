//! Wire-format data model for the network dataset.
//!
//! The dataset is produced by an offline build step and fetched once at
//! startup. Optional fields are always defaulted, never errors; the in-memory
//! `Dataset` is read-only after [`Dataset::from_json`] returns.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A person or organization in the network.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Unique id; falls back to `name` when the source document omits it.
	#[serde(default)]
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub name: String,
	/// Categorical tag, e.g. `secret-society`, `policy`, `cross-ref`.
	#[serde(rename = "type", default)]
	pub node_type: String,
	/// Organization names this node belongs to.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub orgs: Vec<String>,
	/// Cohort year, when known. The data builder emits this as a string
	/// (possibly empty), so deserialization accepts both forms.
	#[serde(
		default,
		deserialize_with = "flexible_year",
		skip_serializing_if = "Option::is_none"
	)]
	pub cohort_year: Option<i32>,
	/// Notable position or fact.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<String>,
	/// Connection count; backfilled from edge incidence when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub connections: Option<u32>,
}

impl Node {
	/// Connection count with the documented default of zero.
	pub fn connection_count(&self) -> u32 {
		self.connections.unwrap_or(0)
	}
}

/// A connection between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Source node id.
	#[serde(default)]
	pub source: String,
	/// Target node id.
	#[serde(default)]
	pub target: String,
	/// Categorical tag determining display color.
	#[serde(rename = "type", default)]
	pub edge_type: String,
	/// Positive stroke-thickness weight.
	#[serde(default = "default_weight")]
	pub weight: f64,
}

fn default_weight() -> f64 {
	1.0
}

/// The full loaded dataset. Created once, immutable thereafter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	/// All nodes, in source order.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// All edges, in source order.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl Dataset {
	/// Parse and normalize a dataset document.
	///
	/// Both `nodes` and `edges` arrays are optional. Missing node ids default
	/// to the display name, missing types to `"unknown"`, missing edge types
	/// to `"connection"`, and missing or non-positive weights to 1.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let mut dataset: Dataset = serde_json::from_str(text)?;
		dataset.normalize();
		Ok(dataset)
	}

	fn normalize(&mut self) {
		for node in &mut self.nodes {
			if node.id.is_empty() {
				node.id = node.name.clone();
			}
			if node.node_type.is_empty() {
				node.node_type = "unknown".into();
			}
			if node.position.as_deref() == Some("") {
				node.position = None;
			}
		}
		for edge in &mut self.edges {
			if edge.edge_type.is_empty() {
				edge.edge_type = "connection".into();
			}
			if edge.weight <= 0.0 {
				edge.weight = 1.0;
			}
		}

		// The data builder precomputes `connections`; older documents lack
		// it, so backfill from edge incidence.
		let mut incidence: HashMap<&str, u32> = HashMap::new();
		for edge in &self.edges {
			*incidence.entry(edge.source.as_str()).or_default() += 1;
			*incidence.entry(edge.target.as_str()).or_default() += 1;
		}
		let counts: Vec<u32> = self
			.nodes
			.iter()
			.map(|n| incidence.get(n.id.as_str()).copied().unwrap_or(0))
			.collect();
		for (node, count) in self.nodes.iter_mut().zip(counts) {
			if node.connections.is_none() {
				node.connections = Some(count);
			}
		}
	}
}

/// Accepts an integer, a numeric string, an empty string, or null.
fn flexible_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
		Some(Value::String(s)) => s.trim().parse().ok(),
		_ => None,
	})
}
