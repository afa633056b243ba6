use std::collections::HashSet;

use hidden_networks::components::panels::HELP_TIPS;
use hidden_networks::controller::{AppModel, Command, NEIGHBOR_LIMIT, SearchStatus};
use hidden_networks::data::export::view_to_json;
use hidden_networks::data::filter::{
	FilterCriteria, FilteredView, OrgCategory, YEAR_MAX, YEAR_MIN, filter,
};
use hidden_networks::data::model::{Dataset, Edge, Node};
use hidden_networks::data::stats::NetworkStats;

fn node(id: &str, name: &str, orgs: &[&str]) -> Node {
	Node {
		id: id.into(),
		name: name.into(),
		node_type: "secret-society".into(),
		orgs: orgs.iter().map(|o| o.to_string()).collect(),
		cohort_year: None,
		position: None,
		connections: None,
	}
}

fn edge(source: &str, target: &str) -> Edge {
	Edge {
		source: source.into(),
		target: target.into(),
		edge_type: "connection".into(),
		weight: 1.0,
	}
}

fn alice_bob_dataset() -> Dataset {
	Dataset {
		nodes: vec![
			node("A", "Alice", &["Skull & Bones"]),
			node("B", "Bob", &["Bilderberg"]),
		],
		edges: vec![Edge {
			weight: 2.0,
			..edge("A", "B")
		}],
	}
}

fn criteria_with(categories: &[OrgCategory]) -> FilterCriteria {
	FilterCriteria {
		active_orgs: categories.iter().copied().collect(),
		..FilterCriteria::default()
	}
}

#[test]
fn load_defaults_missing_optional_fields() {
	let dataset = Dataset::from_json(
		r#"{
			"nodes": [{"name": "Prescott"}],
			"edges": [{"source": "Prescott", "target": "Prescott"}]
		}"#,
	)
	.expect("parse ok");

	let n = &dataset.nodes[0];
	assert_eq!(n.id, "Prescott", "id falls back to name");
	assert_eq!(n.node_type, "unknown");
	assert!(n.orgs.is_empty());
	assert_eq!(n.cohort_year, None);

	let e = &dataset.edges[0];
	assert_eq!(e.edge_type, "connection");
	assert_eq!(e.weight, 1.0);
}

#[test]
fn load_accepts_empty_and_absent_arrays() {
	assert_eq!(Dataset::from_json("{}").expect("parse ok"), Dataset::default());
	let dataset = Dataset::from_json(r#"{"nodes": []}"#).expect("parse ok");
	assert!(dataset.nodes.is_empty() && dataset.edges.is_empty());
}

#[test]
fn load_rejects_malformed_document() {
	assert!(Dataset::from_json("not json").is_err());
	assert!(Dataset::from_json(r#"{"nodes": 7}"#).is_err());
}

#[test]
fn cohort_year_tolerates_string_and_empty_forms() {
	let dataset = Dataset::from_json(
		r#"{"nodes": [
			{"name": "a", "cohort_year": 1947},
			{"name": "b", "cohort_year": "1968"},
			{"name": "c", "cohort_year": ""},
			{"name": "d", "cohort_year": null},
			{"name": "e"},
			{"name": "f", "cohort_year": 99999999999}
		]}"#,
	)
	.expect("parse ok");
	let years: Vec<Option<i32>> = dataset.nodes.iter().map(|n| n.cohort_year).collect();
	// Out-of-range years are dropped, never wrapped.
	assert_eq!(years, vec![Some(1947), Some(1968), None, None, None, None]);
}

#[test]
fn load_backfills_connection_counts_from_edges() {
	let dataset = Dataset::from_json(
		r#"{
			"nodes": [{"name": "a"}, {"name": "b"}, {"name": "c", "connections": 99}],
			"edges": [
				{"source": "a", "target": "b"},
				{"source": "a", "target": "c"}
			]
		}"#,
	)
	.expect("parse ok");
	assert_eq!(dataset.nodes[0].connection_count(), 2);
	assert_eq!(dataset.nodes[1].connection_count(), 1);
	// An explicit count from the builder is never overwritten.
	assert_eq!(dataset.nodes[2].connection_count(), 99);
}

#[test]
fn filter_single_category_drops_excluded_endpoint_edge() {
	let dataset = alice_bob_dataset();
	let view = filter(&dataset, &criteria_with(&[OrgCategory::Skull]));
	assert_eq!(view.nodes.len(), 1);
	assert_eq!(view.nodes[0].id, "A");
	assert!(view.edges.is_empty(), "edge to excluded Bob must be dropped");
}

#[test]
fn filter_both_categories_keeps_edge() {
	let dataset = alice_bob_dataset();
	let view = filter(
		&dataset,
		&criteria_with(&[OrgCategory::Skull, OrgCategory::Bilderberg]),
	);
	assert_eq!(view.nodes.len(), 2);
	assert_eq!(view.edges.len(), 1);
	assert_eq!(view.edges[0].weight, 2.0);
}

#[test]
fn filter_never_yields_dangling_edges() {
	let mut dataset = alice_bob_dataset();
	dataset.edges.push(edge("A", "ghost"));
	dataset.edges.push(edge("ghost", "B"));

	let combos: Vec<Vec<OrgCategory>> = vec![
		vec![],
		vec![OrgCategory::Skull],
		vec![OrgCategory::Bilderberg],
		OrgCategory::ALL.to_vec(),
	];
	for combo in combos {
		let view = filter(&dataset, &criteria_with(&combo));
		let ids: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
		for e in &view.edges {
			assert!(ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()));
		}
	}
}

#[test]
fn filter_is_pure_and_idempotent() {
	let dataset = alice_bob_dataset();
	let criteria = FilterCriteria::default();
	let first = filter(&dataset, &criteria);
	let second = filter(&dataset, &criteria);
	assert_eq!(first, second);
}

#[test]
fn filter_preserves_dataset_order() {
	let dataset = Dataset {
		nodes: vec![
			node("C", "Carol", &["Skull & Bones"]),
			node("A", "Alice", &["Skull & Bones"]),
			node("B", "Bob", &["Skull & Bones"]),
		],
		edges: vec![edge("B", "A"), edge("C", "A")],
	};
	let view = filter(&dataset, &FilterCriteria::default());
	let ids: Vec<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
	assert_eq!(ids, vec!["C", "A", "B"]);
	assert_eq!(view.edges[0].source, "B");
	assert_eq!(view.edges[1].source, "C");
}

#[test]
fn empty_search_is_identity_modulo_other_criteria() {
	let dataset = alice_bob_dataset();
	let view = filter(&dataset, &FilterCriteria::default());
	assert_eq!(view.nodes, dataset.nodes);
	assert_eq!(view.edges, dataset.edges);
}

#[test]
fn search_is_case_insensitive_substring() {
	let dataset = alice_bob_dataset();
	let criteria = FilterCriteria {
		search: "aLiC".into(),
		..FilterCriteria::default()
	};
	let view = filter(&dataset, &criteria);
	assert_eq!(view.nodes.len(), 1);
	assert_eq!(view.nodes[0].name, "Alice");
}

#[test]
fn undated_nodes_survive_any_year_range() {
	let mut dataset = alice_bob_dataset();
	dataset.nodes[0].cohort_year = Some(1900);
	// Bob stays undated.
	for range in [(YEAR_MIN, YEAR_MAX), (1990, 2000), (YEAR_MIN, 1850)] {
		let criteria = FilterCriteria {
			year_range: range,
			..FilterCriteria::default()
		};
		let view = filter(&dataset, &criteria);
		assert!(
			view.nodes.iter().any(|n| n.id == "B"),
			"undated node excluded by range {range:?}"
		);
	}
}

#[test]
fn year_range_is_inclusive() {
	let mut dataset = alice_bob_dataset();
	dataset.nodes[0].cohort_year = Some(1900);
	let criteria = FilterCriteria {
		year_range: (1900, 1900),
		..FilterCriteria::default()
	};
	let view = filter(&dataset, &criteria);
	assert!(view.nodes.iter().any(|n| n.id == "A"));
}

#[test]
fn cross_ref_matches_by_type_tag() {
	let mut n = node("X", "Xavier", &[]);
	n.node_type = "cross-ref".into();
	let dataset = Dataset {
		nodes: vec![n],
		edges: vec![],
	};
	let view = filter(&dataset, &criteria_with(&[OrgCategory::CrossRef]));
	assert_eq!(view.nodes.len(), 1);
	let view = filter(&dataset, &criteria_with(&[OrgCategory::Skull]));
	assert!(view.nodes.is_empty());
}

#[test]
fn no_active_categories_yields_empty_view() {
	let dataset = alice_bob_dataset();
	let view = filter(&dataset, &criteria_with(&[]));
	assert!(view.nodes.is_empty() && view.edges.is_empty());
}

fn installed_model() -> AppModel {
	let mut model = AppModel::default();
	model.install(alice_bob_dataset());
	model
}

#[test]
fn search_with_single_match_auto_selects() {
	let mut model = installed_model();
	model.dispatch(Command::SearchChanged("alice".into()));
	assert_eq!(model.view.nodes.len(), 1);
	assert_eq!(model.search_status, SearchStatus::AutoSelected("A".into()));
	assert_eq!(model.selected_id().as_deref(), Some("A"));
}

#[test]
fn search_with_no_matches_reports_it() {
	let mut model = installed_model();
	model.dispatch(Command::SearchChanged("zzz".into()));
	assert_eq!(model.search_status, SearchStatus::NoMatches);
	assert!(model.selection.is_none());
}

#[test]
fn clearing_search_restores_full_view() {
	let mut model = installed_model();
	model.dispatch(Command::SearchChanged("alice".into()));
	model.dispatch(Command::SearchChanged(String::new()));
	assert_eq!(model.view.nodes.len(), 2);
	assert_eq!(model.search_status, SearchStatus::Idle);
}

#[test]
fn selection_partition_lists_neighbors() {
	let mut model = installed_model();
	model.dispatch(Command::Select("A".into()));
	let selection = model.selection.clone().expect("selection set");
	assert_eq!(selection.id, "A");
	assert_eq!(selection.neighbor_names, vec!["Bob".to_string()]);
	assert!(!selection.truncated);
}

#[test]
fn selection_neighbor_list_truncates_at_limit() {
	let mut nodes = vec![node("hub", "Hub", &["Skull & Bones"])];
	let mut edges = Vec::new();
	for i in 0..12 {
		let id = format!("n{i}");
		nodes.push(node(&id, &format!("Member {i}"), &["Skull & Bones"]));
		edges.push(edge("hub", &id));
	}
	let mut model = AppModel::default();
	model.install(Dataset { nodes, edges });
	model.dispatch(Command::Select("hub".into()));

	let selection = model.selection.clone().expect("selection set");
	assert_eq!(selection.neighbor_names.len(), NEIGHBOR_LIMIT);
	assert!(selection.truncated);
	assert_eq!(selection.neighbor_names[0], "Member 0");
}

#[test]
fn selecting_unknown_id_is_a_no_op() {
	let mut model = installed_model();
	model.dispatch(Command::Select("ghost".into()));
	assert!(model.selection.is_none());
}

#[test]
fn deselect_returns_to_idle() {
	let mut model = installed_model();
	model.dispatch(Command::Select("A".into()));
	model.dispatch(Command::Deselect);
	assert!(model.selection.is_none());
}

#[test]
fn criteria_change_clears_selection_and_recomputes() {
	let mut model = installed_model();
	model.dispatch(Command::Select("A".into()));
	model.dispatch(Command::SetCategory(OrgCategory::Bilderberg, false));
	assert!(model.selection.is_none());
	assert_eq!(model.view.nodes.len(), 1);
	assert!(model.view.edges.is_empty());
}

#[test]
fn year_range_command_is_clamped_and_ordered() {
	let mut model = installed_model();
	model.dispatch(Command::SetYearRange(2300, 1700));
	assert_eq!(model.criteria.year_range, (YEAR_MIN, YEAR_MAX));
	model.dispatch(Command::SetYearRange(1990, 1950));
	assert_eq!(model.criteria.year_range, (1950, 1990));
}

#[test]
fn era_preset_applies_named_range() {
	let mut model = installed_model();
	model.dispatch(Command::ApplyEra(2));
	assert_eq!(model.criteria.year_range, (1946, 1990));
	// Out-of-range preset indices are ignored.
	model.dispatch(Command::ApplyEra(99));
	assert_eq!(model.criteria.year_range, (1946, 1990));
}

#[test]
fn reset_filters_restores_defaults() {
	let mut model = installed_model();
	model.dispatch(Command::SearchChanged("alice".into()));
	model.dispatch(Command::SetCategory(OrgCategory::Skull, false));
	model.dispatch(Command::ResetFilters);
	assert_eq!(model.criteria, FilterCriteria::default());
	assert_eq!(model.view.nodes.len(), 2);
}

#[test]
fn unrelated_commands_leave_view_identical() {
	let mut model = installed_model();
	let before = model.view.clone();
	model.dispatch(Command::Select("A".into()));
	model.dispatch(Command::Deselect);
	assert_eq!(model.view, before);
}

#[test]
fn export_round_trips_through_dataset_parser() {
	let mut dataset = alice_bob_dataset();
	dataset.nodes[0].cohort_year = Some(1947);
	dataset.nodes[0].position = Some("Senator".into());
	// Normalize the way the loader would, so counts are present.
	let dataset =
		Dataset::from_json(&serde_json::to_string(&dataset).expect("serialize")).expect("parse");

	let view = filter(&dataset, &FilterCriteria::default());
	let json = view_to_json(&view).expect("export serializes");
	let reparsed = Dataset::from_json(&json).expect("export parses as a dataset");
	assert_eq!(reparsed.nodes, view.nodes);
	assert_eq!(reparsed.edges, view.edges);
}

#[test]
fn stats_density_and_top_connected() {
	let dataset = Dataset {
		nodes: vec![
			node("A", "Alice", &["Skull & Bones"]),
			node("B", "Bob", &["Skull & Bones"]),
			node("C", "Carol", &["Skull & Bones"]),
		],
		edges: vec![edge("A", "B"), edge("A", "C")],
	};
	let view = filter(&dataset, &FilterCriteria::default());
	let stats = NetworkStats::from_view(&view);
	assert_eq!(stats.node_count, 3);
	assert_eq!(stats.edge_count, 2);
	assert!((stats.density_pct - 2.0 / 3.0 * 100.0).abs() < 1e-9);
	assert_eq!(stats.top_connected[0], ("Alice".to_string(), 2));
}

#[test]
fn help_tips_cover_the_main_interactions() {
	let actions: Vec<&str> = HELP_TIPS.iter().map(|(action, _)| *action).collect();
	for expected in ["Drag a node", "Scroll", "Search", "Export view"] {
		assert!(
			actions.contains(&expected),
			"help is missing an entry for {expected:?}"
		);
	}
	assert!(HELP_TIPS.iter().all(|(_, effect)| !effect.is_empty()));
}

#[test]
fn stats_of_empty_view_are_zero() {
	let stats = NetworkStats::from_view(&FilteredView::default());
	assert_eq!(stats.node_count, 0);
	assert_eq!(stats.density_pct, 0.0);
	assert!(stats.top_connected.is_empty());
}
