//! Interaction state machine.
//!
//! All UI events are routed through [`AppModel::dispatch`] as [`Command`]s,
//! so every transition can be exercised with synthetic commands and no DOM.

use crate::data::filter::{self, FilterCriteria, FilteredView, OrgCategory, YEAR_MAX, YEAR_MIN};
use crate::data::model::Dataset;

/// Maximum neighbor names shown in the details panel.
pub const NEIGHBOR_LIMIT: usize = 8;

/// Named year-range presets for the timeline.
pub const ERAS: [(&str, i32, i32); 4] = [
	("Founding Era", YEAR_MIN, 1899),
	("World Wars", 1900, 1945),
	("Cold War", 1946, 1990),
	("Globalization", 1991, YEAR_MAX),
];

/// A UI event translated into an explicit command.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
	/// Search text changed; recomputes the view synchronously.
	SearchChanged(String),
	/// Category checkbox toggled on or off.
	SetCategory(OrgCategory, bool),
	/// Timeline sliders moved to an inclusive range.
	SetYearRange(i32, i32),
	/// Era preset button pressed (index into [`ERAS`]).
	ApplyEra(usize),
	/// Restore default criteria.
	ResetFilters,
	/// A node was clicked.
	Select(String),
	/// The details panel was closed.
	Deselect,
}

/// Outcome of the last search keystroke, shown under the search box.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SearchStatus {
	/// Neutral placeholder.
	#[default]
	Idle,
	/// Non-empty search text matched nothing.
	NoMatches,
	/// Exactly one node matched and was auto-selected.
	AutoSelected(String),
}

/// The currently selected node plus its details-panel neighbor list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
	/// Selected node id.
	pub id: String,
	/// First [`NEIGHBOR_LIMIT`] connected names from the current view.
	pub neighbor_names: Vec<String>,
	/// Whether more neighbors exist than are listed.
	pub truncated: bool,
}

/// Application state owned by the home page.
///
/// The dataset is read-only after `install`; the view and selection are the
/// only mutable pieces, and the view is always recomputed from scratch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AppModel {
	/// The full dataset, empty until the load completes.
	pub dataset: Dataset,
	/// Active filter criteria.
	pub criteria: FilterCriteria,
	/// Derived view of `dataset` under `criteria`.
	pub view: FilteredView,
	/// Current selection, if any.
	pub selection: Option<Selection>,
	/// Search feedback for the sidebar.
	pub search_status: SearchStatus,
}

impl AppModel {
	/// Install the loaded dataset and derive the initial view.
	pub fn install(&mut self, dataset: Dataset) {
		self.dataset = dataset;
		self.criteria = FilterCriteria::default();
		self.refilter();
	}

	/// Apply one command. The single routing table for all UI events.
	pub fn dispatch(&mut self, command: Command) {
		match command {
			Command::SearchChanged(text) => self.search(text),
			Command::SetCategory(category, active) => {
				if active {
					self.criteria.active_orgs.insert(category);
				} else {
					self.criteria.active_orgs.remove(&category);
				}
				self.refilter();
			}
			Command::SetYearRange(start, end) => {
				let start = start.clamp(YEAR_MIN, YEAR_MAX);
				let end = end.clamp(YEAR_MIN, YEAR_MAX);
				self.criteria.year_range = (start.min(end), start.max(end));
				self.refilter();
			}
			Command::ApplyEra(index) => {
				if let Some(&(_, start, end)) = ERAS.get(index) {
					self.criteria.year_range = (start, end);
					self.refilter();
				}
			}
			Command::ResetFilters => {
				self.criteria = FilterCriteria::default();
				self.refilter();
			}
			Command::Select(id) => self.select(id),
			Command::Deselect => self.selection = None,
		}
	}

	/// Recompute the view and reset selection state. Every criteria change
	/// goes through here so a removed node can never stay selected.
	fn refilter(&mut self) {
		self.view = filter::filter(&self.dataset, &self.criteria);
		self.selection = None;
		self.search_status = SearchStatus::Idle;
	}

	fn search(&mut self, text: String) {
		self.criteria.search = text;
		self.view = filter::filter(&self.dataset, &self.criteria);
		self.selection = None;
		self.search_status = if self.view.nodes.is_empty() && !self.criteria.search.is_empty() {
			SearchStatus::NoMatches
		} else if self.view.nodes.len() == 1 && !self.criteria.search.is_empty() {
			let only = self.view.nodes[0].id.clone();
			self.select(only.clone());
			SearchStatus::AutoSelected(only)
		} else {
			SearchStatus::Idle
		};
	}

	fn select(&mut self, id: String) {
		if self.view.node(&id).is_none() {
			return;
		}
		let mut neighbor_names = self.view.neighbor_names(&id);
		let truncated = neighbor_names.len() > NEIGHBOR_LIMIT;
		neighbor_names.truncate(NEIGHBOR_LIMIT);
		self.selection = Some(Selection {
			id,
			neighbor_names,
			truncated,
		});
	}

	/// Id of the selected node, for the canvas highlight.
	pub fn selected_id(&self) -> Option<String> {
		self.selection.as_ref().map(|s| s.id.clone())
	}
}
