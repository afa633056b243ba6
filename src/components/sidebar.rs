//! Filter, search, timeline, zoom, and export controls.

use leptos::prelude::*;
use log::error;

use super::network_graph::ZoomCommand;
use crate::controller::{AppModel, Command, ERAS, SearchStatus};
use crate::data::export;
use crate::data::filter::{OrgCategory, YEAR_MAX, YEAR_MIN};

/// Sidebar of controls. Every handler reduces to a single
/// [`Command`] dispatched into the model.
#[component]
pub fn Sidebar(
	model: RwSignal<AppModel>,
	zoom: RwSignal<Option<ZoomCommand>>,
	stats_open: RwSignal<bool>,
	help_open: RwSignal<bool>,
) -> impl IntoView {
	let dispatch = move |command: Command| model.update(|m| m.dispatch(command));

	let search_status = move || {
		model.with(|m| match &m.search_status {
			SearchStatus::NoMatches => "No matches found".to_string(),
			SearchStatus::AutoSelected(_) => "1 match — selected".to_string(),
			SearchStatus::Idle => format!("{} figures shown", m.view.nodes.len()),
		})
	};

	let category_boxes = OrgCategory::ALL
		.into_iter()
		.map(|category| {
			view! {
				<label class="filter-checkbox">
					<input
						type="checkbox"
						prop:checked=move || {
							model.with(|m| m.criteria.active_orgs.contains(&category))
						}
						on:change=move |ev| {
							dispatch(Command::SetCategory(category, event_target_checked(&ev)))
						}
					/>
					{category.label()}
				</label>
			}
		})
		.collect_view();

	let era_buttons = ERAS
		.iter()
		.enumerate()
		.map(|(index, (label, _, _))| {
			view! {
				<button class="era-button" on:click=move |_| dispatch(Command::ApplyEra(index))>
					{*label}
				</button>
			}
		})
		.collect_view();

	let year_start = move || model.with(|m| m.criteria.year_range.0);
	let year_end = move || model.with(|m| m.criteria.year_range.1);

	view! {
		<aside class="sidebar">
			<section class="control-group">
				<h2>"Search"</h2>
				<input
					id="search-input"
					type="text"
					placeholder="Search by name…"
					prop:value=move || model.with(|m| m.criteria.search.clone())
					on:input=move |ev| dispatch(Command::SearchChanged(event_target_value(&ev)))
				/>
				<p class="search-status">{search_status}</p>
			</section>

			<section class="control-group">
				<h2>"Organizations"</h2>
				{category_boxes}
			</section>

			<section class="control-group">
				<h2>"Timeline"</h2>
				<div class="timeline-labels">
					<span id="timeline-start">{year_start}</span>
					<span id="timeline-end">{year_end}</span>
				</div>
				<input
					id="timeline-slider-start"
					type="range"
					min=YEAR_MIN
					max=YEAR_MAX
					prop:value=move || year_start().to_string()
					on:input=move |ev| {
						let start = event_target_value(&ev).parse().unwrap_or(YEAR_MIN);
						dispatch(Command::SetYearRange(start, year_end()));
					}
				/>
				<input
					id="timeline-slider-end"
					type="range"
					min=YEAR_MIN
					max=YEAR_MAX
					prop:value=move || year_end().to_string()
					on:input=move |ev| {
						let end = event_target_value(&ev).parse().unwrap_or(YEAR_MAX);
						dispatch(Command::SetYearRange(year_start(), end));
					}
				/>
				<div class="era-buttons">{era_buttons}</div>
			</section>

			<section class="control-group">
				<button id="reset-filters" on:click=move |_| dispatch(Command::ResetFilters)>
					"Reset filters"
				</button>
			</section>

			<section class="control-group zoom-controls">
				<button id="zoom-in" on:click=move |_| zoom.set(Some(ZoomCommand::In))>
					"+"
				</button>
				<button id="zoom-out" on:click=move |_| zoom.set(Some(ZoomCommand::Out))>
					"−"
				</button>
				<button id="zoom-reset" on:click=move |_| zoom.set(Some(ZoomCommand::Reset))>
					"⌂"
				</button>
			</section>

			<section class="control-group">
				<button id="stats-toggle" on:click=move |_| stats_open.set(true)>
					"Statistics"
				</button>
				<button id="help-toggle" on:click=move |_| help_open.set(true)>
					"Help"
				</button>
				<button
					id="export-json"
					on:click=move |_| {
						model.with(|m| {
							if let Err(e) = export::download_view(&m.view) {
								error!("export failed: {e:?}");
							}
						})
					}
				>
					"Export view"
				</button>
			</section>
		</aside>
	}
}
