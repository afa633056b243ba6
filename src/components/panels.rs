//! Details panel, statistics modal, and hover tooltip.

use leptos::prelude::*;

use super::network_graph::TooltipInfo;
use crate::controller::{AppModel, Command};
use crate::data::stats::NetworkStats;

/// Details of the selected node plus up to eight connected names.
/// Hidden while nothing is selected.
#[component]
pub fn DetailsPanel(model: RwSignal<AppModel>) -> impl IntoView {
	let content = move || {
		let selection = model.with(|m| m.selection.clone())?;
		let node = model.with(|m| m.view.node(&selection.id).cloned())?;

		let mut neighbors = selection.neighbor_names.join(", ");
		if selection.truncated {
			neighbors.push('…');
		}

		Some(view! {
			<div id="details-panel" class="details-panel">
				<button
					id="close-details"
					class="close-button"
					on:click=move |_| model.update(|m| m.dispatch(Command::Deselect))
				>
					"×"
				</button>
				<h3>{node.name.clone()}</h3>
				<div class="details-fields">
					<p>
						<strong>"Type: "</strong>
						{node.node_type.clone()}
					</p>
					{node
						.cohort_year
						.map(|year| {
							view! {
								<p>
									<strong>"Cohort: "</strong>
									{year}
								</p>
							}
						})}
					{node
						.position
						.clone()
						.map(|position| {
							view! {
								<p>
									<strong>"Position: "</strong>
									{position}
								</p>
							}
						})}
					<p>
						<strong>"Connections: "</strong>
						{node.connection_count()}
					</p>
				</div>
				<div class="details-neighbors">
					<strong>"Direct links: "</strong>
					{if neighbors.is_empty() { "none in view".to_string() } else { neighbors }}
				</div>
			</div>
		})
	};

	view! { <div>{content}</div> }
}

/// Statistics over the current filtered view, recomputed when opened.
#[component]
pub fn StatsModal(model: RwSignal<AppModel>, open: RwSignal<bool>) -> impl IntoView {
	let content = move || {
		if !open.get() {
			return None;
		}
		let stats = model.with(|m| NetworkStats::from_view(&m.view));
		let top = stats
			.top_connected
			.iter()
			.map(|(name, count)| {
				view! {
					<div class="top-node">
						{name.clone()}
						": "
						<strong>{*count}</strong>
					</div>
				}
			})
			.collect_view();

		Some(view! {
			<div id="stats-modal" class="modal" on:click=move |_| open.set(false)>
				<div class="modal-content" on:click=|ev| ev.stop_propagation()>
					<button id="close-stats" class="close-button" on:click=move |_| open.set(false)>
						"×"
					</button>
					<h3>"Network statistics"</h3>
					<p>
						<strong>"Figures: "</strong>
						{stats.node_count}
					</p>
					<p>
						<strong>"Connections: "</strong>
						{stats.edge_count}
					</p>
					<p>
						<strong>"Density: "</strong>
						{format!("{:.1}%", stats.density_pct)}
					</p>
					<h4>"Most connected"</h4>
					{top}
				</div>
			</div>
		})
	};

	view! { <div>{content}</div> }
}

/// Interaction hints listed in the help modal.
pub const HELP_TIPS: &[(&str, &str)] = &[
	("Drag a node", "pin it under the pointer; it floats free on release"),
	("Drag the background", "pan the view"),
	("Scroll", "zoom about the pointer"),
	("Click a figure", "open its details and highlight its direct links"),
	("Search", "filters as you type; a single match is selected for you"),
	("Checkboxes & timeline", "narrow the network by organization and cohort"),
	("Export view", "download the figures currently shown as JSON"),
];

/// How-to-read-the-map modal.
#[component]
pub fn HelpModal(open: RwSignal<bool>) -> impl IntoView {
	let content = move || {
		if !open.get() {
			return None;
		}
		let tips = HELP_TIPS
			.iter()
			.map(|(action, effect)| {
				view! {
					<p>
						<strong>{*action}</strong>
						": "
						{*effect}
					</p>
				}
			})
			.collect_view();

		Some(view! {
			<div id="help-modal" class="modal" on:click=move |_| open.set(false)>
				<div class="modal-content" on:click=|ev| ev.stop_propagation()>
					<button id="close-help" class="close-button" on:click=move |_| open.set(false)>
						"×"
					</button>
					<h3>"Reading the map"</h3>
					{tips}
				</div>
			</div>
		})
	};

	view! { <div>{content}</div> }
}

/// Hover card following the pointer over a node.
#[component]
pub fn Tooltip(#[prop(into)] info: Signal<Option<TooltipInfo>>) -> impl IntoView {
	let content = move || {
		let info = info.get()?;
		let excerpt = info.position.as_deref().map(|p| {
			let mut text: String = p.chars().take(80).collect();
			if p.chars().count() > 80 {
				text.push('…');
			}
			text
		});
		Some(view! {
			<div
				id="node-tooltip"
				class="tooltip"
				style:left=format!("{}px", info.x)
				style:top=format!("{}px", info.y)
			>
				<div class="tooltip-name">{info.name.clone()}</div>
				<div class="tooltip-type">{info.node_type.clone()}</div>
				<div class="tooltip-content">
					{info.cohort_year.map(|year| view! { <div>{format!("Cohort: {year}")}</div> })}
					{excerpt.map(|text| view! { <div>{text}</div> })}
					<div>{format!("Connections: {}", info.connections)}</div>
				</div>
			</div>
		})
	};

	view! { <div>{content}</div> }
}
