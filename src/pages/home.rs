use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use crate::components::network_graph::{NetworkCanvas, TooltipInfo, ZoomCommand};
use crate::components::panels::{DetailsPanel, HelpModal, StatsModal, Tooltip};
use crate::components::particles::ParticleBackdrop;
use crate::components::sidebar::Sidebar;
use crate::controller::{AppModel, Command};
use crate::data::load::{self, DATA_URL};

/// The network explorer page: owns the application model, performs the one
/// startup load, and wires the canvas, sidebar, and panels together.
#[component]
pub fn Home() -> impl IntoView {
	let model = RwSignal::new(AppModel::default());
	let load_error = RwSignal::new(None::<String>);
	let tooltip = RwSignal::new(None::<TooltipInfo>);
	let zoom = RwSignal::new(None::<ZoomCommand>);
	let stats_open = RwSignal::new(false);
	let help_open = RwSignal::new(false);

	Effect::new(move |_| {
		spawn_local(async move {
			match load::fetch_dataset(DATA_URL).await {
				Ok(dataset) => {
					info!(
						"loaded {} nodes, {} edges",
						dataset.nodes.len(),
						dataset.edges.len()
					);
					model.update(|m| m.install(dataset));
				}
				Err(e) => {
					error!("failed to load dataset: {e}");
					load_error.set(Some(e.to_string()));
				}
			}
		});
	});

	// Memoized so selection changes never re-seed the simulation.
	let view_memo = Memo::new(move |_| model.with(|m| m.view.clone()));
	let selected = Memo::new(move |_| model.with(|m| m.selected_id()));

	let on_select = Callback::new(move |id: String| {
		model.update(|m| m.dispatch(Command::Select(id)));
	});
	let on_hover = Callback::new(move |info: Option<TooltipInfo>| tooltip.set(info));

	let error_notice = move || {
		load_error.get().map(|message| {
			view! {
				<div class="load-error">
					<p>"Failed to load network data: " {message}</p>
					<p>"Run the data build step (see README) and reload the page."</p>
				</div>
			}
		})
	};

	view! {
		<div class="app-shell">
			<ParticleBackdrop />
			<NetworkCanvas
				view=view_memo
				selected=selected
				zoom=zoom
				on_select=on_select
				on_hover=on_hover
			/>
			<div class="graph-overlay">
				<h1>"The Hidden Networks"</h1>
				<p class="subtitle">
					"Drag nodes to reposition. Scroll to zoom. Click a figure for details."
				</p>
			</div>
			<Sidebar model=model zoom=zoom stats_open=stats_open help_open=help_open />
			<DetailsPanel model=model />
			<StatsModal model=model open=stats_open />
			<HelpModal open=help_open />
			<Tooltip info=tooltip />
			{error_notice}
		</div>
	}
}
