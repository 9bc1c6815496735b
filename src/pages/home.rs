use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use crate::api::{ApiClient, GraphData};
use crate::components::controls::Controls;
use crate::components::supply_map::SupplyMap;
use crate::config::ApiConfig;
use crate::dashboard::{Dashboard, ReferenceLoad};
use crate::export;
use crate::intent::QueryIntent;

/// Identity of a graph result; a new query is a new snapshot even when equal.
#[derive(Clone)]
struct Snapshot(Arc<GraphData>);

impl PartialEq for Snapshot {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

/// Runs the three startup loads together; each lands as soon as it completes.
async fn load_reference(client: ApiClient, dashboard: RwSignal<Dashboard>) {
	dashboard.update(Dashboard::begin_reference_load);
	let apply = move |load: ReferenceLoad| {
		dashboard.try_update(|d| d.apply_reference(load));
	};
	futures::join!(
		async { apply(ReferenceLoad::Companies(client.list_companies().await)) },
		async { apply(ReferenceLoad::Suppliers(client.list_suppliers().await)) },
		async { apply(ReferenceLoad::Ports(client.list_ports().await)) },
	);
	info!("reference data requests settled");
}

/// Dashboard page: owns all state and wires controls, map and exports.
#[component]
pub fn Home() -> impl IntoView {
	let client = ApiClient::new(ApiConfig::from_env());
	let dashboard = RwSignal::new(Dashboard::default());

	spawn_local(load_reference(client.clone(), dashboard));
	on_cleanup(move || {
		dashboard.try_update(Dashboard::abandon_queries);
	});

	let on_load = Callback::new(move |_: ()| {
		let Some(ticket) = dashboard.try_update(Dashboard::begin_query).flatten() else {
			return;
		};
		let client = client.clone();
		spawn_local(async move {
			let result = match &ticket.intent {
				QueryIntent::SupplyChain { company_id, depth } => {
					client.fetch_supply_chain(company_id, *depth).await
				}
				QueryIntent::Impact {
					scenario,
					target_id,
				} => client.fetch_impact(*scenario, target_id).await,
			};
			dashboard.try_update(|d| d.finish_query(&ticket, result));
		});
	});

	let on_select = Callback::new(move |id: String| {
		dashboard.update(|d| d.toggle_selection(&id));
	});

	let snapshot = Memo::new(move |_| dashboard.with(|d| Snapshot(d.graph().clone())));
	let graph = Signal::derive(move || snapshot.get().0);
	let selection = Memo::new(move |_| dashboard.with(|d| d.selection().map(str::to_owned)));
	let has_nodes = move || snapshot.with(|s| !s.0.is_empty());

	let export_json = move |_| {
		let graph = snapshot.get_untracked().0;
		if let Err(e) = export::download_json(&graph) {
			warn!("{e}");
		}
	};
	let export_csv = move |_| {
		let graph = snapshot.get_untracked().0;
		if let Err(e) = export::download_csv(&graph) {
			warn!("{e}");
		}
	};

	view! {
		<div class="app">
			<header class="app-header">
				<h1 class="app-title">"Supply Chain Risk"</h1>
			</header>
			<Controls dashboard=dashboard on_load=on_load />
			{move || {
				dashboard
					.with(|d| d.error().map(str::to_owned))
					.map(|message| view! { <div class="app-error" role="alert">{message}</div> })
			}}
			<Show when=has_nodes>
				<div class="app-toolbar">
					<span class="graph-summary">
						{move || {
							snapshot
								.with(|s| {
									format!(
										"{} nodes · {} edges · {} on map",
										s.0.nodes.len(),
										s.0.edges.len(),
										s.0.plottable_count(),
									)
								})
						}}
					</span>
					<button class="app-button" on:click=export_json>"Export JSON"</button>
					<button class="app-button" on:click=export_csv>"Export CSV"</button>
				</div>
			</Show>
			<main class="app-map">
				<SupplyMap graph=graph selection=selection on_select=on_select />
			</main>
		</div>
	}
}
