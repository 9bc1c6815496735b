use leptos::prelude::*;

use crate::api::{Depth, Scenario};
use crate::dashboard::Dashboard;
use crate::intent::TargetList;

/// Pickers for company, depth, scenario and target, plus the Load button.
///
/// Every change goes through the dashboard's setters; nothing here talks to
/// the network.
#[component]
pub fn Controls(dashboard: RwSignal<Dashboard>, on_load: Callback<()>) -> impl IntoView {
	let loading = move || dashboard.with(Dashboard::is_loading);

	let company_options = move || {
		dashboard.with(|d| {
			let current = d.form().company_id();
			d.reference()
				.companies
				.iter()
				.map(|c| {
					let selected = c.id == current;
					view! {
						<option value=c.id.clone() prop:selected=selected>
							{c.name.clone()}
						</option>
					}
				})
				.collect_view()
		})
	};

	let depth_options = move || {
		let current = dashboard.with(|d| d.form().depth());
		Depth::all()
			.map(|depth| {
				view! {
					<option value=depth.get().to_string() prop:selected={depth == current}>
						{depth.get()}
					</option>
				}
			})
			.collect_view()
	};

	let scenario_options = move || {
		let current = dashboard.with(|d| d.form().scenario());
		Scenario::ALL
			.into_iter()
			.map(|sc| {
				view! {
					<option value=sc.as_str() prop:selected={Some(sc) == current}>
						{sc.label()}
					</option>
				}
			})
			.collect_view()
	};

	let target_picker = move || {
		dashboard.with(|d| {
			let list = d.form().target_list()?;
			let (label, placeholder, items): (_, _, Vec<(String, String)>) = match list {
				TargetList::Suppliers => (
					"Supplier",
					"Select supplier",
					d.reference()
						.suppliers
						.iter()
						.map(|s| (s.id.clone(), s.name.clone()))
						.collect(),
				),
				TargetList::Ports => (
					"Port",
					"Select port",
					d.reference()
						.ports
						.iter()
						.map(|p| (p.id.clone(), p.name.clone()))
						.collect(),
				),
			};
			let current = d.form().target_id().to_owned();
			Some(view! {
				<div class="controls-row">
					<label class="controls-label">{label}</label>
					<select
						class="controls-select"
						disabled=loading
						on:change=move |ev| {
							let id = event_target_value(&ev);
							dashboard.update(|d| d.set_target(id));
						}
					>
						<option value="" prop:selected={current.is_empty()}>{placeholder}</option>
						{items
							.into_iter()
							.map(|(id, name)| {
								let selected = id == current;
								view! { <option value=id prop:selected=selected>{name}</option> }
							})
							.collect_view()}
					</select>
				</div>
			})
		})
	};

	view! {
		<div class="controls">
			<div class="controls-row">
				<label class="controls-label">"Company"</label>
				<select
					class="controls-select"
					disabled=loading
					on:change=move |ev| {
						let id = event_target_value(&ev);
						dashboard.update(|d| d.set_company(id));
					}
				>
					<option
						value=""
						prop:selected=move || dashboard.with(|d| d.form().company_id().is_empty())
					>
						"Select company"
					</option>
					{company_options}
				</select>
			</div>
			<div class="controls-row">
				<label class="controls-label">"Depth (tiers)"</label>
				<select
					class="controls-select"
					disabled=loading
					on:change=move |ev| {
						let depth = event_target_value(&ev).parse::<u8>().ok().and_then(Depth::new);
						if let Some(depth) = depth {
							dashboard.update(|d| d.set_depth(depth));
						}
					}
				>
					{depth_options}
				</select>
			</div>
			<div class="controls-row">
				<label class="controls-label">"Scenario"</label>
				<select
					class="controls-select"
					disabled=loading
					on:change=move |ev| {
						let scenario = Scenario::parse(&event_target_value(&ev));
						dashboard.update(|d| d.set_scenario(scenario));
					}
				>
					<option
						value=""
						prop:selected=move || dashboard.with(|d| d.form().scenario().is_none())
					>
						"Supply chain only"
					</option>
					{scenario_options}
				</select>
			</div>
			{target_picker}
			<div class="controls-row">
				<button
					class="controls-button"
					disabled=move || !dashboard.with(Dashboard::can_load)
					on:click=move |_| on_load.run(())
				>
					{move || if loading() { "Loading…" } else { "Load" }}
				</button>
			</div>
		</div>
	}
}
