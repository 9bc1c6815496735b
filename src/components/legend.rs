use leptos::prelude::*;

use crate::palette::LEGEND;

/// Static color key overlaid on the map.
#[component]
pub fn Legend() -> impl IntoView {
	view! {
		<div class="legend">
			<div class="legend-title">"Tiers"</div>
			<div class="legend-subtitle">"Tier 1 = direct supplier; higher = further upstream."</div>
			<div class="legend-subtitle">"Click a node to highlight its connections."</div>
			{LEGEND
				.iter()
				.map(|item| {
					view! {
						<div class="legend-item">
							<span
								class="legend-dot"
								style=format!("background-color: {};", item.color)
							/>
							<span>{item.label}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}
