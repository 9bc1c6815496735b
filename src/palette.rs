//! Marker colors by node type and tier, and the static map legend.

use crate::api::{GraphNode, NodeKind};

/// The focal company.
pub const COMPANY: &str = "#0f172a";
/// Supplier colors for tiers 1 through 4.
pub const TIERS: [&str; 4] = ["#15803d", "#1d4ed8", "#c2410c", "#b91c1c"];
/// Ports, and the fallback for anything unclassified.
pub const NEUTRAL: &str = "#64748b";
/// Production sites.
pub const FACTORY: &str = "#475569";
/// Countries.
pub const COUNTRY: &str = "#94a3b8";

/// Risk edge stroke (`SUPPLIES_TO`, `DEPENDS_ON`).
pub const RISK_EDGE: &str = "#b91c1c";
/// Stroke for every other edge.
pub const NEUTRAL_EDGE: &str = "#64748b";

/// Color for a supplier at `tier`, or the neutral fallback outside 1..=4.
pub fn tier_color(tier: Option<i32>) -> &'static str {
	tier.and_then(|t| usize::try_from(t).ok())
		.and_then(|t| t.checked_sub(1))
		.and_then(|i| TIERS.get(i))
		.copied()
		.unwrap_or(NEUTRAL)
}

/// Fill color for a node; the type decides first, the tier only for suppliers.
pub fn node_color(kind: &NodeKind, tier: Option<i32>) -> &'static str {
	match kind {
		NodeKind::Company => COMPANY,
		NodeKind::Supplier => tier_color(tier),
		NodeKind::Port => NEUTRAL,
		NodeKind::Factory => FACTORY,
		NodeKind::Country => COUNTRY,
		NodeKind::Other(_) => NEUTRAL,
	}
}

/// Shorthand for [`node_color`] on a whole node.
pub fn color_of(node: &GraphNode) -> &'static str {
	node_color(&node.kind, node.tier)
}

/// One row of the map legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LegendItem {
	/// Row text.
	pub label: &'static str,
	/// Dot color.
	pub color: &'static str,
}

/// The legend, independent of what is currently loaded.
pub const LEGEND: [LegendItem; 7] = [
	LegendItem { label: "Company", color: COMPANY },
	LegendItem { label: "Tier 1", color: TIERS[0] },
	LegendItem { label: "Tier 2", color: TIERS[1] },
	LegendItem { label: "Tier 3", color: TIERS[2] },
	LegendItem { label: "Tier 4", color: TIERS[3] },
	LegendItem { label: "Port", color: NEUTRAL },
	LegendItem { label: "Factory", color: FACTORY },
];

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn out_of_range_tier_matches_unknown_type() {
		let unknown = node_color(&NodeKind::Other("Unknown".into()), None);
		assert_eq!(node_color(&NodeKind::Supplier, Some(5)), unknown);
		assert_eq!(node_color(&NodeKind::Supplier, Some(0)), unknown);
		assert_eq!(node_color(&NodeKind::Supplier, Some(-1)), unknown);
		assert_eq!(node_color(&NodeKind::Supplier, None), unknown);
	}

	#[test]
	fn each_tier_is_distinct() {
		let colors: Vec<_> = (1..=4)
			.map(|t| node_color(&NodeKind::Supplier, Some(t)))
			.collect();
		for (i, a) in colors.iter().enumerate() {
			assert!(colors[i + 1..].iter().all(|b| a != b));
			assert_ne!(*a, NEUTRAL);
		}
	}

	#[test]
	fn type_wins_over_tier() {
		assert_eq!(node_color(&NodeKind::Company, Some(1)), COMPANY);
		assert_eq!(node_color(&NodeKind::Port, Some(2)), NEUTRAL);
		assert_eq!(node_color(&NodeKind::Factory, Some(3)), FACTORY);
		assert_eq!(node_color(&NodeKind::Country, None), COUNTRY);
	}

	#[test]
	fn legend_agrees_with_policy() {
		assert_eq!(LEGEND[0].color, node_color(&NodeKind::Company, None));
		for t in 1..=4 {
			assert_eq!(LEGEND[t].color, node_color(&NodeKind::Supplier, Some(t as i32)));
		}
		assert_eq!(LEGEND[5].color, node_color(&NodeKind::Port, None));
		assert_eq!(LEGEND[6].color, node_color(&NodeKind::Factory, None));
	}
}
