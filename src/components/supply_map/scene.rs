use std::collections::HashMap;

use super::projection::{GeoBounds, Viewport};
use crate::api::{EdgeKind, GraphData, NodeKind};
use crate::palette;

pub const COMPANY_RADIUS: f64 = 10.0;
pub const NODE_RADIUS: f64 = 7.0;
/// Extra screen pixels accepted around a marker when clicking.
pub const HIT_SLOP: f64 = 3.0;

const MARKER_STROKE: &str = "#ffffff";
const SELECTED_STROKE: &str = "#f59e0b";
const EDGE_WIDTH: f64 = 2.0;
const EDGE_OPACITY: f64 = 0.7;
const POPUP_TARGETS: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
	pub id: String,
	pub lat: f64,
	pub lon: f64,
	pub radius: f64,
	pub fill: &'static str,
	pub stroke: &'static str,
	pub stroke_width: f64,
	pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Line {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub color: &'static str,
	pub width: f64,
	pub opacity: f64,
}

/// Everything the canvas draws for one `{nodes, edges, selection}` snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapScene {
	pub markers: Vec<Marker>,
	pub lines: Vec<Line>,
	pub bounds: Option<GeoBounds>,
}

impl MapScene {
	pub fn build(graph: &GraphData, selection: Option<&str>) -> Self {
		let positions: HashMap<&str, (f64, f64)> = graph
			.nodes
			.iter()
			.filter_map(|n| n.position().map(|p| (n.id.as_str(), p)))
			.collect();

		let mut markers: Vec<Marker> = graph
			.nodes
			.iter()
			.filter_map(|n| {
				let (lat, lon) = n.position()?;
				let selected = selection == Some(n.id.as_str());
				Some(Marker {
					id: n.id.clone(),
					lat,
					lon,
					radius: if n.kind == NodeKind::Company {
						COMPANY_RADIUS
					} else {
						NODE_RADIUS
					},
					fill: palette::color_of(n),
					stroke: if selected { SELECTED_STROKE } else { MARKER_STROKE },
					stroke_width: if selected { 3.0 } else { 1.5 },
					selected,
				})
			})
			.collect();
		// Selected marker on top.
		markers.sort_by_key(|m| m.selected);

		let lines = graph
			.edges
			.iter()
			.filter_map(|e| {
				let from = *positions.get(e.from_id.as_str())?;
				let to = *positions.get(e.to_id.as_str())?;
				let color = if e.kind.is_risk() {
					palette::RISK_EDGE
				} else {
					palette::NEUTRAL_EDGE
				};
				let (width, opacity) = match selection {
					None => (EDGE_WIDTH, EDGE_OPACITY),
					Some(id) if e.from_id == id || e.to_id == id => (3.5, 0.95),
					Some(_) => (EDGE_WIDTH, 0.2),
				};
				Some(Line {
					from,
					to,
					color,
					width,
					opacity,
				})
			})
			.collect();

		Self {
			markers,
			lines,
			bounds: GeoBounds::from_points(positions.values().copied()),
		}
	}

	/// Topmost marker under a screen point.
	pub fn marker_at(&self, viewport: &Viewport, sx: f64, sy: f64) -> Option<&Marker> {
		self.markers.iter().rev().find(|m| {
			let (mx, my) = viewport.to_screen(m.lat, m.lon);
			let (dx, dy) = (mx - sx, my - sy);
			(dx * dx + dy * dy).sqrt() <= m.radius + HIT_SLOP
		})
	}
}

/// Tooltip content for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary {
	pub name: String,
	pub kind: String,
	pub tier: Option<i32>,
	/// First few targets this node supplies.
	pub supplies_to: Vec<String>,
	/// More targets exist beyond `supplies_to`.
	pub more: bool,
}

impl NodeSummary {
	pub fn of(graph: &GraphData, id: &str) -> Option<Self> {
		let node = graph.node(id)?;
		let mut targets = graph
			.edges
			.iter()
			.filter(|e| e.from_id == id && e.kind == EdgeKind::SuppliesTo)
			.filter_map(|e| graph.node(&e.to_id))
			.filter(|n| !n.name.is_empty())
			.map(|n| n.name.clone());
		let supplies_to: Vec<String> = targets.by_ref().take(POPUP_TARGETS).collect();
		let more = targets.next().is_some();

		Some(Self {
			name: node.name.clone(),
			kind: node.kind.to_string(),
			tier: node.tier,
			supplies_to,
			more,
		})
	}

	pub fn subtitle(&self) -> String {
		match self.tier {
			Some(t) => format!("{} · Tier {t}", self.kind),
			None => self.kind.clone(),
		}
	}

	pub fn supplies_line(&self) -> Option<String> {
		if self.supplies_to.is_empty() {
			return None;
		}
		let mut line = format!("Supplies to: {}", self.supplies_to.join(", "));
		if self.more {
			line.push_str(", …");
		}
		Some(line)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{GraphEdge, GraphNode};

	fn node(id: &str, kind: NodeKind, pos: Option<(f64, f64)>) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: format!("{id} name"),
			kind,
			tier: None,
			lat: pos.map(|p| p.0),
			lon: pos.map(|p| p.1),
		}
	}

	fn edge(from: &str, to: &str, kind: &str) -> GraphEdge {
		GraphEdge {
			from_id: from.into(),
			to_id: to.into(),
			kind: EdgeKind::from(kind.to_string()),
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				node("c", NodeKind::Company, Some((40.0, -74.0))),
				node("s1", NodeKind::Supplier, Some((31.2, 121.5))),
				node("s2", NodeKind::Supplier, None),
				node("p", NodeKind::Port, Some((1.29, 103.85))),
			],
			edges: vec![
				edge("s1", "c", "SUPPLIES_TO"),
				edge("s2", "c", "SUPPLIES_TO"),
				edge("s1", "p", "SHIPS_VIA"),
				edge("s1", "ghost", "DEPENDS_ON"),
			],
		}
	}

	#[test]
	fn only_plottable_nodes_become_markers() {
		let scene = MapScene::build(&sample(), None);
		let ids: Vec<_> = scene.markers.iter().map(|m| m.id.as_str()).collect();
		assert_eq!(ids, ["c", "s1", "p"]);
	}

	#[test]
	fn edges_need_both_endpoints_plottable() {
		let scene = MapScene::build(&sample(), None);
		assert_eq!(scene.lines.len(), 2);
		assert_eq!(scene.lines[0].color, palette::RISK_EDGE);
		assert_eq!(scene.lines[1].color, palette::NEUTRAL_EDGE);
		assert!(scene.lines.iter().all(|l| l.opacity == EDGE_OPACITY && l.width == EDGE_WIDTH));
	}

	#[test]
	fn company_markers_are_larger() {
		let scene = MapScene::build(&sample(), None);
		assert_eq!(scene.markers[0].radius, COMPANY_RADIUS);
		assert!(scene.markers[1..].iter().all(|m| m.radius == NODE_RADIUS));
	}

	#[test]
	fn selection_highlights_touching_edges_and_fades_others() {
		let scene = MapScene::build(&sample(), Some("p"));
		let sel = scene.markers.last().unwrap();
		assert_eq!(sel.id, "p");
		assert!(sel.selected && sel.stroke_width > 1.5);
		assert_ne!(sel.stroke, MARKER_STROKE);

		let touching = &scene.lines[1];
		let other = &scene.lines[0];
		assert!(touching.width > other.width);
		assert!(touching.opacity > EDGE_OPACITY && other.opacity < EDGE_OPACITY);
	}

	#[test]
	fn bounds_cover_plottable_extremes() {
		let b = MapScene::build(&sample(), None).bounds.unwrap();
		assert_eq!((b.south, b.north), (1.29, 40.0));
		assert_eq!((b.west, b.east), (-74.0, 121.5));
	}

	#[test]
	fn summary_truncates_after_three_targets() {
		let mut g = sample();
		for i in 0..4 {
			let id = format!("t{i}");
			g.nodes.push(node(&id, NodeKind::Factory, None));
			g.edges.push(edge("s2", &id, "SUPPLIES_TO"));
		}
		let s = NodeSummary::of(&g, "s2").unwrap();
		assert_eq!(s.supplies_to, ["c name", "t0 name", "t1 name"]);
		assert!(s.more);
		assert_eq!(
			s.supplies_line().unwrap(),
			"Supplies to: c name, t0 name, t1 name, …"
		);
	}

	#[test]
	fn summary_skips_unresolved_targets_and_shows_tier() {
		let mut g = sample();
		g.nodes[1].tier = Some(2);
		let s = NodeSummary::of(&g, "s1").unwrap();
		assert_eq!(s.supplies_to, ["c name"]);
		assert!(!s.more);
		assert_eq!(s.subtitle(), "Supplier · Tier 2");
		assert_eq!(NodeSummary::of(&g, "p").unwrap().supplies_line(), None);
	}

	#[test]
	fn hit_test_finds_marker_under_cursor() {
		let scene = MapScene::build(&sample(), None);
		let vp = Viewport::new((20.0, 0.0), 2.0, 800.0, 600.0);
		let (sx, sy) = vp.to_screen(31.2, 121.5);
		assert_eq!(scene.marker_at(&vp, sx + 4.0, sy).map(|m| m.id.as_str()), Some("s1"));
		assert!(scene.marker_at(&vp, 5.0, 5.0).is_none());
	}
}
