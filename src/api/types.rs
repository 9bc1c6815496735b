use std::fmt;

use serde::{Deserialize, Serialize};

/// A company offered as a supply-chain root.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Company {
	/// Backend identifier.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Headquarters latitude, when known.
	#[serde(default)]
	pub lat: Option<f64>,
	/// Headquarters longitude, when known.
	#[serde(default)]
	pub lon: Option<f64>,
}

/// A supplier that can be failed in a `supplier_failure` scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
	/// Backend identifier.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// A port that can be closed in a `port_closure` scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Port {
	/// Backend identifier.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// Node label as reported by the backend.
///
/// Unknown labels are kept verbatim so exports reproduce the payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
	/// The focal company.
	Company,
	/// An upstream supplier, usually carrying a tier.
	Supplier,
	/// A shipping port.
	Port,
	/// A production site.
	Factory,
	/// A country a node is located in.
	Country,
	/// Any label this client does not know about.
	Other(String),
}

impl NodeKind {
	/// The label as it appears on the wire.
	pub fn as_str(&self) -> &str {
		match self {
			NodeKind::Company => "Company",
			NodeKind::Supplier => "Supplier",
			NodeKind::Port => "Port",
			NodeKind::Factory => "Factory",
			NodeKind::Country => "Country",
			NodeKind::Other(s) => s,
		}
	}
}

impl From<String> for NodeKind {
	fn from(s: String) -> Self {
		match s.as_str() {
			"Company" => NodeKind::Company,
			"Supplier" => NodeKind::Supplier,
			"Port" => NodeKind::Port,
			"Factory" => NodeKind::Factory,
			"Country" => NodeKind::Country,
			_ => NodeKind::Other(s),
		}
	}
}

impl From<NodeKind> for String {
	fn from(kind: NodeKind) -> Self {
		match kind {
			NodeKind::Other(s) => s,
			known => known.as_str().to_owned(),
		}
	}
}

impl fmt::Display for NodeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Relationship type of a graph edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeKind {
	/// `SUPPLIES_TO`: goods flow from `from_id` to `to_id`.
	SuppliesTo,
	/// `DEPENDS_ON`: `from_id` depends on `to_id`.
	DependsOn,
	/// Any other relationship (`SHIPS_VIA`, `LOCATED_IN`, ...).
	Other(String),
}

impl EdgeKind {
	/// The relationship type as it appears on the wire.
	pub fn as_str(&self) -> &str {
		match self {
			EdgeKind::SuppliesTo => "SUPPLIES_TO",
			EdgeKind::DependsOn => "DEPENDS_ON",
			EdgeKind::Other(s) => s,
		}
	}

	/// Whether the edge carries supply risk and gets the warning color.
	pub fn is_risk(&self) -> bool {
		matches!(self, EdgeKind::SuppliesTo | EdgeKind::DependsOn)
	}
}

impl From<String> for EdgeKind {
	fn from(s: String) -> Self {
		match s.as_str() {
			"SUPPLIES_TO" => EdgeKind::SuppliesTo,
			"DEPENDS_ON" => EdgeKind::DependsOn,
			_ => EdgeKind::Other(s),
		}
	}
}

impl From<EdgeKind> for String {
	fn from(kind: EdgeKind) -> Self {
		match kind {
			EdgeKind::Other(s) => s,
			known => known.as_str().to_owned(),
		}
	}
}

/// A node of a supply-chain or impact graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	/// Identifier, unique within one response.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Node label.
	#[serde(rename = "type")]
	pub kind: NodeKind,
	/// Upstream distance for suppliers; 1 is a direct supplier.
	#[serde(default)]
	pub tier: Option<i32>,
	/// Latitude in degrees.
	#[serde(default)]
	pub lat: Option<f64>,
	/// Longitude in degrees.
	#[serde(default)]
	pub lon: Option<f64>,
}

impl GraphNode {
	/// Coordinates as `(lat, lon)` when the node can be placed on the map.
	pub fn position(&self) -> Option<(f64, f64)> {
		match (self.lat, self.lon) {
			(Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some((lat, lon)),
			_ => None,
		}
	}
}

/// A directed relationship between two nodes, referenced by id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	pub from_id: String,
	/// Target node id.
	pub to_id: String,
	/// Relationship type.
	#[serde(rename = "type")]
	pub kind: EdgeKind,
}

/// A complete query result. Always replaced wholesale, never merged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	/// All nodes of the result, plottable or not.
	pub nodes: Vec<GraphNode>,
	/// All edges of the result, drawable or not.
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// True when the result holds no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Looks up a node by id.
	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Number of nodes that carry both coordinates.
	pub fn plottable_count(&self) -> usize {
		self.nodes.iter().filter(|n| n.position().is_some()).count()
	}
}

/// How many supplier tiers upstream to traverse, within `1..=4`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Depth(u8);

impl Depth {
	/// Shallowest traversal: direct suppliers only.
	pub const MIN: Depth = Depth(1);
	/// Deepest traversal the backend accepts.
	pub const MAX: Depth = Depth(4);

	/// Validates a depth, returning `None` outside `1..=4`.
	pub fn new(value: u8) -> Option<Self> {
		(Self::MIN.0..=Self::MAX.0).contains(&value).then_some(Depth(value))
	}

	/// The raw tier count.
	pub fn get(self) -> u8 {
		self.0
	}

	/// Every selectable depth, shallowest first.
	pub fn all() -> impl Iterator<Item = Depth> {
		(Self::MIN.0..=Self::MAX.0).map(Depth)
	}
}

impl Default for Depth {
	fn default() -> Self {
		Self::MAX
	}
}

impl TryFrom<u8> for Depth {
	type Error = String;

	fn try_from(value: u8) -> Result<Self, Self::Error> {
		Depth::new(value).ok_or_else(|| format!("depth {value} outside 1..=4"))
	}
}

impl From<Depth> for u8 {
	fn from(depth: Depth) -> Self {
		depth.0
	}
}

/// A what-if disruption asked of the impact endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
	/// A supplier stops delivering.
	SupplierFailure,
	/// A port stops handling shipments.
	PortClosure,
}

impl Scenario {
	/// Both scenarios, in the order the controls list them.
	pub const ALL: [Scenario; 2] = [Scenario::SupplierFailure, Scenario::PortClosure];

	/// Wire value, also used as the `<select>` option value.
	pub fn as_str(self) -> &'static str {
		match self {
			Scenario::SupplierFailure => "supplier_failure",
			Scenario::PortClosure => "port_closure",
		}
	}

	/// Parses a wire value.
	pub fn parse(s: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|sc| sc.as_str() == s)
	}

	/// Human label for the scenario picker.
	pub fn label(self) -> &'static str {
		match self {
			Scenario::SupplierFailure => "Supplier failure",
			Scenario::PortClosure => "Port closure",
		}
	}
}

/// Body of `POST /api/supply-chain`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SupplyChainRequest<'a> {
	/// Root company.
	pub company_id: &'a str,
	/// Upstream tiers to include.
	pub depth: Depth,
}

/// Body of `POST /api/impact`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImpactRequest<'a> {
	/// Disruption to simulate.
	pub scenario: Scenario,
	/// Supplier or port id, depending on the scenario.
	pub target_id: &'a str,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_labels_survive_a_round_trip() {
		let raw = r#"{"nodes":[{"id":"x","name":"X","type":"Warehouse","tier":null,"lat":null,"lon":null}],
			"edges":[{"from_id":"x","to_id":"y","type":"SHIPS_VIA"}]}"#;
		let data: GraphData = serde_json::from_str(raw).unwrap();
		assert_eq!(data.nodes[0].kind, NodeKind::Other("Warehouse".into()));
		assert_eq!(data.edges[0].kind, EdgeKind::Other("SHIPS_VIA".into()));

		let out = serde_json::to_value(&data).unwrap();
		assert_eq!(out["nodes"][0]["type"], "Warehouse");
		assert_eq!(out["edges"][0]["type"], "SHIPS_VIA");
	}

	#[test]
	fn missing_optional_fields_default_to_none() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id":"s1","name":"Bolt Co","type":"Supplier"}"#).unwrap();
		assert_eq!(node.kind, NodeKind::Supplier);
		assert_eq!(node.tier, None);
		assert_eq!(node.position(), None);
	}

	#[test]
	fn position_requires_both_coordinates() {
		let mut node = GraphNode {
			id: "p".into(),
			name: "Port".into(),
			kind: NodeKind::Port,
			tier: None,
			lat: Some(51.9),
			lon: None,
		};
		assert_eq!(node.position(), None);
		node.lon = Some(4.4);
		assert_eq!(node.position(), Some((51.9, 4.4)));
	}

	#[test]
	fn risk_edges() {
		assert!(EdgeKind::SuppliesTo.is_risk());
		assert!(EdgeKind::DependsOn.is_risk());
		assert!(!EdgeKind::from("LOCATED_IN".to_string()).is_risk());
	}

	#[test]
	fn depth_is_bounded() {
		assert_eq!(Depth::new(0), None);
		assert_eq!(Depth::new(5), None);
		assert_eq!(Depth::default().get(), 4);
		assert_eq!(Depth::all().count(), 4);
		assert!(serde_json::from_str::<Depth>("7").is_err());
	}

	#[test]
	fn request_bodies_use_wire_names() {
		let body = SupplyChainRequest {
			company_id: "c1",
			depth: Depth::new(2).unwrap(),
		};
		assert_eq!(
			serde_json::to_string(&body).unwrap(),
			r#"{"company_id":"c1","depth":2}"#
		);

		let body = ImpactRequest {
			scenario: Scenario::PortClosure,
			target_id: "p9",
		};
		assert_eq!(
			serde_json::to_string(&body).unwrap(),
			r#"{"scenario":"port_closure","target_id":"p9"}"#
		);
	}

	#[test]
	fn scenario_parse_matches_wire_values() {
		for sc in Scenario::ALL {
			assert_eq!(Scenario::parse(sc.as_str()), Some(sc));
		}
		assert_eq!(Scenario::parse(""), None);
	}
}
