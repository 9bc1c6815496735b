//! JSON and CSV snapshots of the current graph, offered as downloads.

use std::fmt::Write as _;

use log::info;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

use crate::api::{GraphData, GraphNode};

/// File name of the JSON export.
pub const JSON_FILE: &str = "supply-chain.json";
/// File name of the CSV export.
pub const CSV_FILE: &str = "supply-chain-nodes.csv";

const CSV_HEADER: &str = "id,name,type,tier,lat,lon";

/// Why a download could not be started.
#[derive(Debug, Error)]
pub enum ExportError {
	/// The graph could not be serialized.
	#[error("could not serialize graph: {0}")]
	Serialize(#[from] serde_json::Error),
	/// A DOM call failed.
	#[error("download failed: {0}")]
	Browser(String),
}

impl From<JsValue> for ExportError {
	fn from(value: JsValue) -> Self {
		ExportError::Browser(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

/// Pretty-printed `{nodes, edges}` exactly as received.
pub fn to_json(graph: &GraphData) -> Result<String, ExportError> {
	Ok(serde_json::to_string_pretty(graph)?)
}

/// Node table; edges are not part of the CSV.
pub fn to_csv(nodes: &[GraphNode]) -> String {
	let mut out = String::from(CSV_HEADER);
	for n in nodes {
		out.push('\n');
		let _ = write!(
			out,
			"{},\"{}\",{},{},{},{}",
			n.id,
			n.name.replace('"', "\"\""),
			n.kind,
			opt(n.tier),
			opt(n.lat),
			opt(n.lon),
		);
	}
	out
}

fn opt<T: ToString>(v: Option<T>) -> String {
	v.map(|v| v.to_string()).unwrap_or_default()
}

/// Hands `contents` to the browser as a file download.
pub fn download(filename: &str, mime: &str, contents: &str) -> Result<(), ExportError> {
	let window = web_sys::window().ok_or_else(|| ExportError::Browser("no window".into()))?;
	let document = window
		.document()
		.ok_or_else(|| ExportError::Browser("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| ExportError::Browser("no body".into()))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(contents));
	let options = web_sys::BlobPropertyBag::new();
	options.set_type(mime);
	let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = web_sys::Url::create_object_url_with_blob(&blob)?;

	let anchor = document.create_element("a")?;
	anchor.set_attribute("href", &url)?;
	anchor.set_attribute("download", filename)?;
	body.append_child(&anchor)?;
	if let Some(a) = anchor.dyn_ref::<web_sys::HtmlElement>() {
		a.click();
	}
	body.remove_child(&anchor)?;
	web_sys::Url::revoke_object_url(&url)?;

	info!("exported {filename} ({} bytes)", contents.len());
	Ok(())
}

/// Downloads the graph as `supply-chain.json`.
pub fn download_json(graph: &GraphData) -> Result<(), ExportError> {
	download(JSON_FILE, "application/json", &to_json(graph)?)
}

/// Downloads the node table as `supply-chain-nodes.csv`.
pub fn download_csv(graph: &GraphData) -> Result<(), ExportError> {
	download(CSV_FILE, "text/csv", &to_csv(&graph.nodes))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::{EdgeKind, GraphEdge, NodeKind};

	fn node(id: &str, name: &str, kind: NodeKind, tier: Option<i32>, pos: Option<(f64, f64)>) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: name.into(),
			kind,
			tier,
			lat: pos.map(|p| p.0),
			lon: pos.map(|p| p.1),
		}
	}

	#[test]
	fn csv_quotes_names_and_blanks_missing_fields() {
		let nodes = [node("c1", "Acme \"A\"", NodeKind::Company, None, Some((1.5, 2.5)))];
		let csv = to_csv(&nodes);
		let mut lines = csv.lines();
		assert_eq!(lines.next(), Some("id,name,type,tier,lat,lon"));
		assert_eq!(lines.next(), Some(r#"c1,"Acme ""A""",Company,,1.5,2.5"#));
		assert_eq!(lines.next(), None);
	}

	#[test]
	fn csv_keeps_unplottable_nodes() {
		let nodes = [
			node("s1", "Bolt, Inc", NodeKind::Supplier, Some(2), None),
			node("x", "Hub", NodeKind::Other("Warehouse".into()), None, Some((-3.0, 7.25))),
		];
		let csv = to_csv(&nodes);
		assert_eq!(
			csv,
			"id,name,type,tier,lat,lon\ns1,\"Bolt, Inc\",Supplier,2,,\nx,\"Hub\",Warehouse,,-3,7.25"
		);
	}

	#[test]
	fn csv_of_no_nodes_is_header_only() {
		assert_eq!(to_csv(&[]), CSV_HEADER);
	}

	#[test]
	fn json_is_pretty_and_lossless() {
		let graph = GraphData {
			nodes: vec![node("c1", "Acme", NodeKind::Company, None, None)],
			edges: vec![GraphEdge {
				from_id: "s1".into(),
				to_id: "c1".into(),
				kind: EdgeKind::SuppliesTo,
			}],
		};
		let json = to_json(&graph).unwrap();
		assert!(json.contains("\n  \"nodes\": ["));
		let back: GraphData = serde_json::from_str(&json).unwrap();
		assert_eq!(back, graph);
	}
}
