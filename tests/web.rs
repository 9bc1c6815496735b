//! Browser-only checks for the download path.
#![cfg(target_arch = "wasm32")]

use supply_map::api::{GraphData, GraphNode, NodeKind};
use supply_map::export;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn json_download_starts() {
	let graph = GraphData {
		nodes: vec![GraphNode {
			id: "c1".into(),
			name: "Acme".into(),
			kind: NodeKind::Company,
			tier: None,
			lat: Some(1.5),
			lon: Some(2.5),
		}],
		edges: vec![],
	};
	assert!(export::download_json(&graph).is_ok());
	assert!(export::download_csv(&graph).is_ok());
}
