//! HTTP client for the supply-chain backend and its wire types.

mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::RequestError;
pub use types::{
	Company, Depth, EdgeKind, GraphData, GraphEdge, GraphNode, ImpactRequest, NodeKind, Port,
	Scenario, Supplier, SupplyChainRequest,
};
