use gloo_net::http::{Request, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;

use super::error::RequestError;
use super::types::{
	Company, Depth, GraphData, ImpactRequest, Port, Scenario, Supplier, SupplyChainRequest,
};
use crate::config::ApiConfig;

/// Thin fetch wrapper over the backend's REST endpoints.
///
/// Every call is one best-effort round trip: no retry, timeout or caching.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
	config: ApiConfig,
}

impl ApiClient {
	/// Creates a client for the given backend location.
	pub fn new(config: ApiConfig) -> Self {
		Self { config }
	}

	/// `GET /api/companies`
	pub async fn list_companies(&self) -> Result<Vec<Company>, RequestError> {
		self.get("/api/companies").await
	}

	/// `GET /api/suppliers`
	pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, RequestError> {
		self.get("/api/suppliers").await
	}

	/// `GET /api/ports`
	pub async fn list_ports(&self) -> Result<Vec<Port>, RequestError> {
		self.get("/api/ports").await
	}

	/// `POST /api/supply-chain`: the company plus everything upstream of it.
	pub async fn fetch_supply_chain(
		&self,
		company_id: &str,
		depth: Depth,
	) -> Result<GraphData, RequestError> {
		self.post(
			"/api/supply-chain",
			&SupplyChainRequest { company_id, depth },
		)
		.await
	}

	/// `POST /api/impact`: the subgraph affected by the disruption.
	pub async fn fetch_impact(
		&self,
		scenario: Scenario,
		target_id: &str,
	) -> Result<GraphData, RequestError> {
		self.post("/api/impact", &ImpactRequest { scenario, target_id })
			.await
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, RequestError> {
		let url = self.config.url(path);
		debug!("GET {url}");
		let resp = Request::get(&url)
			.header("Content-Type", "application/json")
			.send()
			.await?;
		parse(resp).await
	}

	async fn post<B: serde::Serialize, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T, RequestError> {
		let url = self.config.url(path);
		debug!("POST {url}");
		let resp = Request::post(&url)
			.header("Content-Type", "application/json")
			.json(body)?
			.send()
			.await?;
		parse(resp).await
	}
}

async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, RequestError> {
	if !resp.ok() {
		let body = resp.text().await.unwrap_or_default();
		warn!("{} returned HTTP {}", resp.url(), resp.status());
		return Err(RequestError::from_status(resp.status(), &body));
	}
	Ok(resp.json::<T>().await?)
}
