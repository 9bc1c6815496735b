//! All dashboard state, changed only through the methods below.
//!
//! Reference lists, the query form, the current graph and the selection each
//! have one update path. A graph result replaces nodes and edges together and
//! always drops the selection.

use std::sync::Arc;

use log::{info, warn};

use crate::api::{Company, Depth, GraphData, Port, RequestError, Scenario, Supplier};
use crate::intent::{IntentForm, QueryIntent};

/// Where the current graph query stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryPhase {
	/// Nothing requested yet.
	#[default]
	Idle,
	/// A request is in flight.
	Loading,
	/// The last request succeeded.
	Loaded,
	/// The last request failed.
	Failed,
}

/// Lists used to populate the pickers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReferenceData {
	/// Company choices.
	pub companies: Vec<Company>,
	/// Supplier targets.
	pub suppliers: Vec<Supplier>,
	/// Port targets.
	pub ports: Vec<Port>,
}

/// Outcome of one of the three startup loads.
#[derive(Clone, Debug)]
pub enum ReferenceLoad {
	/// Result of `list_companies`.
	Companies(Result<Vec<Company>, RequestError>),
	/// Result of `list_suppliers`.
	Suppliers(Result<Vec<Supplier>, RequestError>),
	/// Result of `list_ports`.
	Ports(Result<Vec<Port>, RequestError>),
}

/// Proof that a query was started; only the latest ticket may land a result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryTicket {
	generation: u64,
	/// What to ask the backend for.
	pub intent: QueryIntent,
}

/// The dashboard's single state container.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dashboard {
	reference: ReferenceData,
	reference_failed: bool,
	form: IntentForm,
	graph: Arc<GraphData>,
	selection: Option<String>,
	phase: QueryPhase,
	error: Option<String>,
	generation: u64,
}

impl Dashboard {
	/// Picker contents.
	pub fn reference(&self) -> &ReferenceData {
		&self.reference
	}

	/// Current form values.
	pub fn form(&self) -> &IntentForm {
		&self.form
	}

	/// The current graph snapshot.
	pub fn graph(&self) -> &Arc<GraphData> {
		&self.graph
	}

	/// Selected node id, if any.
	pub fn selection(&self) -> Option<&str> {
		self.selection.as_deref()
	}

	/// Query phase.
	pub fn phase(&self) -> QueryPhase {
		self.phase
	}

	/// True while a graph query is in flight.
	pub fn is_loading(&self) -> bool {
		self.phase == QueryPhase::Loading
	}

	/// Message for the alert region.
	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	/// Whether the Load action is available right now.
	pub fn can_load(&self) -> bool {
		!self.is_loading() && self.form.can_load()
	}

	/// Starts a new batch of reference loads.
	pub fn begin_reference_load(&mut self) {
		self.reference_failed = false;
	}

	/// Applies one startup load. Each result touches only its own list; the
	/// first failure of a batch sets the error and later ones are dropped.
	pub fn apply_reference(&mut self, load: ReferenceLoad) {
		let failure = match load {
			ReferenceLoad::Companies(Ok(v)) => {
				self.reference.companies = v;
				None
			}
			ReferenceLoad::Suppliers(Ok(v)) => {
				self.reference.suppliers = v;
				None
			}
			ReferenceLoad::Ports(Ok(v)) => {
				self.reference.ports = v;
				None
			}
			ReferenceLoad::Companies(Err(e))
			| ReferenceLoad::Suppliers(Err(e))
			| ReferenceLoad::Ports(Err(e)) => Some(e),
		};
		if let Some(err) = failure {
			warn!("reference data load failed: {err}");
			if !self.reference_failed {
				self.reference_failed = true;
				self.error = Some(err.to_string());
			}
		}
	}

	/// Sets the company.
	pub fn set_company(&mut self, id: impl Into<String>) {
		self.form.set_company(id);
	}

	/// Sets the depth.
	pub fn set_depth(&mut self, depth: Depth) {
		self.form.set_depth(depth);
	}

	/// Sets the scenario, clearing the target.
	pub fn set_scenario(&mut self, scenario: Option<Scenario>) {
		self.form.set_scenario(scenario);
	}

	/// Sets the disruption target.
	pub fn set_target(&mut self, id: impl Into<String>) {
		self.form.set_target(id);
	}

	/// Enters `Loading` for the form's query. Returns `None`, changing nothing,
	/// when the form does not resolve to a query.
	///
	/// A ticket issued here supersedes any earlier one still in flight.
	pub fn begin_query(&mut self) -> Option<QueryTicket> {
		let intent = self.form.intent()?;
		self.error = None;
		self.phase = QueryPhase::Loading;
		self.generation += 1;
		info!("query #{} started: {intent:?}", self.generation);
		Some(QueryTicket {
			generation: self.generation,
			intent,
		})
	}

	/// Lands a query result. Returns `false` when the ticket is stale and the
	/// result was discarded.
	pub fn finish_query(
		&mut self,
		ticket: &QueryTicket,
		result: Result<GraphData, RequestError>,
	) -> bool {
		if ticket.generation != self.generation {
			warn!(
				"discarding response for query #{} (current is #{})",
				ticket.generation, self.generation
			);
			return false;
		}
		match result {
			Ok(graph) => {
				info!(
					"query #{} loaded {} nodes, {} edges",
					ticket.generation,
					graph.nodes.len(),
					graph.edges.len()
				);
				self.graph = Arc::new(graph);
				self.phase = QueryPhase::Loaded;
			}
			Err(err) => {
				warn!("query #{} failed: {err}", ticket.generation);
				self.error = Some(err.to_string());
				self.graph = Arc::default();
				self.phase = QueryPhase::Failed;
			}
		}
		self.selection = None;
		true
	}

	/// Invalidates any outstanding ticket, e.g. when the view is torn down.
	pub fn abandon_queries(&mut self) {
		self.generation += 1;
		if self.is_loading() {
			self.phase = QueryPhase::Idle;
		}
	}

	/// Clicking the selected node clears it; any other known node replaces it.
	pub fn toggle_selection(&mut self, id: &str) {
		if self.selection.as_deref() == Some(id) {
			self.selection = None;
		} else if self.graph.node(id).is_some() {
			self.selection = Some(id.to_owned());
		}
	}
}
