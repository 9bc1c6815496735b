//! The controls' form state and the query it resolves to.

use crate::api::{Depth, Scenario};

/// The one query the Load action would issue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryIntent {
	/// Upstream graph of a company.
	SupplyChain {
		/// Root company.
		company_id: String,
		/// Tiers to traverse.
		depth: Depth,
	},
	/// Subgraph affected by a disruption.
	Impact {
		/// Disruption kind.
		scenario: Scenario,
		/// Supplier or port id.
		target_id: String,
	},
}

/// Which reference list feeds the target picker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetList {
	/// `supplier_failure` targets suppliers.
	Suppliers,
	/// `port_closure` targets ports.
	Ports,
}

/// Field values of the controls panel. Empty strings mean "not chosen".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntentForm {
	company_id: String,
	depth: Depth,
	scenario: Option<Scenario>,
	target_id: String,
}

impl IntentForm {
	/// Chosen company, empty when none.
	pub fn company_id(&self) -> &str {
		&self.company_id
	}

	/// Chosen depth.
	pub fn depth(&self) -> Depth {
		self.depth
	}

	/// Chosen scenario, `None` for a plain supply-chain query.
	pub fn scenario(&self) -> Option<Scenario> {
		self.scenario
	}

	/// Chosen target, empty when none.
	pub fn target_id(&self) -> &str {
		&self.target_id
	}

	/// Sets the company.
	pub fn set_company(&mut self, id: impl Into<String>) {
		self.company_id = id.into();
	}

	/// Sets the depth.
	pub fn set_depth(&mut self, depth: Depth) {
		self.depth = depth;
	}

	/// Sets the scenario and always forgets the target.
	pub fn set_scenario(&mut self, scenario: Option<Scenario>) {
		self.scenario = scenario;
		self.target_id.clear();
	}

	/// Sets the disruption target.
	pub fn set_target(&mut self, id: impl Into<String>) {
		self.target_id = id.into();
	}

	/// The list the target picker offers, if the scenario needs one.
	pub fn target_list(&self) -> Option<TargetList> {
		self.scenario.map(|sc| match sc {
			Scenario::SupplierFailure => TargetList::Suppliers,
			Scenario::PortClosure => TargetList::Ports,
		})
	}

	/// `(company AND no scenario) OR (scenario AND target)`.
	pub fn can_load(&self) -> bool {
		self.intent().is_some()
	}

	/// Resolves the form into a query; impact wins when fully specified.
	pub fn intent(&self) -> Option<QueryIntent> {
		match self.scenario {
			Some(scenario) if !self.target_id.is_empty() => Some(QueryIntent::Impact {
				scenario,
				target_id: self.target_id.clone(),
			}),
			None if !self.company_id.is_empty() => Some(QueryIntent::SupplyChain {
				company_id: self.company_id.clone(),
				depth: self.depth,
			}),
			_ => None,
		}
	}
}
