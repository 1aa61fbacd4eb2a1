use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{ContractId, CostItemId, UnitId};

/// non-fatal findings surfaced alongside a computed statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// a direct-keyed item has no assignment for an occupied segment;
    /// the segment receives a zero share rather than a spread amount
    MissingDirectAssignment {
        cost_item: CostItemId,
        contract_id: ContractId,
        unit_id: UnitId,
    },
    /// direct assignments for an item do not add up to the item amount
    UnassignedDirectAmount {
        cost_item: CostItemId,
        assigned: Money,
        item_amount: Money,
    },
    /// a unit had no active contract on any day of the period
    FullPeriodVacancy {
        unit_id: UnitId,
    },
}

/// diagnostic log collected during one statement run
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// diagnostics concerning one cost item
    pub fn for_cost_item(&self, id: CostItemId) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| match d {
            Diagnostic::MissingDirectAssignment { cost_item, .. } => *cost_item == id,
            Diagnostic::UnassignedDirectAmount { cost_item, .. } => *cost_item == id,
            Diagnostic::FullPeriodVacancy { .. } => false,
        })
    }
}
