/// serialization support for computed statements
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::statement::StatementOutput;
use crate::types::{BuildingId, StatementParty, TenantShareResult, UnitId};

/// flat, document-friendly projection of a computed statement
#[derive(Debug, Serialize, Deserialize)]
pub struct StatementView {
    pub building_id: BuildingId,
    pub period_start: String,
    pub period_end: String,
    pub total_costs: Money,
    pub total_tenant_costs: Money,
    pub total_owner_costs: Money,
    pub total_advances: Money,
    pub total_refunds: Money,
    pub total_balances: Money,
    pub rows: Vec<StatementRowView>,
    pub diagnostic_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatementRowView {
    /// contract id, or "VACANCY" for the owner-borne row
    pub party: String,
    pub unit_ids: Vec<UnitId>,
    pub total_cost: Money,
    pub advance_payments: Money,
    pub difference: Money,
    pub settlement: SettlementKind,
}

/// which way a row settles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementKind {
    Refund,
    BalanceDue,
    Even,
    OwnerBorne,
}

impl StatementView {
    pub fn from_output(output: &StatementOutput) -> Self {
        StatementView {
            building_id: output.building_id,
            period_start: output.period.start.to_string(),
            period_end: output.period.end.to_string(),
            total_costs: output.summary.total_costs,
            total_tenant_costs: output.summary.total_tenant_costs,
            total_owner_costs: output.summary.total_owner_costs,
            total_advances: output.summary.total_advances,
            total_refunds: output.summary.total_refunds,
            total_balances: output.summary.total_balances,
            rows: output.per_tenant.iter().map(StatementRowView::from_result).collect(),
            diagnostic_count: output.diagnostics.len(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl StatementRowView {
    pub fn from_result(result: &TenantShareResult) -> Self {
        let (party, settlement) = match result.party {
            StatementParty::Contract(id) => {
                let settlement = if result.difference.is_positive() {
                    SettlementKind::Refund
                } else if result.difference.is_negative() {
                    SettlementKind::BalanceDue
                } else {
                    SettlementKind::Even
                };
                (id.to_string(), settlement)
            }
            StatementParty::Vacancy => ("VACANCY".to_string(), SettlementKind::OwnerBorne),
        };

        StatementRowView {
            party,
            unit_ids: result.unit_ids.clone(),
            total_cost: result.total_cost,
            advance_payments: result.advance_payments,
            difference: result.difference,
            settlement,
        }
    }
}
