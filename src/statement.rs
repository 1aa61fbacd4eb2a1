use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::allocation::ShareAllocator;
use crate::decimal::Money;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::distribution::{area_by_unit, compute_bases};
use crate::errors::{AllocationError, Result};
use crate::intervals;
use crate::types::{
    BillingPeriod, BuildingId, ContractId, CostItem, DirectCostAssignment, OccupancyContract,
    StatementParty, StatementSummary, TenantShareResult, Unit, UnitId,
};
use crate::vacancy;

/// everything one allocation run reads; never mutated by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementInput {
    pub building_id: BuildingId,
    pub period: BillingPeriod,
    pub units: Vec<Unit>,
    pub contracts: Vec<OccupancyContract>,
    pub cost_items: Vec<CostItem>,
    pub direct_assignments: Vec<DirectCostAssignment>,
    pub advance_payments: BTreeMap<ContractId, Money>,
}

impl StatementInput {
    /// reject inconsistent input before any allocation work starts
    pub fn validate(&self) -> Result<()> {
        if self.period.start > self.period.end {
            return Err(AllocationError::InvalidPeriod {
                start: self.period.start,
                end: self.period.end,
            });
        }
        if self.units.is_empty() {
            return Err(AllocationError::NoUnits);
        }

        let mut unit_ids = HashSet::new();
        for unit in &self.units {
            if !unit_ids.insert(unit.id) {
                return Err(AllocationError::DuplicateUnit { unit_id: unit.id });
            }
        }

        for contract in &self.contracts {
            if !unit_ids.contains(&contract.unit_id) {
                return Err(AllocationError::UnknownUnit {
                    contract_id: contract.id,
                    unit_id: contract.unit_id,
                });
            }
            if let Some(end) = contract.end_date {
                if contract.start_date > end {
                    return Err(AllocationError::InvalidContractTerm {
                        contract_id: contract.id,
                        start: contract.start_date,
                        end,
                    });
                }
            }
        }

        let mut item_ids = HashSet::new();
        for item in &self.cost_items {
            if !item_ids.insert(item.id) {
                return Err(AllocationError::DuplicateCostItem { cost_item: item.id });
            }
            if item.amount.is_negative() {
                return Err(AllocationError::NegativeAmount {
                    cost_item: item.id,
                    amount: item.amount,
                });
            }
        }

        Ok(())
    }
}

/// computed statement: summary, per-party rows, and non-fatal diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOutput {
    pub building_id: BuildingId,
    pub period: BillingPeriod,
    pub summary: StatementSummary,
    pub per_tenant: Vec<TenantShareResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// runs the full allocation pipeline for one billing period:
/// resolve occupancy per unit, compute distribution bases once per key,
/// allocate each cost item, route vacancy cost to the owner, aggregate
pub struct StatementEngine;

impl StatementEngine {
    pub fn compute(&self, input: &StatementInput) -> Result<StatementOutput> {
        input.validate()?;

        let mut diagnostics = DiagnosticLog::new();
        let period = input.period;

        // sorted unit order keeps segment indices, and with them the
        // rounding-residual placement, identical across runs
        let mut units = input.units.clone();
        units.sort_by_key(|u| u.id);

        let mut segments = Vec::new();
        for unit in &units {
            let unit_segments = intervals::resolve(unit, &input.contracts, &period)?;
            if unit_segments.len() == 1 && unit_segments[0].is_vacant() {
                diagnostics.emit(Diagnostic::FullPeriodVacancy { unit_id: unit.id });
            }
            segments.extend(unit_segments);
        }

        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);

        // every contract present in the period gets a row, zero-cost or not
        let mut tenant_totals: BTreeMap<ContractId, Money> = BTreeMap::new();
        let mut contract_units: BTreeMap<ContractId, BTreeSet<UnitId>> = BTreeMap::new();
        let mut vacant_units: BTreeSet<UnitId> = BTreeSet::new();
        for segment in &segments {
            match segment.contract_id {
                Some(contract_id) => {
                    tenant_totals.entry(contract_id).or_default();
                    contract_units
                        .entry(contract_id)
                        .or_default()
                        .insert(segment.unit_id);
                }
                None => {
                    vacant_units.insert(segment.unit_id);
                }
            }
        }

        let allocator = ShareAllocator;
        let mut owner_total = Money::ZERO;
        for item in &input.cost_items {
            let shares = allocator.allocate(
                item,
                &segments,
                &areas,
                &period,
                &bases,
                &input.direct_assignments,
                &mut diagnostics,
            )?;
            let routed = vacancy::route(&segments, &shares);
            for (contract_id, amount) in routed.tenant_shares {
                *tenant_totals.entry(contract_id).or_default() += amount;
            }
            owner_total += routed.owner_share;
        }

        let mut per_tenant = Vec::with_capacity(tenant_totals.len() + 1);
        let mut summary = StatementSummary::default();
        for (contract_id, total_cost) in &tenant_totals {
            let advance = input
                .advance_payments
                .get(contract_id)
                .copied()
                .unwrap_or(Money::ZERO);
            let difference = advance - *total_cost;

            summary.total_tenant_costs += *total_cost;
            summary.total_advances += advance;
            if difference.is_positive() {
                summary.total_refunds += difference;
            } else {
                summary.total_balances += difference.abs();
            }

            per_tenant.push(TenantShareResult {
                party: StatementParty::Contract(*contract_id),
                unit_ids: contract_units
                    .get(contract_id)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default(),
                total_cost: *total_cost,
                advance_payments: advance,
                difference,
            });
        }

        // owner-borne vacancy cost is not an open tenant balance; it gets
        // its own row but stays out of refund/balance totals
        if !vacant_units.is_empty() {
            per_tenant.push(TenantShareResult {
                party: StatementParty::Vacancy,
                unit_ids: vacant_units.iter().copied().collect(),
                total_cost: owner_total,
                advance_payments: Money::ZERO,
                difference: -owner_total,
            });
        }

        summary.total_owner_costs = owner_total;
        summary.total_costs = summary.total_tenant_costs + owner_total;

        Ok(StatementOutput {
            building_id: input.building_id,
            period,
            summary,
            per_tenant,
            diagnostics: diagnostics.take(),
        })
    }
}
