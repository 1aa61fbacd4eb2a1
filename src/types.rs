use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Weight};
use crate::errors::{AllocationError, Result};

/// unique identifier for a building
pub type BuildingId = Uuid;

/// unique identifier for a rentable unit
pub type UnitId = Uuid;

/// unique identifier for an occupancy contract
pub type ContractId = Uuid;

/// unique identifier for a tenant
pub type TenantId = Uuid;

/// unique identifier for a cost item
pub type CostItemId = Uuid;

/// the date range a cost statement covers, both ends inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BillingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(AllocationError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// inclusive day count of the period
    pub fn total_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// clip an inclusive date range to the period; None if disjoint
    pub fn clip(&self, start: NaiveDate, end: Option<NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
        let end = end.unwrap_or(self.end);
        if start > self.end || end < self.start {
            return None;
        }
        Some((start.max(self.start), end.min(self.end)))
    }
}

/// a rentable unit within a building; read-only input to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub building_id: BuildingId,
    /// living area in square meters
    pub area: Decimal,
}

/// one lease term on one unit; an absent end date means open-ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyContract {
    pub id: ContractId,
    pub unit_id: UnitId,
    pub tenant_id: TenantId,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub person_count: u32,
}

/// rule by which a cost item is spread across units and tenants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistributionKey {
    /// day-weighted living area
    Area,
    /// day-weighted occupant count
    Persons,
    /// flat split per selected unit
    Units,
    /// explicit per-contract assignment, no proration
    Direct,
}

/// one operating cost position for the billing period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostItem {
    pub id: CostItemId,
    pub label: String,
    pub amount: Money,
    pub key: DistributionKey,
}

/// explicit mapping of a direct-keyed cost item onto one contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectCostAssignment {
    pub cost_item_id: CostItemId,
    pub contract_id: ContractId,
    pub amount: Money,
}

/// occupancy status of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Tenant,
    Vacant,
}

/// maximal contiguous date range within the period during which a unit's
/// occupancy does not change; per unit, segments cover the whole period
/// with no gaps and no overlaps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancySegment {
    pub unit_id: UnitId,
    pub kind: SegmentKind,
    pub contract_id: Option<ContractId>,
    pub tenant_id: Option<TenantId>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_count: u32,
    pub person_count: u32,
}

impl OccupancySegment {
    pub fn is_vacant(&self) -> bool {
        self.kind == SegmentKind::Vacant
    }

    /// fraction of the billing period this segment covers
    pub fn day_fraction(&self, total_days: u32) -> Weight {
        Weight::day_fraction(self.day_count, total_days)
    }
}

/// the party a statement row settles against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatementParty {
    /// a tenant, identified by the occupancy contract
    Contract(ContractId),
    /// vacancy cost borne by the building owner
    Vacancy,
}

/// per-party result row of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantShareResult {
    pub party: StatementParty,
    /// units the party's shares came from
    pub unit_ids: Vec<UnitId>,
    pub total_cost: Money,
    pub advance_payments: Money,
    /// advances minus cost; positive is a refund, negative a balance due
    pub difference: Money,
}

/// aggregate totals across all result rows of one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StatementSummary {
    pub total_costs: Money,
    pub total_tenant_costs: Money,
    pub total_owner_costs: Money,
    pub total_advances: Money,
    pub total_refunds: Money,
    pub total_balances: Money,
}
