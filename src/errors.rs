use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{ContractId, CostItemId, DistributionKey, UnitId};

#[derive(Error, Debug)]
pub enum AllocationError {
    #[error("invalid billing period: start {start} is after end {end}")]
    InvalidPeriod {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("overlapping occupancy on unit {unit_id}: contracts {first_contract} and {second_contract}")]
    OverlappingOccupancy {
        unit_id: UnitId,
        first_contract: ContractId,
        second_contract: ContractId,
    },

    #[error("degenerate distribution base for cost item {cost_item}: key {key:?} has zero base")]
    DegenerateDistributionBase {
        cost_item: CostItemId,
        key: DistributionKey,
    },

    #[error("contract {contract_id} references unknown unit {unit_id}")]
    UnknownUnit {
        contract_id: ContractId,
        unit_id: UnitId,
    },

    #[error("negative amount on cost item {cost_item}: {amount}")]
    NegativeAmount {
        cost_item: CostItemId,
        amount: Money,
    },

    #[error("duplicate unit id: {unit_id}")]
    DuplicateUnit {
        unit_id: UnitId,
    },

    #[error("duplicate cost item id: {cost_item}")]
    DuplicateCostItem {
        cost_item: CostItemId,
    },

    #[error("contract {contract_id} has invalid term: start {start} is after end {end}")]
    InvalidContractTerm {
        contract_id: ContractId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("no units selected for statement")]
    NoUnits,
}

pub type Result<T> = std::result::Result<T, AllocationError>;
