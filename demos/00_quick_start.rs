/// quick start - one unit, one tenant, one heating bill
use chrono::NaiveDate;
use cost_allocation_rs::{
    BillingPeriod, CostItem, DistributionKey, Money, OccupancyContract, StatementEngine,
    StatementInput, StatementView, Unit, Uuid,
};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let building_id = Uuid::new_v4();
    let unit = Unit {
        id: Uuid::new_v4(),
        building_id,
        area: dec!(85),
    };
    let contract = OccupancyContract {
        id: Uuid::new_v4(),
        unit_id: unit.id,
        tenant_id: Uuid::new_v4(),
        start_date: NaiveDate::from_ymd_opt(2022, 9, 1).unwrap(),
        end_date: None,
        person_count: 2,
    };

    let mut advances = BTreeMap::new();
    advances.insert(contract.id, Money::from_major(1_200));

    let input = StatementInput {
        building_id,
        period: BillingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )?,
        units: vec![unit],
        contracts: vec![contract],
        cost_items: vec![CostItem {
            id: Uuid::new_v4(),
            label: "heating".to_string(),
            amount: Money::from_decimal(dec!(980.40)),
            key: DistributionKey::Area,
        }],
        direct_assignments: vec![],
        advance_payments: advances,
    };

    let output = StatementEngine.compute(&input)?;
    println!("{}", StatementView::from_output(&output).to_json_pretty()?);

    Ok(())
}
