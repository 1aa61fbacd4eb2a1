/// vacancy routing - a mid-period move-out leaves the owner with the rest
use chrono::NaiveDate;
use cost_allocation_rs::{
    BillingPeriod, CostItem, DistributionKey, Money, OccupancyContract, StatementEngine,
    StatementInput, StatementParty, Unit, Uuid,
};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let building_id = Uuid::new_v4();
    let unit = Unit {
        id: Uuid::new_v4(),
        building_id,
        area: dec!(100),
    };
    // tenant moves out on january 15th; days 16-31 are vacant
    let contract = OccupancyContract {
        id: Uuid::new_v4(),
        unit_id: unit.id,
        tenant_id: Uuid::new_v4(),
        start_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
        end_date: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
        person_count: 2,
    };

    let input = StatementInput {
        building_id,
        period: BillingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )?,
        units: vec![unit],
        contracts: vec![contract],
        cost_items: vec![CostItem {
            id: Uuid::new_v4(),
            label: "heating".to_string(),
            amount: Money::from_major(310),
            key: DistributionKey::Area,
        }],
        direct_assignments: vec![],
        advance_payments: BTreeMap::new(),
    };

    let output = StatementEngine.compute(&input)?;
    for result in &output.per_tenant {
        match result.party {
            StatementParty::Contract(id) => {
                println!("tenant {id}: {} (15 of 31 days)", result.total_cost)
            }
            StatementParty::Vacancy => {
                println!("owner-borne vacancy: {}", result.total_cost)
            }
        }
    }
    println!("total: {}", output.summary.total_costs);

    Ok(())
}
