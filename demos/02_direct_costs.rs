/// direct costs - metered charges assigned to one contract, no proration
use chrono::NaiveDate;
use cost_allocation_rs::{
    BillingPeriod, CostItem, DirectCostAssignment, DistributionKey, Money, OccupancyContract,
    StatementEngine, StatementInput, Unit, Uuid,
};
use rust_decimal_macros::dec;
use std::collections::BTreeMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let building_id = Uuid::new_v4();
    let units: Vec<Unit> = [dec!(60), dec!(95)]
        .into_iter()
        .map(|area| Unit {
            id: Uuid::new_v4(),
            building_id,
            area,
        })
        .collect();

    let contracts: Vec<OccupancyContract> = units
        .iter()
        .map(|u| OccupancyContract {
            id: Uuid::new_v4(),
            unit_id: u.id,
            tenant_id: Uuid::new_v4(),
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            end_date: None,
            person_count: 2,
        })
        .collect();

    let metered_water = CostItem {
        id: Uuid::new_v4(),
        label: "metered water".to_string(),
        amount: Money::from_decimal(dec!(421.80)),
        key: DistributionKey::Direct,
    };

    let input = StatementInput {
        building_id,
        period: BillingPeriod::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )?,
        direct_assignments: vec![
            DirectCostAssignment {
                cost_item_id: metered_water.id,
                contract_id: contracts[0].id,
                amount: Money::from_decimal(dec!(180.30)),
            },
            DirectCostAssignment {
                cost_item_id: metered_water.id,
                contract_id: contracts[1].id,
                amount: Money::from_decimal(dec!(241.50)),
            },
        ],
        units,
        contracts,
        cost_items: vec![metered_water],
        advance_payments: BTreeMap::new(),
    };

    let output = StatementEngine.compute(&input)?;
    for result in &output.per_tenant {
        println!("{:?}: {}", result.party, result.total_cost);
    }
    for diagnostic in &output.diagnostics {
        println!("diagnostic: {diagnostic:?}");
    }

    Ok(())
}
