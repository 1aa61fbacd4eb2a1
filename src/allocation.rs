use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::diagnostics::{Diagnostic, DiagnosticLog};
use crate::distribution::{segment_weight, DistributionBases};
use crate::errors::{AllocationError, Result};
use crate::types::{
    BillingPeriod, ContractId, CostItem, DirectCostAssignment, DistributionKey, OccupancySegment,
    UnitId,
};

/// one segment's monetary share of a cost item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Share {
    /// index into the run's segment list
    pub segment_index: usize,
    pub amount: Money,
}

/// allocates one cost item across the resolved segments
///
/// weighted keys prorate at full precision and reconcile the cent-rounded
/// shares so they sum exactly to the item amount; direct keys look up the
/// caller-supplied assignment per contract and never spread implicitly
pub struct ShareAllocator;

impl ShareAllocator {
    pub fn allocate(
        &self,
        item: &CostItem,
        segments: &[OccupancySegment],
        areas: &HashMap<UnitId, Decimal>,
        period: &BillingPeriod,
        bases: &DistributionBases,
        direct_assignments: &[DirectCostAssignment],
        diagnostics: &mut DiagnosticLog,
    ) -> Result<Vec<Share>> {
        match item.key {
            DistributionKey::Direct => {
                Ok(self.allocate_direct(item, segments, direct_assignments, diagnostics))
            }
            key => {
                // for_key is Some for every non-direct key
                let base = bases
                    .for_key(key)
                    .ok_or(AllocationError::DegenerateDistributionBase {
                        cost_item: item.id,
                        key,
                    })?;
                self.allocate_weighted(item, segments, areas, period, base.as_decimal())
            }
        }
    }

    fn allocate_weighted(
        &self,
        item: &CostItem,
        segments: &[OccupancySegment],
        areas: &HashMap<UnitId, Decimal>,
        period: &BillingPeriod,
        base: Decimal,
    ) -> Result<Vec<Share>> {
        if item.amount.is_zero() {
            return Ok(zero_shares(segments));
        }
        if base.is_zero() {
            return Err(AllocationError::DegenerateDistributionBase {
                cost_item: item.id,
                key: item.key,
            });
        }

        let mut shares: Vec<Share> = segments
            .iter()
            .enumerate()
            .map(|(segment_index, segment)| {
                let weight = segment_weight(item.key, segment, areas, period);
                let raw = item.amount.as_decimal() * weight.as_decimal() / base;
                Share {
                    segment_index,
                    amount: Money::from_decimal(raw).round_to_cents(),
                }
            })
            .collect();

        // the cent-rounded shares must sum exactly to the item amount;
        // push the residual onto the single largest share (first on ties)
        let rounded_sum: Money = shares.iter().map(|s| s.amount).sum();
        let residual = item.amount - rounded_sum;
        if !residual.is_zero() {
            let mut largest = 0;
            for (i, share) in shares.iter().enumerate() {
                if share.amount > shares[largest].amount {
                    largest = i;
                }
            }
            shares[largest].amount += residual;
        }

        Ok(shares)
    }

    fn allocate_direct(
        &self,
        item: &CostItem,
        segments: &[OccupancySegment],
        direct_assignments: &[DirectCostAssignment],
        diagnostics: &mut DiagnosticLog,
    ) -> Vec<Share> {
        let mut by_contract: HashMap<ContractId, Money> = HashMap::new();
        for assignment in direct_assignments
            .iter()
            .filter(|a| a.cost_item_id == item.id)
        {
            *by_contract.entry(assignment.contract_id).or_default() += assignment.amount;
        }

        let mut assigned = Money::ZERO;
        let shares: Vec<Share> = segments
            .iter()
            .enumerate()
            .map(|(segment_index, segment)| {
                // vacant segments never receive direct shares
                let amount = match segment.contract_id {
                    Some(contract_id) => match by_contract.get(&contract_id) {
                        Some(&amount) => amount,
                        None => {
                            diagnostics.emit(Diagnostic::MissingDirectAssignment {
                                cost_item: item.id,
                                contract_id,
                                unit_id: segment.unit_id,
                            });
                            Money::ZERO
                        }
                    },
                    None => Money::ZERO,
                };
                assigned += amount;
                Share {
                    segment_index,
                    amount,
                }
            })
            .collect();

        if assigned != item.amount {
            diagnostics.emit(Diagnostic::UnassignedDirectAmount {
                cost_item: item.id,
                assigned,
                item_amount: item.amount,
            });
        }

        shares
    }
}

fn zero_shares(segments: &[OccupancySegment]) -> Vec<Share> {
    segments
        .iter()
        .enumerate()
        .map(|(segment_index, _)| Share {
            segment_index,
            amount: Money::ZERO,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{area_by_unit, compute_bases};
    use crate::intervals;
    use crate::types::{OccupancyContract, SegmentKind, Unit};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn unit(area: Decimal) -> Unit {
        Unit {
            id: Uuid::new_v4(),
            building_id: Uuid::new_v4(),
            area,
        }
    }

    fn contract(
        u: &Unit,
        start: NaiveDate,
        end: Option<NaiveDate>,
        person_count: u32,
    ) -> OccupancyContract {
        OccupancyContract {
            id: Uuid::new_v4(),
            unit_id: u.id,
            tenant_id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            person_count,
        }
    }

    fn cost_item(amount: Money, key: DistributionKey) -> CostItem {
        CostItem {
            id: Uuid::new_v4(),
            label: "heating".to_string(),
            amount,
            key,
        }
    }

    fn assert_conserved(item: &CostItem, shares: &[Share]) {
        let total: Money = shares.iter().map(|s| s.amount).sum();
        assert_eq!(total, item.amount);
    }

    #[test]
    fn test_area_split_within_partially_occupied_unit() {
        // the worked scenario: 31-day period, area 100, occupied days 1-15
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let u = unit(dec!(100));
        let contracts = vec![contract(&u, d(2024, 1, 1), Some(d(2024, 1, 15)), 2)];
        let segments = intervals::resolve(&u, &contracts, &period).unwrap();
        let units = [u];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(310), DistributionKey::Area);
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap();

        assert_eq!(shares[0].amount, Money::from_decimal(dec!(150.00)));
        assert_eq!(shares[1].amount, Money::from_decimal(dec!(160.00)));
        assert_conserved(&item, &shares);
        assert!(log.is_empty());
    }

    #[test]
    fn test_rounding_residual_lands_on_largest_share() {
        // 100.00 over three equal 10-day thirds: raw shares are 33.33...
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 30)).unwrap();
        let u = unit(dec!(90));
        let contracts = vec![
            contract(&u, d(2024, 1, 1), Some(d(2024, 1, 10)), 1),
            contract(&u, d(2024, 1, 11), Some(d(2024, 1, 20)), 1),
            contract(&u, d(2024, 1, 21), Some(d(2024, 1, 30)), 1),
        ];
        let segments = intervals::resolve(&u, &contracts, &period).unwrap();
        let units = [u];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(100), DistributionKey::Area);
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap();

        // first of the equal shares absorbs the cent of residual
        assert_eq!(shares[0].amount, Money::from_decimal(dec!(33.34)));
        assert_eq!(shares[1].amount, Money::from_decimal(dec!(33.33)));
        assert_eq!(shares[2].amount, Money::from_decimal(dec!(33.33)));
        assert_conserved(&item, &shares);
    }

    #[test]
    fn test_persons_key_skips_vacant_unit() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let occupied = unit(dec!(80));
        let vacant = unit(dec!(60));
        let contracts = vec![contract(&occupied, d(2023, 1, 1), None, 3)];
        let mut segments = intervals::resolve(&occupied, &contracts, &period).unwrap();
        segments.extend(intervals::resolve(&vacant, &contracts, &period).unwrap());
        let units = [occupied, vacant];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(200), DistributionKey::Persons);
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap();

        // the whole amount lands on the occupied unit's tenant
        assert_eq!(shares[0].amount, Money::from_major(200));
        assert_eq!(shares[1].amount, Money::ZERO);
        assert_eq!(segments[1].kind, SegmentKind::Vacant);
        assert_conserved(&item, &shares);
    }

    #[test]
    fn test_degenerate_person_base_is_rejected() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let u = unit(dec!(100));
        let segments = intervals::resolve(&u, &[], &period).unwrap();
        let units = [u];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(100), DistributionKey::Persons);
        let mut log = DiagnosticLog::new();

        let err = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap_err();

        match err {
            AllocationError::DegenerateDistributionBase { cost_item, key } => {
                assert_eq!(cost_item, item.id);
                assert_eq!(key, DistributionKey::Persons);
            }
            other => panic!("expected DegenerateDistributionBase, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_amount_item_allocates_zero_everywhere() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let u = unit(dec!(100));
        let segments = intervals::resolve(&u, &[], &period).unwrap();
        let units = [u];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        // zero amount with a zero person base is fine
        let item = cost_item(Money::ZERO, DistributionKey::Persons);
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap();

        assert!(shares.iter().all(|s| s.amount.is_zero()));
    }

    #[test]
    fn test_units_key_splits_flat_per_unit() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let small = unit(dec!(40));
        let large = unit(dec!(160));
        let contracts = vec![
            contract(&small, d(2023, 1, 1), None, 1),
            contract(&large, d(2023, 1, 1), None, 4),
        ];
        let mut segments = intervals::resolve(&small, &contracts, &period).unwrap();
        segments.extend(intervals::resolve(&large, &contracts, &period).unwrap());
        let units = [small, large];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(60), DistributionKey::Units);
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &[], &mut log)
            .unwrap();

        // size and headcount do not matter for the flat split
        assert_eq!(shares[0].amount, Money::from_major(30));
        assert_eq!(shares[1].amount, Money::from_major(30));
        assert_conserved(&item, &shares);
    }

    #[test]
    fn test_direct_assignment_bypasses_proration() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let u = unit(dec!(100));
        let other = unit(dec!(100));
        let assigned_contract = contract(&u, d(2023, 1, 1), None, 2);
        let unassigned_contract = contract(&other, d(2023, 1, 1), None, 1);
        let contracts = vec![assigned_contract.clone(), unassigned_contract.clone()];
        let mut segments = intervals::resolve(&u, &contracts, &period).unwrap();
        segments.extend(intervals::resolve(&other, &contracts, &period).unwrap());
        let units = [u, other];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(500), DistributionKey::Direct);
        let assignments = vec![DirectCostAssignment {
            cost_item_id: item.id,
            contract_id: assigned_contract.id,
            amount: Money::from_major(500),
        }];
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &assignments, &mut log)
            .unwrap();

        assert_eq!(shares[0].amount, Money::from_major(500));
        // no assignment: zero share, never implicitly spread
        assert_eq!(shares[1].amount, Money::ZERO);
        assert_conserved(&item, &shares);

        // the unassigned occupied segment is surfaced as a diagnostic
        assert_eq!(log.len(), 1);
        match &log.as_slice()[0] {
            Diagnostic::MissingDirectAssignment { contract_id, .. } => {
                assert_eq!(*contract_id, unassigned_contract.id);
            }
            other => panic!("expected MissingDirectAssignment, got {other:?}"),
        }
    }

    #[test]
    fn test_direct_shortfall_emits_unassigned_diagnostic() {
        let period = BillingPeriod::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        let u = unit(dec!(100));
        let c = contract(&u, d(2023, 1, 1), None, 2);
        let contracts = vec![c.clone()];
        let segments = intervals::resolve(&u, &contracts, &period).unwrap();
        let units = [u];
        let areas = area_by_unit(&units);
        let bases = compute_bases(&units, &segments, &period);
        let item = cost_item(Money::from_major(500), DistributionKey::Direct);
        let assignments = vec![DirectCostAssignment {
            cost_item_id: item.id,
            contract_id: c.id,
            amount: Money::from_major(300),
        }];
        let mut log = DiagnosticLog::new();

        let shares = ShareAllocator
            .allocate(&item, &segments, &areas, &period, &bases, &assignments, &mut log)
            .unwrap();

        assert_eq!(shares[0].amount, Money::from_major(300));
        assert_eq!(log.len(), 1);
        match &log.as_slice()[0] {
            Diagnostic::UnassignedDirectAmount {
                assigned,
                item_amount,
                ..
            } => {
                assert_eq!(*assigned, Money::from_major(300));
                assert_eq!(*item_amount, Money::from_major(500));
            }
            other => panic!("expected UnassignedDirectAmount, got {other:?}"),
        }
    }
}
