use chrono::{Duration, NaiveDate};

use crate::errors::{AllocationError, Result};
use crate::types::{BillingPeriod, OccupancyContract, OccupancySegment, SegmentKind, Unit};

/// inclusive day count of a date range
fn day_count(start: NaiveDate, end: NaiveDate) -> u32 {
    (end - start).num_days() as u32 + 1
}

/// resolve one unit's occupancy over the billing period into a gap-free,
/// non-overlapping sequence of tenant and vacant segments
///
/// single sweep over the contract ranges sorted by clipped start: each gap
/// before a tenant range becomes one coalesced vacant segment, as does the
/// tail after the last contract. fails on any day covered by two contracts.
pub fn resolve(
    unit: &Unit,
    contracts: &[OccupancyContract],
    period: &BillingPeriod,
) -> Result<Vec<OccupancySegment>> {
    let mut clipped: Vec<(NaiveDate, NaiveDate, &OccupancyContract)> = contracts
        .iter()
        .filter(|c| c.unit_id == unit.id)
        .filter_map(|c| {
            period
                .clip(c.start_date, c.end_date)
                .map(|(start, end)| (start, end, c))
        })
        .collect();
    clipped.sort_by_key(|(start, _, c)| (*start, c.id));

    // sorted by start, so an overlap means a range begins on or before the
    // previous one ends
    for pair in clipped.windows(2) {
        let (_, prev_end, prev) = pair[0];
        let (start, _, next) = pair[1];
        if start <= prev_end {
            return Err(AllocationError::OverlappingOccupancy {
                unit_id: unit.id,
                first_contract: prev.id,
                second_contract: next.id,
            });
        }
    }

    let mut segments = Vec::with_capacity(clipped.len() * 2 + 1);
    let mut cursor = period.start;

    for &(start, end, contract) in &clipped {
        if start > cursor {
            segments.push(vacant_segment(unit, cursor, start - Duration::days(1)));
        }

        segments.push(OccupancySegment {
            unit_id: unit.id,
            kind: SegmentKind::Tenant,
            contract_id: Some(contract.id),
            tenant_id: Some(contract.tenant_id),
            start,
            end,
            day_count: day_count(start, end),
            person_count: contract.person_count,
        });
        cursor = end + Duration::days(1);
    }

    if cursor <= period.end {
        segments.push(vacant_segment(unit, cursor, period.end));
    }

    debug_assert_eq!(
        segments.iter().map(|s| s.day_count).sum::<u32>(),
        period.total_days()
    );
    Ok(segments)
}

fn vacant_segment(unit: &Unit, start: NaiveDate, end: NaiveDate) -> OccupancySegment {
    OccupancySegment {
        unit_id: unit.id,
        kind: SegmentKind::Vacant,
        contract_id: None,
        tenant_id: None,
        start,
        end,
        day_count: day_count(start, end),
        person_count: 0,
    }
}
