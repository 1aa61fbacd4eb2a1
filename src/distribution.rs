use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::decimal::Weight;
use crate::types::{BillingPeriod, DistributionKey, OccupancySegment, Unit, UnitId};

/// per-key distribution bases, computed once per statement run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionBases {
    /// day-weighted area over all segments, vacant included
    pub area: Weight,
    /// day-weighted person count over tenant segments only
    pub persons: Weight,
    /// unweighted count of selected units
    pub units: Weight,
    pub unit_count: u32,
}

impl DistributionBases {
    /// the base the allocator divides by for a given key; None for direct
    /// items, which bypass proration
    pub fn for_key(&self, key: DistributionKey) -> Option<Weight> {
        match key {
            DistributionKey::Area => Some(self.area),
            DistributionKey::Persons => Some(self.persons),
            DistributionKey::Units => Some(self.units),
            DistributionKey::Direct => None,
        }
    }
}

/// lookup of unit areas, built once from the selected units
pub fn area_by_unit(units: &[Unit]) -> HashMap<UnitId, Decimal> {
    units.iter().map(|u| (u.id, u.area)).collect()
}

/// a segment's weight under a distribution key
///
/// the same quantity sums to the key's base across all segments, so shares
/// computed as `amount * weight / base` conserve the item amount:
/// - area: unit area × day-fraction, for tenant and vacant segments alike
/// - persons: person count × day-fraction, zero for vacant segments
/// - units: plain day-fraction, so each unit's segments sum to one and the
///   base is the unit count (flat per-unit split, prorated within the unit)
pub fn segment_weight(
    key: DistributionKey,
    segment: &OccupancySegment,
    areas: &HashMap<UnitId, Decimal>,
    period: &BillingPeriod,
) -> Weight {
    let fraction = segment.day_fraction(period.total_days());
    match key {
        DistributionKey::Area => {
            let area = areas.get(&segment.unit_id).copied().unwrap_or(Decimal::ZERO);
            fraction.scaled(area)
        }
        DistributionKey::Persons => {
            if segment.is_vacant() {
                Weight::ZERO
            } else {
                fraction.scaled(Decimal::from(segment.person_count))
            }
        }
        DistributionKey::Units => fraction,
        DistributionKey::Direct => Weight::ZERO,
    }
}

/// compute every key's base over the resolved segments of all units
pub fn compute_bases(
    units: &[Unit],
    segments: &[OccupancySegment],
    period: &BillingPeriod,
) -> DistributionBases {
    let areas = area_by_unit(units);
    let area = segments
        .iter()
        .map(|s| segment_weight(DistributionKey::Area, s, &areas, period))
        .sum();
    let persons = segments
        .iter()
        .map(|s| segment_weight(DistributionKey::Persons, s, &areas, period))
        .sum();
    let unit_count = units.len() as u32;

    DistributionBases {
        area,
        persons,
        units: Weight::from_count(unit_count),
        unit_count,
    }
}
