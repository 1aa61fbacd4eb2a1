use std::collections::BTreeMap;

use crate::allocation::Share;
use crate::decimal::Money;
use crate::types::{ContractId, OccupancySegment};

/// a cost item's shares partitioned by who bears them
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoutedShares {
    /// tenant-borne amounts keyed by contract
    pub tenant_shares: BTreeMap<ContractId, Money>,
    /// owner-borne vacancy amount
    pub owner_share: Money,
}

impl RoutedShares {
    pub fn tenant_total(&self) -> Money {
        self.tenant_shares.values().copied().sum()
    }

    pub fn total(&self) -> Money {
        self.tenant_total() + self.owner_share
    }
}

/// partition one item's shares by segment kind: shares on vacant segments
/// are borne by the building owner, the rest by the segment's tenant
///
/// pure partition, no recomputation; the total is preserved exactly
pub fn route(segments: &[OccupancySegment], shares: &[Share]) -> RoutedShares {
    let mut routed = RoutedShares::default();
    for share in shares {
        match segments[share.segment_index].contract_id {
            Some(contract_id) => {
                *routed.tenant_shares.entry(contract_id).or_default() += share.amount;
            }
            None => routed.owner_share += share.amount,
        }
    }
    routed
}
