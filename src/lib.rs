pub mod allocation;
pub mod decimal;
pub mod diagnostics;
pub mod distribution;
pub mod errors;
pub mod intervals;
pub mod statement;
pub mod types;
pub mod vacancy;
pub mod view;

// re-export key types
pub use allocation::{Share, ShareAllocator};
pub use decimal::{Money, Weight, MINOR_UNIT_SCALE};
pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use distribution::{compute_bases, segment_weight, DistributionBases};
pub use errors::{AllocationError, Result};
pub use statement::{StatementEngine, StatementInput, StatementOutput};
pub use types::{
    BillingPeriod, BuildingId, ContractId, CostItem, CostItemId, DirectCostAssignment,
    DistributionKey, OccupancyContract, OccupancySegment, SegmentKind, StatementParty,
    StatementSummary, TenantId, TenantShareResult, Unit, UnitId,
};
pub use vacancy::RoutedShares;
pub use view::{SettlementKind, StatementRowView, StatementView};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
