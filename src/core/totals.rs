use serde::Serialize;

use crate::quantity::energy::KilowattHours;

/// Daily totals, the only thing a refresh hands back to the caller.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct UsageTotals {
    /// Sum of absolute hourly production.
    pub produced: KilowattHours,

    pub consumed: KilowattHours,
}

impl UsageTotals {
    pub const ZERO: Self = Self { produced: KilowattHours::ZERO, consumed: KilowattHours::ZERO };
}
