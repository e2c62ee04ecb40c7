use chrono::{DateTime, Local};

use crate::{
    core::{Refresh, UsageTotals},
    quantity::energy::KilowattHours,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum SensorKind {
    #[display("consumed")]
    Consumed,

    #[display("produced")]
    Produced,
}

impl SensorKind {
    pub const ALL: [Self; 2] = [Self::Consumed, Self::Produced];
}

/// Published sensor state: the last known totals survive failed refreshes.
#[must_use]
#[derive(Debug, Default)]
pub struct Sensors {
    last_known: Option<UsageTotals>,
    updated_at: Option<DateTime<Local>>,
    last_status: Option<&'static str>,
}

impl Sensors {
    pub fn update(&mut self, refresh: &Refresh, at: DateTime<Local>) {
        if refresh.is_ok() {
            self.last_known = Some(refresh.totals);
            self.updated_at = Some(at);
        }
        self.last_status = Some(refresh.status());
    }

    pub fn state(&self, kind: SensorKind) -> Option<KilowattHours> {
        self.last_known.map(|totals| match kind {
            SensorKind::Consumed => totals.consumed,
            SensorKind::Produced => totals.produced,
        })
    }

    pub const fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// Status of the latest refresh, `None` before the first one.
    pub const fn last_status(&self) -> Option<&'static str> {
        self.last_status
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;
    use crate::core::RefreshError;

    fn succeeded(produced: f64, consumed: f64) -> Refresh {
        Refresh {
            totals: UsageTotals {
                produced: KilowattHours(produced),
                consumed: KilowattHours(consumed),
            },
            error: None,
        }
    }

    fn failed() -> Refresh {
        Refresh {
            totals: UsageTotals::ZERO,
            error: Some(RefreshError::UnexpectedShape("no datasets")),
        }
    }

    #[test]
    fn test_unknown_before_first_refresh() {
        let sensors = Sensors::default();
        assert_eq!(sensors.state(SensorKind::Consumed), None);
        assert_eq!(sensors.last_status(), None);
    }

    #[test]
    fn test_failure_keeps_last_known() {
        let now = Local::now();
        let mut sensors = Sensors::default();
        sensors.update(&succeeded(1.5, 7.25), now);
        sensors.update(&failed(), now + TimeDelta::minutes(10));

        assert_eq!(sensors.state(SensorKind::Produced), Some(KilowattHours(1.5)));
        assert_eq!(sensors.state(SensorKind::Consumed), Some(KilowattHours(7.25)));
        assert_eq!(sensors.updated_at(), Some(now));
        assert_eq!(sensors.last_status(), Some("report"));
    }

    #[test]
    fn test_display_kind() {
        assert_eq!(SensorKind::Produced.to_string(), "produced");
    }
}
