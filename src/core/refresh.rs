use std::time::Duration;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use tokio::time::timeout;

use crate::{
    core::{Credentials, DateWindow, RefreshError, UsageTotals},
    prelude::*,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the daily report comes from and how to make sense of it.
#[async_trait]
pub trait UsageSource: Sync {
    /// Log in and fetch the raw report for the window.
    async fn fetch_daily_report(
        &self,
        credentials: &Credentials,
        window: DateWindow,
    ) -> Result<String, RefreshError>;

    fn aggregate(&self, report: &str) -> Result<UsageTotals, RefreshError>;
}

/// Outcome of a single refresh cycle.
///
/// The totals are zero whenever the refresh failed.
#[must_use]
#[derive(Debug)]
pub struct Refresh {
    pub totals: UsageTotals,
    pub error: Option<RefreshError>,
}

impl Refresh {
    pub const fn succeeded(totals: UsageTotals) -> Self {
        Self { totals, error: None }
    }

    pub const fn failed(error: RefreshError) -> Self {
        Self { totals: UsageTotals::ZERO, error: Some(error) }
    }

    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn status(&self) -> &'static str {
        self.error.as_ref().map_or("ok", RefreshError::kind)
    }
}

#[must_use]
#[derive(bon::Builder)]
pub struct Refresher<S> {
    source: S,

    /// Bound on the whole fetch-and-aggregate sequence.
    #[builder(default = DEFAULT_TIMEOUT)]
    timeout: Duration,
}

#[cfg(test)]
impl<S> Refresher<S> {
    pub const fn source(&self) -> &S {
        &self.source
    }
}

impl<S: UsageSource> Refresher<S> {
    /// Refresh today's totals. Never fails: errors are logged and reported in the status.
    pub async fn refresh(&self, credentials: &Credentials) -> Refresh {
        self.refresh_on(credentials, Local::now().date_naive()).await
    }

    #[instrument(skip_all, fields(object_id = %credentials.object_id, today = %today))]
    pub async fn refresh_on(&self, credentials: &Credentials, today: NaiveDate) -> Refresh {
        match self.try_refresh(credentials, DateWindow::around(today)).await {
            Ok(totals) => {
                info!(produced = %totals.produced, consumed = %totals.consumed, "refreshed");
                Refresh::succeeded(totals)
            }
            Err(error) => {
                error!(kind = error.kind(), "failed to refresh: {}", error.report());
                Refresh::failed(error)
            }
        }
    }

    async fn try_refresh(
        &self,
        credentials: &Credentials,
        window: DateWindow,
    ) -> Result<UsageTotals, RefreshError> {
        let cycle = async {
            let report = self.source.fetch_daily_report(credentials, window).await?;
            self.source.aggregate(&report)
        };
        timeout(self.timeout, cycle).await.unwrap_or(Err(RefreshError::Timeout(self.timeout)))
    }
}
