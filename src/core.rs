mod credentials;
mod date_window;
mod error;
mod refresh;
mod sensor;
mod totals;

pub use self::{
    credentials::Credentials,
    date_window::DateWindow,
    error::RefreshError,
    refresh::{Refresh, Refresher, UsageSource},
    sensor::{SensorKind, Sensors},
    totals::UsageTotals,
};
