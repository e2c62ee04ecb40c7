//! The consumption history arrives as a list of Drupal AJAX commands.
//!
//! The last command is the settings update that carries the chart data:
//! `settings.eso_consumption_history_form.graphics_data.datasets`. The first dataset is
//! the production, the second one is the consumption.

use itertools::Either;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    core::{RefreshError, UsageTotals},
    prelude::*,
    quantity::energy::KilowattHours,
};

#[derive(Deserialize)]
struct Command {
    settings: Option<Settings>,
}

#[derive(Deserialize)]
struct Settings {
    #[serde(rename = "eso_consumption_history_form")]
    history_form: Option<HistoryForm>,
}

#[derive(Deserialize)]
struct HistoryForm {
    graphics_data: Option<GraphicsData>,
}

/// Only the first two datasets are typed, whatever follows is none of our business.
#[derive(Deserialize)]
struct GraphicsData {
    datasets: Option<Vec<Value>>,
}

#[derive(Deserialize)]
struct Dataset {
    label: Option<Value>,

    record: Option<Records>,
}

/// PHP serializes an empty associative array as `[]`, hence the list.
#[derive(Deserialize)]
#[serde(untagged)]
enum Records {
    Map(serde_json::Map<String, Value>),
    List(Vec<Value>),
}

impl Dataset {
    /// Readings that look like numbers, the rest is skipped.
    fn readings(&self) -> impl Iterator<Item = KilowattHours> + '_ {
        let entries = match &self.record {
            Some(Records::Map(entries)) => Either::Left(entries.values()),
            Some(Records::List(entries)) => Either::Right(Either::Left(entries.iter())),
            None => Either::Right(Either::Right(std::iter::empty())),
        };
        entries.filter_map(|entry| {
            let reading = parse_reading(entry);
            if reading.is_none() {
                trace!(?entry, label = ?self.label, "skipped a non-numeric reading");
            }
            reading
        })
    }
}

fn parse_reading(entry: &Value) -> Option<KilowattHours> {
    let value = match entry.get("value")? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    value.is_finite().then_some(KilowattHours(value))
}

/// Sum up the hourly records of the report.
///
/// Production is summed in absolute values since the portal reports it as negative.
#[instrument(skip_all, level = Level::DEBUG, fields(n_bytes = report.len()))]
pub fn aggregate(report: &str) -> Result<UsageTotals, RefreshError> {
    let mut commands: Vec<Value> = serde_json::from_str(report)?;
    let command = commands.pop().ok_or(RefreshError::UnexpectedShape("no commands"))?;
    let datasets = Command::deserialize(command)?
        .settings
        .ok_or(RefreshError::UnexpectedShape("no `settings` in the last command"))?
        .history_form
        .ok_or(RefreshError::UnexpectedShape("no consumption history form settings"))?
        .graphics_data
        .ok_or(RefreshError::UnexpectedShape("no `graphics_data`"))?
        .datasets
        .ok_or(RefreshError::UnexpectedShape("no `datasets`"))?;
    let [produced, consumed, ..] = datasets.as_slice() else {
        return Err(RefreshError::UnexpectedShape("fewer than two datasets"));
    };
    let (produced, consumed) = (Dataset::deserialize(produced)?, Dataset::deserialize(consumed)?);
    debug!(produced = ?produced.label, consumed = ?consumed.label, "found the datasets");
    Ok(UsageTotals {
        produced: produced.readings().map(KilowattHours::abs).sum(),
        consumed: consumed.readings().sum(),
    })
}
