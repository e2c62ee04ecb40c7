use chrono::{NaiveDate, NaiveTime};

/// The report day together with its neighbours, as the history form wants them.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateWindow {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    pub tomorrow: NaiveDate,
}

impl DateWindow {
    pub fn around(today: NaiveDate) -> Self {
        Self {
            today,
            yesterday: today.pred_opt().unwrap_or(NaiveDate::MIN),
            tomorrow: today.succ_opt().unwrap_or(NaiveDate::MAX),
        }
    }

    /// Plain calendar date of the report day.
    pub fn day_period(&self) -> String {
        self.today.format("%Y-%m-%d").to_string()
    }

    pub fn active_date_value(&self) -> String {
        Self::format_midnight(self.today)
    }

    pub fn back_button_value(&self) -> String {
        Self::format_midnight(self.yesterday)
    }

    pub fn next_button_value(&self) -> String {
        Self::format_midnight(self.tomorrow)
    }

    fn format_midnight(date: NaiveDate) -> String {
        date.and_time(NaiveTime::MIN).format("%Y-%m-%d %H:%M").to_string()
    }
}
