use chrono::Local;

use crate::{cli::FetchArgs, core::Sensors, prelude::*, tables::build_sensors_table};

#[instrument(skip_all)]
pub async fn fetch(args: &FetchArgs) -> Result {
    let refresher = args.refresh.refresher(args.portal.api()?);
    let refresh = refresher.refresh(&args.portal.credentials()).await;

    let mut sensors = Sensors::default();
    sensors.update(&refresh, Local::now());
    println!("{}", build_sensors_table(&sensors));

    ensure!(refresh.is_ok(), "refresh failed ({})", refresh.status());
    Ok(())
}
